//! Tests for the upward-sum / downward-broadcast traversal

use famcount::domain::{
    aggregate, count_children, DomainError, FamilyTree, Person, PersonSpec, TreeBuilder,
};
use famcount::util::testing;
use rstest::rstest;

fn leaf(name: &str, count: i64) -> PersonSpec {
    PersonSpec {
        name: name.to_string(),
        count,
        is_girl: false,
        children: vec![],
    }
}

fn node(name: &str, count: i64, children: Vec<PersonSpec>) -> PersonSpec {
    PersonSpec {
        children,
        ..leaf(name, count)
    }
}

fn sum_counts(tree: &FamilyTree) -> i64 {
    tree.iter().map(|(_, n)| n.person.count).sum()
}

// ============================================================
// Grand total reaches every node
// ============================================================

#[rstest]
#[case::root_only(leaf("r", 4))]
#[case::flat(node("r", 1, vec![leaf("a", 1), leaf("b", 1), leaf("c", 1)]))]
#[case::chain(node("r", 1, vec![node("a", 2, vec![node("b", 3, vec![leaf("c", 4)])])]))]
#[case::mixed(node("r", 0, vec![
    node("a", 5, vec![leaf("a1", 1), leaf("a2", -2)]),
    leaf("b", 7),
    node("c", 1, vec![node("c1", 1, vec![leaf("c11", 10)])]),
]))]
fn given_tree_when_aggregating_then_every_node_holds_grand_total(#[case] spec: PersonSpec) {
    testing::init_test_setup();
    let mut tree = TreeBuilder::new().build(&spec).unwrap();
    let expected = sum_counts(&tree);

    let total = aggregate(&mut tree).unwrap();

    assert_eq!(total, expected);
    for (_, n) in tree.iter() {
        assert_eq!(n.message, expected, "node {} did not receive total", n.person);
    }
}

#[test]
fn given_fixture_when_aggregating_twice_then_values_are_stable() {
    let mut tree = FamilyTree::fixture();

    aggregate(&mut tree).unwrap();
    let first: Vec<i64> = tree.iter().map(|(_, n)| n.message).collect();
    aggregate(&mut tree).unwrap();
    let second: Vec<i64> = tree.iter().map(|(_, n)| n.message).collect();

    assert_eq!(first, vec![5; 5]);
    assert_eq!(first, second);
}

#[test]
fn given_three_level_tree_when_counting_from_root_then_all_hold_six() {
    let mut tree = FamilyTree::new();
    let root = tree.insert_node(Person::new("root", 1, false), None).unwrap();
    let a = tree.insert_node(Person::new("A", 2, false), Some(root)).unwrap();
    let b = tree.insert_node(Person::new("B", 3, false), Some(a)).unwrap();

    assert_eq!(count_children(&mut tree, root).unwrap(), 6);

    for idx in [root, a, b] {
        assert_eq!(tree.node(idx).unwrap().message, 6);
    }
}

#[test]
fn given_root_only_tree_when_counting_then_message_is_own_count() {
    let mut tree = FamilyTree::new();
    let root = tree.insert_node(Person::new("alone", 3, true), None).unwrap();

    assert_eq!(count_children(&mut tree, root).unwrap(), 3);
    assert_eq!(tree.node(root).unwrap().message, 3);
}

#[test]
fn given_non_root_internal_node_when_counting_then_subtotal_returned_and_total_broadcast() {
    let spec = node("r", 1, vec![
        node("a", 1, vec![leaf("a1", 1), leaf("a2", 1)]),
        leaf("b", 10),
    ]);
    let mut tree = TreeBuilder::new().build(&spec).unwrap();
    let a = tree.find("a").unwrap();

    let subtotal = count_children(&mut tree, a).unwrap();

    assert_eq!(subtotal, 3);
    assert!(tree.iter().all(|(_, n)| n.message == 14));
}

#[test]
fn given_is_girl_flag_when_aggregating_then_it_does_not_matter() {
    let mut boys = TreeBuilder::new().build(&node("r", 1, vec![leaf("a", 1)])).unwrap();
    let mut girls = TreeBuilder::new()
        .build(&PersonSpec {
            is_girl: true,
            children: vec![PersonSpec { is_girl: true, ..leaf("a", 1) }],
            ..leaf("r", 1)
        })
        .unwrap();

    assert_eq!(aggregate(&mut boys).unwrap(), aggregate(&mut girls).unwrap());
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn given_stale_index_when_counting_then_node_not_found() {
    let other = TreeBuilder::new()
        .build(&node("x", 1, vec![leaf("y", 1), leaf("z", 1)]))
        .unwrap();
    let foreign = other.find("z").unwrap();
    let mut small = FamilyTree::new();
    small.insert_node(Person::new("only", 1, false), None).unwrap();

    assert!(matches!(
        count_children(&mut small, foreign),
        Err(DomainError::NodeNotFound(_))
    ));
}

#[test]
fn given_counts_exceeding_i64_when_aggregating_then_overflow_error() {
    let spec = node("r", 0, vec![leaf("a", i64::MAX), leaf("b", 1)]);
    let mut tree = TreeBuilder::new().build(&spec).unwrap();

    let err = aggregate(&mut tree).unwrap_err();

    assert!(matches!(err, DomainError::CountOverflow { ref name } if name == "r"));
}
