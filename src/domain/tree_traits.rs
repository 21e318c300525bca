use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{FamilyNode, FamilyTree};

/// Conversion into a printable `termtree` structure.
pub trait TreeNodeConvert {
    fn to_display_tree(&self) -> Tree<String>;
}

fn label(node: &FamilyNode) -> String {
    format!(
        "{} (count={}, message={})",
        node.person, node.person.count, node.message
    )
}

impl TreeNodeConvert for FamilyTree {
    #[instrument(level = "debug", skip(self))]
    fn to_display_tree(&self) -> Tree<String> {
        let Some(root_node) = self.root().and_then(|idx| self.get_node(idx)) else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree(tree: &FamilyTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(label(child));
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut display = Tree::new(label(root_node));
        if let Some(root_idx) = self.root() {
            build_tree(self, root_idx, &mut display);
        }
        display
    }
}
