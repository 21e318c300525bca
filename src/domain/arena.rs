use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Data payload for tree nodes: one person of the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Identifying label
    pub name: String,
    /// Intrinsic contribution of this person to the head count
    pub count: i64,
    /// Recorded for fidelity, never read by the aggregation
    pub is_girl: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, count: i64, is_girl: bool) -> Self {
        Self {
            name: name.into(),
            count,
            is_girl,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based family structure.
#[derive(Debug)]
pub struct FamilyNode {
    /// Person data for this node
    pub person: Person,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
    /// Most recently computed or received aggregate
    pub message: i64,
}

impl FamilyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena-based family tree.
///
/// Nodes are only ever added through [`FamilyTree::insert_node`], which requires
/// an existing parent, so the structure is acyclic with a single root.
#[derive(Debug)]
pub struct FamilyTree {
    /// Arena storage for all tree nodes
    arena: Arena<FamilyNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Teacher with four children, everyone counting as one.
    pub fn fixture() -> Self {
        let mut tree = Self::new();
        let root = tree.attach(Person::new("Teacher", 1, false), None);
        tree.attach(Person::new("Hansel", 1, false), Some(root));
        tree.attach(Person::new("Gretel", 1, true), Some(root));
        tree.attach(Person::new("Alice", 1, true), Some(root));
        tree.attach(Person::new("Bob", 1, false), Some(root));
        tree
    }

    /// Adds a node below `parent`, or as root when `parent` is None.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, person: Person, parent: Option<Index>) -> DomainResult<Index> {
        match parent {
            Some(parent_idx) if !self.arena.contains(parent_idx) => {
                Err(DomainError::NodeNotFound(parent_idx))
            }
            None if self.root.is_some() => Err(DomainError::RootAlreadySet(person.name)),
            _ => Ok(self.attach(person, parent)),
        }
    }

    /// Caller guarantees `parent` exists, or that the tree has no root yet.
    fn attach(&mut self, person: Person, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(FamilyNode {
            person,
            parent,
            children: Vec::new(),
            message: 0,
        });

        match parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(node_idx);
                }
            }
            None => self.root = Some(node_idx),
        }

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&FamilyNode> {
        self.arena.get(idx)
    }

    /// Like [`FamilyTree::get_node`], but a missing node is an error.
    pub fn node(&self, idx: Index) -> DomainResult<&FamilyNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub fn node_mut(&mut self, idx: Index) -> DomainResult<&mut FamilyNode> {
        self.arena.get_mut(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// First node named `name`, in pre-order.
    pub fn find(&self, name: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.person.name == name)
            .map(|(idx, _)| idx)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Names of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.person.name.clone())
            .collect()
    }
}

/// Pre-order iterator over the tree, in construction order.
pub struct TreeIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a FamilyTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a FamilyNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
