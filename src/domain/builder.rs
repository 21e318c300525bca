//! Tree builder for turning a family description into an arena tree.

use std::path::{Path, PathBuf};

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::{FamilyTree, Person};
use crate::domain::error::{DomainError, DomainResult};

/// Recursive description of a person and their children.
///
/// ```toml
/// [root]
/// name = "Teacher"
///
/// [[root.children]]
/// name = "Gretel"
/// is_girl = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonSpec {
    pub name: String,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default)]
    pub is_girl: bool,
    #[serde(default)]
    pub children: Vec<PersonSpec>,
}

fn default_count() -> i64 {
    1
}

/// Top-level layout of a tree file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeFile {
    pub root: PersonSpec,
}

/// Constructs family trees from descriptions.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    source: Option<PathBuf>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a TOML file on disk.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&mut self, path: &Path) -> DomainResult<FamilyTree> {
        if !path.exists() {
            return Err(DomainError::FileNotFound(path.to_path_buf()));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| DomainError::InvalidTreeFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        self.source = Some(path.to_path_buf());
        let result = self.build_from_toml_str(&content);
        self.source = None;
        result
    }

    /// Build a tree from TOML text.
    pub fn build_from_toml_str(&mut self, content: &str) -> DomainResult<FamilyTree> {
        let file: TreeFile = toml::from_str(content).map_err(|e| DomainError::InvalidTreeFile {
            path: self.source.clone().unwrap_or_else(|| PathBuf::from("<inline>")),
            message: e.to_string(),
        })?;
        self.build(&file.root)
    }

    /// Build a tree from an already parsed description.
    pub fn build(&self, root: &PersonSpec) -> DomainResult<FamilyTree> {
        let mut tree = FamilyTree::new();
        self.insert_subtree(&mut tree, root, None)?;
        // instrumented calls must not run inside an event's field list
        let depth = tree.depth();
        debug!(nodes = tree.len(), depth, "built family tree");
        Ok(tree)
    }

    fn insert_subtree(
        &self,
        tree: &mut FamilyTree,
        spec: &PersonSpec,
        parent: Option<Index>,
    ) -> DomainResult<Index> {
        let person = Person::new(spec.name.clone(), spec.count, spec.is_girl);
        let idx = tree.insert_node(person, parent)?;
        for child in &spec.children {
            self.insert_subtree(tree, child, Some(idx))?;
        }
        Ok(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let mut builder = TreeBuilder::new();
        let tree = builder
            .build_from_toml_str(
                r#"
[root]
name = "solo"
"#,
            )
            .unwrap();

        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.person, Person::new("solo", 1, false));
        assert!(root.is_leaf());
    }

    #[test]
    fn test_missing_root_table_is_invalid() {
        let mut builder = TreeBuilder::new();
        let err = builder.build_from_toml_str("name = \"x\"").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTreeFile { .. }));
    }
}
