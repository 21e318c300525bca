//! Head count report printed after aggregation.

use std::fmt;

use crate::domain::arena::FamilyTree;

pub const DEFAULT_TOTAL_LABEL: &str = "Total count";

/// One `<label>: <value>` line per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<(String, i64)>,
}

impl Report {
    /// Root's message under `total_label`, then every other node in pre-order.
    pub fn from_tree(tree: &FamilyTree, total_label: &str) -> Self {
        let entries = tree
            .iter()
            .map(|(_, node)| {
                let label = if node.is_root() {
                    total_label.to_string()
                } else {
                    node.person.name.clone()
                };
                (label, node.message)
            })
            .collect();
        Self { entries }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.entries {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}
