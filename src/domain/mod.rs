//! Domain layer: the family tree and the head count traversal
//!
//! This layer is independent of the CLI and of config loading.

pub mod aggregate;
pub mod arena;
pub mod builder;
pub mod error;
pub mod report;
pub mod tree_traits;

pub use aggregate::{aggregate, count_children};
pub use arena::{FamilyNode, FamilyTree, Person, TreeIterator};
pub use builder::{PersonSpec, TreeBuilder, TreeFile};
pub use error::{DomainError, DomainResult};
pub use report::{Report, DEFAULT_TOTAL_LABEL};
pub use tree_traits::TreeNodeConvert;
