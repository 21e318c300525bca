//! Domain-level errors (no external dependencies)

use std::path::PathBuf;

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent tree and traversal violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("node not found in tree: {0:?}")]
    NodeNotFound(Index),

    #[error("tree already has a root: {0}")]
    RootAlreadySet(String),

    #[error("tree is empty")]
    EmptyTree,

    #[error("count overflow while aggregating at: {name}")]
    CountOverflow { name: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid tree file {path}: {message}")]
    InvalidTreeFile { path: PathBuf, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
