//! CLI-level errors (wraps domain and config errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Domain(e) => match e {
                DomainError::FileNotFound(_) => crate::exitcode::NOINPUT,
                DomainError::InvalidTreeFile { .. }
                | DomainError::CountOverflow { .. }
                | DomainError::EmptyTree => crate::exitcode::DATAERR,
                DomainError::NodeNotFound(_) | DomainError::RootAlreadySet(_) => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}
