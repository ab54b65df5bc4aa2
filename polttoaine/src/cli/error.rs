//! CLI error types.

use crate::api::ApiError;

/// Errors from running a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
