//! Error types for the cleaning stage.

use catalog_model::CleanAction;
use thiserror::Error;

/// Errors raised by cleaning operations.
///
/// Malformed cell values never produce an error; they are replaced and
/// counted in the audit log instead.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A named column is absent and the cleaner runs in strict mode.
    #[error("{action}: column '{column}' not found")]
    MissingColumn { action: CleanAction, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for CleanError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;
