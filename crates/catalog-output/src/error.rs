//! Output error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling, storing, exporting or querying tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A join key or projected column is absent.
    #[error("schema mismatch in '{table}': column '{column}' not found")]
    SchemaMismatch { table: String, column: String },

    /// Two output tables share one name.
    #[error("duplicate output table '{table}'")]
    DuplicateTable { table: String },

    /// SQLite failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O failure.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failure.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
