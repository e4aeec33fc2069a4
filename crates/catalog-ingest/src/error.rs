//! Error types for catalog source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading catalog sources.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Data directory not found or not a directory.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Source CSV file not found.
    #[error("source '{name}' not found: {path}")]
    FileNotFound { name: String, path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A source was requested that the set does not contain.
    #[error("source '{name}' was not loaded")]
    UnknownSource { name: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
