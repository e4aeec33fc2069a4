//! Error types for the normalization stage.

use catalog_model::AttributeDomain;
use thiserror::Error;

/// Errors raised while turning cleaned sources into normalized records.
///
/// Every variant is fatal to the run: a partial set of junction or fact rows
/// would leave the output schema inconsistent.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent from a source frame.
    #[error("column '{column}' not found in {source_name}")]
    ColumnNotFound { source_name: String, column: String },

    /// A token has no surrogate key in its domain's lookup.
    ///
    /// Means the lookup was built from fewer sources than feed the domain.
    #[error("no {domain} key for value '{token}'")]
    LookupMiss {
        domain: AttributeDomain,
        token: String,
    },

    /// An item identifier cell is null or not an integer.
    #[error("invalid item id in column '{column}' at row {row}: '{value}'")]
    InvalidItemId {
        column: String,
        row: usize,
        value: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, TransformError>;
