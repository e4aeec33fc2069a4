//! CSV reading into Polars DataFrames.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Options controlling how a CSV file is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Rows scanned to infer column types. `None` scans the whole file,
    /// `Some(0)` reads every column as text.
    pub infer_schema_length: Option<usize>,
}

/// Reads a CSV file with a single header row.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    read_csv_frame_with_options(path, IngestOptions::default())
}

/// Reads a CSV file with a single header row using explicit options.
pub fn read_csv_frame_with_options(path: &Path, options: IngestOptions) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}
