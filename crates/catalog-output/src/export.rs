//! CSV export of cleaned sources.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use catalog_common::cell_string;

use crate::error::{OutputError, Result};

/// Path of the cleaned export of source `name` inside `dir`.
pub fn cleaned_csv_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}_cleaned.csv"))
}

/// Writes `frame` as a comma-separated file with a header row.
///
/// Nulls are written as empty fields. The file is written to a temporary
/// sibling first and renamed into place.
pub fn write_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("csv.tmp");
    let csv_error = |source| OutputError::Csv {
        path: temp_path.clone(),
        source,
    };
    let mut writer = csv::Writer::from_path(&temp_path).map_err(csv_error)?;
    let columns = frame.get_columns();
    writer
        .write_record(columns.iter().map(|col| col.name().as_str()))
        .map_err(csv_error)?;
    for row in 0..frame.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|col| cell_string(col, row).unwrap_or_default())
            .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        operation: "flush",
        path: temp_path.clone(),
        source,
    })?;
    drop(writer);

    fs::rename(&temp_path, path).map_err(|source| OutputError::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes one cleaned source as `<dir>/<name>_cleaned.csv`.
pub fn export_cleaned(dir: &Path, name: &str, frame: &DataFrame) -> Result<PathBuf> {
    let path = cleaned_csv_path(dir, name);
    write_csv(frame, &path)?;
    tracing::info!(source = name, path = %path.display(), "exported cleaned source");
    Ok(path)
}
