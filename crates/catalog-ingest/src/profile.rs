//! Source profiling for the `inspect` command.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, DataType};
use serde::Serialize;

use catalog_common::cell_string;

/// Per-column statistics of one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    /// Distinct non-empty values divided by non-empty values.
    pub distinct_ratio: f64,
    pub samples: Vec<String>,
}

/// Shape and column statistics of one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameProfile {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

/// Profiles every column of a DataFrame.
pub fn profile_frame(name: &str, df: &DataFrame, sample_limit: usize) -> FrameProfile {
    let columns = df
        .get_columns()
        .iter()
        .map(|col| profile_column(col, sample_limit))
        .collect();
    FrameProfile {
        name: name.to_string(),
        rows: df.height(),
        columns,
    }
}

fn profile_column(col: &Column, sample_limit: usize) -> ColumnProfile {
    let mut non_empty = 0usize;
    let mut distinct: BTreeSet<String> = BTreeSet::new();
    for idx in 0..col.len() {
        if let Some(value) = cell_string(col, idx) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                non_empty += 1;
                distinct.insert(trimmed.to_string());
            }
        }
    }
    let distinct_ratio = if non_empty > 0 {
        distinct.len() as f64 / non_empty as f64
    } else {
        0.0
    };
    ColumnProfile {
        name: col.name().to_string(),
        dtype: col.dtype().to_string(),
        null_count: col.null_count(),
        distinct_ratio,
        samples: distinct.into_iter().take(sample_limit).collect(),
    }
}

/// Gets sample unique values from a column.
///
/// Returns up to `limit` unique non-empty values in sorted order.
pub fn sample_values(df: &DataFrame, column: &str, limit: usize) -> Vec<String> {
    let Ok(col) = df.column(column) else {
        return Vec::new();
    };
    let Ok(str_col) = col.cast(&DataType::String) else {
        return Vec::new();
    };
    let Ok(str_chunked) = str_col.str() else {
        return Vec::new();
    };

    let mut unique: BTreeSet<String> = BTreeSet::new();
    for val in str_chunked.iter().flatten() {
        let trimmed = val.trim();
        if !trimmed.is_empty() {
            unique.insert(trimmed.to_string());
        }
    }
    unique.into_iter().take(limit).collect()
}
