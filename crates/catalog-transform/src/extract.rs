//! Attribute extraction from delimited text columns.

use polars::prelude::DataFrame;

use catalog_common::{any_to_i64, cell_string};
use catalog_model::ItemId;

use crate::error::{Result, TransformError};

/// Splits one raw cell into trimmed, non-empty tokens.
///
/// Token order is preserved and repeated tokens are kept.
pub fn split_tokens(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the token list of every row of `column`.
///
/// Null and empty cells yield an empty list.
pub fn extract_tokens(
    df: &DataFrame,
    source: &str,
    column: &str,
    delimiter: char,
) -> Result<Vec<Vec<String>>> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            source_name: source.to_string(),
            column: column.to_string(),
        })?;
    Ok((0..col.len())
        .map(|idx| {
            cell_string(col, idx)
                .map(|raw| split_tokens(&raw, delimiter))
                .unwrap_or_default()
        })
        .collect())
}

/// Reads the item identifier of every row.
///
/// Identifiers must be integers (or whole floats, after numeric coercion).
pub fn item_ids(df: &DataFrame, source: &str, column: &str) -> Result<Vec<ItemId>> {
    let col = df
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            source_name: source.to_string(),
            column: column.to_string(),
        })?;
    let mut ids = Vec::with_capacity(col.len());
    for row in 0..col.len() {
        let value = col.get(row)?;
        let Some(id) = any_to_i64(value.clone()) else {
            return Err(TransformError::InvalidItemId {
                column: column.to_string(),
                row,
                value: catalog_common::any_to_string(value),
            });
        };
        ids.push(id);
    }
    Ok(ids)
}
