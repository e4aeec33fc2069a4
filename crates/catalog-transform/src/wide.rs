//! Wide-to-long reshaping of the tag vote matrix.
//!
//! The matrix has one identifier column and one numeric column per tag.
//! Reshaping emits one cell per (item, tag) with a strictly positive value;
//! zero, negative, null and non-numeric cells are all treated as "no votes".

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use catalog_common::any_to_f64;
use catalog_model::{AttributeDomain, ItemId, Lookup, VoteFact};

use crate::error::{Result, TransformError};
use crate::extract::item_ids;

/// One positive cell of the wide matrix, before key resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LongCell {
    pub item_id: ItemId,
    pub attribute: String,
    pub value: f64,
}

/// Attribute names of a wide matrix: every column except the identifier.
pub fn wide_attribute_names(df: &DataFrame, id_column: &str) -> BTreeSet<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != id_column)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Melts the matrix into long form, keeping only values `> 0`.
///
/// Output order is row order, then column order within the row.
pub fn melt_wide(df: &DataFrame, source: &str, id_column: &str) -> Result<Vec<LongCell>> {
    let ids = item_ids(df, source, id_column)?;
    let value_columns: Vec<_> = df
        .get_columns()
        .iter()
        .filter(|col| col.name().as_str() != id_column)
        .collect();

    let mut cells = Vec::new();
    let mut dropped = 0usize;
    for (row, item_id) in ids.iter().enumerate() {
        for column in &value_columns {
            let value = column.get(row).ok().and_then(any_to_f64).unwrap_or(0.0);
            if value > 0.0 {
                cells.push(LongCell {
                    item_id: *item_id,
                    attribute: column.name().trim().to_string(),
                    value,
                });
            } else {
                dropped += 1;
            }
        }
    }
    debug!(source, kept = cells.len(), dropped, "reshaped wide matrix");
    Ok(cells)
}

/// Resolves melted cells to tag keys.
///
/// A name without a key means the lookup was not built over the matrix
/// columns; that aborts with [`TransformError::LookupMiss`] instead of
/// dropping the row.
pub fn resolve_votes(cells: &[LongCell], lookup: &Lookup) -> Result<Vec<VoteFact>> {
    cells
        .iter()
        .map(|cell| {
            let attribute_id = lookup.id_of(&cell.attribute).ok_or_else(|| {
                TransformError::LookupMiss {
                    domain: AttributeDomain::Tags,
                    token: cell.attribute.clone(),
                }
            })?;
            Ok(VoteFact {
                item_id: cell.item_id,
                attribute_id,
                votes: cell.value,
            })
        })
        .collect()
}
