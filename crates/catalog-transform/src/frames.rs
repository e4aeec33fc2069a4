//! DataFrame builders for normalized records.

use polars::prelude::{DataFrame, NamedFrom, Series};

use catalog_common::numeric_series;
use catalog_model::{AttributeDomain, JunctionEntry, Lookup, VoteFact};

use crate::error::Result;

/// Name of the vote fact table.
pub const VOTE_TABLE: &str = "tag_votes";

/// Value column of the vote fact table.
pub const VOTE_COLUMN: &str = "votes";

/// `(<domain>_id, <domain>_name)` rows in ID order.
pub fn lookup_frame(domain: AttributeDomain, lookup: &Lookup) -> Result<DataFrame> {
    let (ids, names): (Vec<i64>, Vec<&str>) =
        lookup.iter().map(|(id, name)| (i64::from(id), name)).unzip();
    let df = DataFrame::new(vec![
        Series::new(domain.id_column().into(), ids).into(),
        Series::new(domain.name_column().into(), names).into(),
    ])?;
    Ok(df)
}

/// `(item, <domain>_id)` edge rows in emission order.
pub fn junction_frame(
    domain: AttributeDomain,
    item_column: &str,
    entries: &[JunctionEntry],
) -> Result<DataFrame> {
    let items: Vec<i64> = entries.iter().map(|entry| entry.item_id).collect();
    let ids: Vec<i64> = entries
        .iter()
        .map(|entry| i64::from(entry.attribute_id))
        .collect();
    let df = DataFrame::new(vec![
        Series::new(item_column.into(), items).into(),
        Series::new(domain.id_column().into(), ids).into(),
    ])?;
    Ok(df)
}

/// `(item, tag_id, votes)` fact rows.
///
/// Votes are written as integers unless some count carries a fraction.
pub fn vote_frame(item_column: &str, facts: &[VoteFact]) -> Result<DataFrame> {
    let items: Vec<i64> = facts.iter().map(|fact| fact.item_id).collect();
    let ids: Vec<i64> = facts
        .iter()
        .map(|fact| i64::from(fact.attribute_id))
        .collect();
    let votes: Vec<f64> = facts.iter().map(|fact| fact.votes).collect();
    let df = DataFrame::new(vec![
        Series::new(item_column.into(), items).into(),
        Series::new(AttributeDomain::Tags.id_column().into(), ids).into(),
        numeric_series(VOTE_COLUMN.into(), votes).into(),
    ])?;
    Ok(df)
}
