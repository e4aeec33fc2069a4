//! Per-source cleaning recipes.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use catalog_clean::Cleaner;

use crate::config::PipelineConfig;

/// Descriptions: markup out, text normalized, gaps filled, long-form text dropped.
pub fn clean_descriptions(raw: &DataFrame, config: &PipelineConfig) -> Result<Cleaner> {
    let recipe = &config.descriptions;
    let cleaned = Cleaner::new(raw)
        .with_options(config.clean_options())
        .standardize_columns()?
        .drop_duplicates()?
        .strip_markup(&recipe.markup_columns)?
        .normalize_text(&recipe.text_columns)?
        .fill_missing_with(&recipe.text_columns, &recipe.fill_value)?
        .drop_columns(&recipe.drop_columns)?;
    Ok(cleaned)
}

/// Catalog: gaps filled, text normalized, figures and dates coerced.
///
/// The identifier and the multi-valued attribute columns are never filled, so
/// a missing attribute yields no edges rather than an `unknown` value.
pub fn clean_catalog(raw: &DataFrame, config: &PipelineConfig) -> Result<Cleaner> {
    let recipe = &config.catalog;
    let cleaner = Cleaner::new(raw)
        .with_options(config.clean_options())
        .standardize_columns()?
        .drop_duplicates()?;

    let fill: Vec<String> = cleaner
        .frame()
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| {
            *name != config.item_id_column && !config.domain_columns.values().any(|c| c == name)
        })
        .collect();

    let cleaned = cleaner
        .fill_missing(&fill)?
        .normalize_text(&recipe.text_columns)?
        .coerce_numeric(&recipe.numeric_columns)?
        .coerce_datetime(&recipe.date_columns)?;
    Ok(cleaned)
}

/// Media: only the header image survives projection, so bulky columns go early.
pub fn clean_media(raw: &DataFrame, config: &PipelineConfig) -> Result<Cleaner> {
    let cleaned = Cleaner::new(raw)
        .with_options(config.clean_options())
        .standardize_columns()?
        .drop_duplicates()?
        .drop_columns(&config.media.drop_columns)?;
    Ok(cleaned)
}

/// Tag matrix: every vote column becomes a number; gaps count as zero votes.
pub fn clean_tag_votes(raw: &DataFrame, config: &PipelineConfig) -> Result<Cleaner> {
    let id_column = &config.tag_matrix_id_column;
    let vote_columns: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| name != id_column)
        .collect();
    Cleaner::new(raw)
        .with_options(config.clean_options())
        .coerce_numeric(&vote_columns)
        .context("coerce tag vote columns")
}
