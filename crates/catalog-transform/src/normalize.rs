//! Normalization of a cleaned catalog into lookups, edges and vote facts.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_model::{AttributeDomain, JunctionEntry, Lookup, VoteFact};

use crate::error::Result;
use crate::extract::{extract_tokens, item_ids};
use crate::frames::{VOTE_TABLE, junction_frame, lookup_frame, vote_frame};
use crate::junction::build_junction;
use crate::keys::{distinct_tokens, merge_domains};
use crate::wide::{melt_wide, resolve_votes, wide_attribute_names};

/// Where the normalizer finds its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Item identifier column of the catalog.
    pub item_id_column: String,
    /// Item identifier column of the tag vote matrix.
    pub tag_matrix_id_column: String,
    /// Separator of multi-valued cells.
    pub delimiter: char,
    /// Catalog column feeding each domain.
    pub domain_columns: BTreeMap<AttributeDomain, String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        let domain_columns = AttributeDomain::ALL
            .into_iter()
            .map(|domain| {
                let column = match domain {
                    AttributeDomain::Tags => "steamspy_tags".to_string(),
                    other => other.as_str().to_string(),
                };
                (domain, column)
            })
            .collect();
        Self {
            item_id_column: "appid".to_string(),
            tag_matrix_id_column: "appid".to_string(),
            delimiter: ';',
            domain_columns,
        }
    }
}

/// Normalized records of one run.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub lookups: BTreeMap<AttributeDomain, Lookup>,
    pub junctions: BTreeMap<AttributeDomain, Vec<JunctionEntry>>,
    pub votes: Vec<VoteFact>,
}

impl Normalized {
    /// Builds every lookup, junction and vote table, keyed by table name.
    pub fn frames(&self, item_column: &str) -> Result<Vec<(String, DataFrame)>> {
        let mut frames = Vec::with_capacity(self.lookups.len() * 2 + 1);
        for (domain, lookup) in &self.lookups {
            frames.push((
                domain.lookup_table().to_string(),
                lookup_frame(*domain, lookup)?,
            ));
            let edges = self
                .junctions
                .get(domain)
                .map(Vec::as_slice)
                .unwrap_or_default();
            frames.push((
                domain.junction_table().to_string(),
                junction_frame(*domain, item_column, edges)?,
            ));
        }
        frames.push((VOTE_TABLE.to_string(), vote_frame(item_column, &self.votes)?));
        Ok(frames)
    }
}

/// Extracts every domain of `catalog`, assigns keys and builds edges.
///
/// The tag lookup is the union of the inline tag tokens and the tag matrix
/// column names, so junction rows and vote facts share one ID space.
pub fn normalize(
    catalog: &DataFrame,
    tag_matrix: Option<&DataFrame>,
    options: &NormalizeOptions,
) -> Result<Normalized> {
    const CATALOG: &str = "catalog";
    const TAG_MATRIX: &str = "tag_votes";

    let ids = item_ids(catalog, CATALOG, &options.item_id_column)?;
    let mut normalized = Normalized::default();

    for (domain, column) in &options.domain_columns {
        let rows = extract_tokens(catalog, CATALOG, column, options.delimiter)?;
        let mut token_sets = vec![distinct_tokens(&rows)];
        if *domain == AttributeDomain::Tags
            && let Some(matrix) = tag_matrix
        {
            token_sets.push(wide_attribute_names(matrix, &options.tag_matrix_id_column));
        }
        let lookup = merge_domains(&token_sets);
        let edges = build_junction(*domain, &ids, &rows, &lookup)?;
        info!(
            domain = %domain,
            values = lookup.len(),
            edges = edges.len(),
            "normalized domain"
        );
        normalized.lookups.insert(*domain, lookup);
        normalized.junctions.insert(*domain, edges);
    }

    if let Some(matrix) = tag_matrix {
        let tags = match normalized.lookups.get(&AttributeDomain::Tags) {
            Some(lookup) => lookup.clone(),
            None => merge_domains(&[wide_attribute_names(
                matrix,
                &options.tag_matrix_id_column,
            )]),
        };
        let cells = melt_wide(matrix, TAG_MATRIX, &options.tag_matrix_id_column)?;
        normalized.votes = resolve_votes(&cells, &tags)?;
        info!(facts = normalized.votes.len(), "reshaped tag votes");
        normalized.lookups.entry(AttributeDomain::Tags).or_insert(tags);
    }

    Ok(normalized)
}
