//! Junction table construction.

use catalog_model::{AttributeDomain, ItemId, JunctionEntry, Lookup};

use crate::error::{Result, TransformError};

/// Emits one edge per (row, token) pair, in row order then token order.
///
/// Repeated tokens within a row produce repeated edges. A token missing from
/// `lookup` aborts with [`TransformError::LookupMiss`].
pub fn build_junction(
    domain: AttributeDomain,
    item_ids: &[ItemId],
    rows: &[Vec<String>],
    lookup: &Lookup,
) -> Result<Vec<JunctionEntry>> {
    let mut entries = Vec::with_capacity(rows.iter().map(Vec::len).sum());
    for (item_id, tokens) in item_ids.iter().zip(rows) {
        for token in tokens {
            if token.trim().is_empty() {
                continue;
            }
            let attribute_id = lookup
                .id_of(token)
                .ok_or_else(|| TransformError::LookupMiss {
                    domain,
                    token: token.clone(),
                })?;
            entries.push(JunctionEntry {
                item_id: *item_id,
                attribute_id,
            });
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::assign_keys;

    #[test]
    fn keeps_repeated_edges() {
        let rows = vec![vec!["Indie".to_string(), "Indie".to_string()]];
        let lookup = assign_keys(&rows);
        let edges = build_junction(AttributeDomain::Genres, &[7], &rows, &lookup).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], edges[1]);
    }

    #[test]
    fn unknown_token_is_fatal() {
        let known = vec![vec!["Action".to_string()]];
        let lookup = assign_keys(&known);
        let rows = vec![vec!["Action".to_string(), "Puzzle".to_string()]];
        let err = build_junction(AttributeDomain::Genres, &[1], &rows, &lookup).unwrap_err();
        match err {
            TransformError::LookupMiss { domain, token } => {
                assert_eq!(domain, AttributeDomain::Genres);
                assert_eq!(token, "Puzzle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
