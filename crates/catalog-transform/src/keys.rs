//! Surrogate key assignment.
//!
//! Keys depend only on the distinct value set: values are collected into a
//! `BTreeSet`, so neither row order nor source order can influence the IDs.

use std::collections::BTreeSet;

use catalog_model::Lookup;

/// Collects the distinct trimmed tokens of a domain across all rows.
pub fn distinct_tokens(rows: &[Vec<String>]) -> BTreeSet<String> {
    rows.iter()
        .flatten()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the lookup of one domain fed by a single source.
pub fn assign_keys(rows: &[Vec<String>]) -> Lookup {
    Lookup::from_values(distinct_tokens(rows))
}

/// Builds one lookup over the union of several token sources.
///
/// Every consumer of the domain (junction rows and vote facts alike) must
/// resolve against the lookup returned here.
pub fn merge_domains(token_sets: &[BTreeSet<String>]) -> Lookup {
    let union: BTreeSet<String> = token_sets.iter().flatten().cloned().collect();
    Lookup::from_values(union)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|t| (*t).to_string()).collect())
            .collect()
    }

    #[test]
    fn assigns_sorted_dense_ids() {
        let lookup = assign_keys(&rows(&[&["Action", "Indie"], &[], &["Action"]]));
        assert_eq!(lookup.id_of("Action"), Some(1));
        assert_eq!(lookup.id_of("Indie"), Some(2));
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn merge_covers_every_source() {
        let inline: BTreeSet<String> = ["Shooter".to_string()].into();
        let matrix: BTreeSet<String> = ["Shooter".to_string(), "RPG".to_string()].into();
        let lookup = merge_domains(&[inline.clone(), matrix.clone()]);
        assert_eq!(lookup.id_of("RPG"), Some(1));
        assert_eq!(lookup.id_of("Shooter"), Some(2));

        let reversed = merge_domains(&[matrix, inline]);
        assert_eq!(lookup, reversed);
    }
}
