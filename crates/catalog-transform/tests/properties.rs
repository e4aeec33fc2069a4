//! Property checks for key assignment, junctions and reshaping.

use std::collections::BTreeSet;

use catalog_model::AttributeDomain;
use catalog_transform::{
    assign_keys, build_junction, distinct_tokens, melt_wide, merge_domains, split_tokens,
};
use polars::prelude::*;
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Action".to_string()),
        Just("Indie".to_string()),
        Just(" RPG ".to_string()),
        Just("".to_string()),
        "[a-zA-Z ]{1,8}",
    ]
}

fn rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(token(), 0..5), 0..12)
}

/// Rows paired with a random permutation of themselves.
fn shuffled_rows() -> impl Strategy<Value = (Vec<Vec<String>>, Vec<Vec<String>>)> {
    rows().prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
}

proptest! {
    #[test]
    fn lookup_is_bijection_onto_dense_range(rows in rows()) {
        let lookup = assign_keys(&rows);
        let distinct = distinct_tokens(&rows);
        prop_assert_eq!(lookup.len(), distinct.len());
        let ids: BTreeSet<u32> = distinct
            .iter()
            .map(|token| lookup.id_of(token).unwrap())
            .collect();
        let expected: BTreeSet<u32> = (1..=distinct.len() as u32).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn keys_ignore_row_order((rows, shuffled) in shuffled_rows()) {
        prop_assert_eq!(assign_keys(&rows), assign_keys(&shuffled));
    }

    #[test]
    fn merge_ignores_source_order(a in rows(), b in rows()) {
        let left = distinct_tokens(&a);
        let right = distinct_tokens(&b);
        prop_assert_eq!(
            merge_domains(&[left.clone(), right.clone()]),
            merge_domains(&[right, left])
        );
    }

    #[test]
    fn junction_size_matches_token_count(raw in prop::collection::vec("[A-C; ]{0,10}", 0..10)) {
        let rows: Vec<Vec<String>> = raw.iter().map(|cell| split_tokens(cell, ';')).collect();
        let ids: Vec<i64> = (1..=rows.len() as i64).collect();
        let lookup = assign_keys(&rows);
        let edges = build_junction(AttributeDomain::Genres, &ids, &rows, &lookup).unwrap();
        let expected: usize = rows.iter().map(Vec::len).sum();
        prop_assert_eq!(edges.len(), expected);
    }

    #[test]
    fn melt_emits_only_positive_source_values(
        values in prop::collection::vec((-5i64..20, -5i64..20), 1..8)
    ) {
        let ids: Vec<i64> = (1..=values.len() as i64).collect();
        let alpha: Vec<i64> = values.iter().map(|(a, _)| *a).collect();
        let beta: Vec<i64> = values.iter().map(|(_, b)| *b).collect();
        let df = DataFrame::new(vec![
            Series::new("appid".into(), ids).into(),
            Series::new("alpha".into(), alpha.clone()).into(),
            Series::new("beta".into(), beta.clone()).into(),
        ])
        .unwrap();

        let cells = melt_wide(&df, "tag_votes", "appid").unwrap();
        let positives = alpha.iter().chain(&beta).filter(|v| **v > 0).count();
        prop_assert_eq!(cells.len(), positives);
        for cell in cells {
            prop_assert!(cell.value > 0.0);
            let row = usize::try_from(cell.item_id - 1).unwrap();
            let source = if cell.attribute == "alpha" { alpha[row] } else { beta[row] };
            prop_assert_eq!(cell.value, source as f64);
        }
    }
}
