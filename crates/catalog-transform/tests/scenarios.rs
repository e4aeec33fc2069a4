//! End-to-end normalization of small catalogs.

use catalog_model::{AttributeDomain, JunctionEntry, VoteFact};
use catalog_transform::{
    NormalizeOptions, TransformError, assign_keys, build_junction, extract_tokens, item_ids,
    normalize,
};
use polars::prelude::*;

fn options_for(domain: AttributeDomain, column: &str) -> NormalizeOptions {
    NormalizeOptions {
        domain_columns: [(domain, column.to_string())].into(),
        ..NormalizeOptions::default()
    }
}

#[test]
fn categories_round_trip() {
    let catalog = DataFrame::new(vec![
        Series::new("appid".into(), vec![1i64, 2, 3]).into(),
        Series::new("categories".into(), vec!["Action;Indie", "", "Action"]).into(),
    ])
    .unwrap();

    let rows = extract_tokens(&catalog, "catalog", "categories", ';').unwrap();
    let lookup = assign_keys(&rows);
    assert_eq!(lookup.id_of("Action"), Some(1));
    assert_eq!(lookup.id_of("Indie"), Some(2));
    assert_eq!(lookup.len(), 2);

    let ids = item_ids(&catalog, "catalog", "appid").unwrap();
    let edges = build_junction(AttributeDomain::Categories, &ids, &rows, &lookup).unwrap();
    let pairs: Vec<(i64, u32)> = edges
        .iter()
        .map(|JunctionEntry { item_id, attribute_id }| (*item_id, *attribute_id))
        .collect();
    assert_eq!(pairs, vec![(1, 1), (1, 2), (3, 1)]);
}

#[test]
fn tag_votes_share_the_merged_lookup() {
    let catalog = DataFrame::new(vec![
        Series::new("appid".into(), vec![2i64]).into(),
        Series::new("steamspy_tags".into(), vec!["Shooter"]).into(),
    ])
    .unwrap();
    let matrix = DataFrame::new(vec![
        Series::new("appid".into(), vec![1i64]).into(),
        Series::new("Shooter".into(), vec![5i64]).into(),
        Series::new("RPG".into(), vec![0i64]).into(),
    ])
    .unwrap();

    let normalized = normalize(
        &catalog,
        Some(&matrix),
        &options_for(AttributeDomain::Tags, "steamspy_tags"),
    )
    .unwrap();

    let tags = &normalized.lookups[&AttributeDomain::Tags];
    assert_eq!(tags.id_of("RPG"), Some(1));
    assert_eq!(tags.id_of("Shooter"), Some(2));
    assert_eq!(
        normalized.votes,
        vec![VoteFact {
            item_id: 1,
            attribute_id: 2,
            votes: 5.0,
        }]
    );
    assert_eq!(
        normalized.junctions[&AttributeDomain::Tags],
        vec![JunctionEntry {
            item_id: 2,
            attribute_id: 2,
        }]
    );

    let frames = normalized.frames("appid").unwrap();
    let (_, votes) = frames
        .iter()
        .find(|(name, _)| name == "tag_votes")
        .unwrap();
    assert_eq!(votes.column("votes").unwrap().dtype(), &DataType::Int64);
}

#[test]
fn frames_cover_every_configured_table() {
    let catalog = DataFrame::new(vec![
        Series::new("appid".into(), vec![10i64, 20]).into(),
        Series::new("categories".into(), vec![Some("Single-player"), None]).into(),
        Series::new("genres".into(), vec![Some("Action;Indie"), Some("Indie")]).into(),
        Series::new("platforms".into(), vec!["windows;mac", "windows"]).into(),
        Series::new("steamspy_tags".into(), vec!["Indie", "Casual"]).into(),
    ])
    .unwrap();

    let normalized = normalize(&catalog, None, &NormalizeOptions::default()).unwrap();
    let frames = normalized.frames("appid").unwrap();
    let names: Vec<&str> = frames.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "categories",
            "game_categories",
            "genres",
            "game_genres",
            "platforms",
            "game_platforms",
            "tags",
            "game_tags",
            "tag_votes",
        ]
    );

    let (_, game_genres) = &frames[3];
    assert_eq!(game_genres.height(), 3);
    let genre_cols: Vec<&str> = game_genres
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(genre_cols, vec!["appid", "genre_id"]);

    let (_, votes) = &frames[8];
    assert_eq!(votes.height(), 0);
}

#[test]
fn missing_domain_column_aborts() {
    let catalog = DataFrame::new(vec![Series::new("appid".into(), vec![1i64]).into()]).unwrap();
    let err = normalize(
        &catalog,
        None,
        &options_for(AttributeDomain::Genres, "genres"),
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::ColumnNotFound { .. }));
}
