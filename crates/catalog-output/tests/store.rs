//! Assembly, storage and query behavior against SQLite.

use catalog_output::{
    AssemblyInputs, AssemblyOptions, MemoryStore, OutputError, OutputTables, SqliteStore,
    TableStore, assemble, export_cleaned, item_detail, search_items,
};
use polars::prelude::*;

fn catalog() -> DataFrame {
    DataFrame::new(vec![
        Series::new("appid".into(), vec![10i64, 20, 30]).into(),
        Series::new("name".into(), vec!["counter-strike", "portal", "portal 2"]).into(),
        Series::new("release_date".into(), vec!["2000-11-01", "2007-10-10", "2011-04-18"]).into(),
        Series::new("price".into(), vec![7.19f64, 7.19, 7.19]).into(),
        Series::new("positive_ratings".into(), vec![124534.0f64, 51801.0, 138220.0]).into(),
        Series::new("negative_ratings".into(), vec![3339.0f64, 1080.0, 1891.0]).into(),
        Series::new("average_playtime".into(), vec![17612.0f64, 288.0, 1102.0]).into(),
        Series::new("median_playtime".into(), vec![317.0f64, 120.0, 520.0]).into(),
        Series::new("owners".into(), vec!["10000000-20000000"; 3]).into(),
        Series::new("developer".into(), vec!["valve"; 3]).into(),
    ])
    .unwrap()
}

fn descriptions() -> DataFrame {
    DataFrame::new(vec![
        Series::new("steam_appid".into(), vec![20i64, 10]).into(),
        Series::new("short_description".into(), vec!["a puzzle game", "a shooter"]).into(),
    ])
    .unwrap()
}

fn media() -> DataFrame {
    DataFrame::new(vec![
        Series::new("steam_appid".into(), vec![10i64, 20, 30]).into(),
        Series::new("header_image".into(), vec!["cs.jpg", "portal.jpg", "portal2.jpg"]).into(),
    ])
    .unwrap()
}

fn normalized() -> Vec<(String, DataFrame)> {
    let genres = DataFrame::new(vec![
        Series::new("genre_id".into(), vec![1i64, 2]).into(),
        Series::new("genre_name".into(), vec!["action", "puzzle"]).into(),
    ])
    .unwrap();
    let game_genres = DataFrame::new(vec![
        Series::new("appid".into(), vec![10i64, 20, 30]).into(),
        Series::new("genre_id".into(), vec![1i64, 2, 2]).into(),
    ])
    .unwrap();
    let tags = DataFrame::new(vec![
        Series::new("tag_id".into(), vec![1i64, 2]).into(),
        Series::new("tag_name".into(), vec!["funny", "puzzle"]).into(),
    ])
    .unwrap();
    let tag_votes = DataFrame::new(vec![
        Series::new("appid".into(), vec![20i64, 20]).into(),
        Series::new("tag_id".into(), vec![1i64, 2]).into(),
        Series::new("votes".into(), vec![40.0f64, 300.0]).into(),
    ])
    .unwrap();
    let empty_pair = |id: &str, name: &str| {
        DataFrame::new(vec![
            Series::new(id.into(), Vec::<i64>::new()).into(),
            Series::new(name.into(), Vec::<String>::new()).into(),
        ])
        .unwrap()
    };
    vec![
        ("categories".to_string(), empty_pair("category_id", "category_name")),
        ("game_categories".to_string(), empty_pair("appid", "category_id")),
        ("genres".to_string(), genres),
        ("game_genres".to_string(), game_genres),
        ("platforms".to_string(), empty_pair("platform_id", "platform_name")),
        ("game_platforms".to_string(), empty_pair("appid", "platform_id")),
        ("tags".to_string(), tags),
        ("game_tags".to_string(), empty_pair("appid", "tag_id")),
        ("tag_votes".to_string(), tag_votes),
    ]
}

fn assembled() -> OutputTables {
    let (catalog, descriptions, media) = (catalog(), descriptions(), media());
    let inputs = AssemblyInputs {
        catalog: &catalog,
        descriptions: &descriptions,
        media: &media,
    };
    assemble(&inputs, normalized(), &AssemblyOptions::default()).unwrap()
}

fn column_names(df: &DataFrame) -> Vec<&str> {
    df.get_column_names().iter().map(|name| name.as_str()).collect()
}

#[test]
fn assembler_projects_fixed_columns() {
    let tables = assembled();
    let games = tables.get("games").unwrap();
    assert_eq!(
        column_names(games),
        vec!["appid", "name", "release_date", "short_description", "price"]
    );
    assert_eq!(games.height(), 3);
    let descriptions = catalog_common::column_strings(games, "short_description").unwrap();
    assert_eq!(
        descriptions,
        vec![
            Some("a shooter".to_string()),
            Some("a puzzle game".to_string()),
            None,
        ]
    );

    let ratings = tables.get("ratings").unwrap();
    assert!(!column_names(ratings).contains(&"developer"));
    assert_eq!(column_names(tables.get("game_media").unwrap()), vec!["appid", "header_image"]);
    assert_eq!(tables.len(), 12);
}

#[test]
fn missing_join_key_is_a_schema_mismatch() {
    let catalog = catalog();
    let descriptions = descriptions().drop("steam_appid").unwrap();
    let media = media();
    let inputs = AssemblyInputs {
        catalog: &catalog,
        descriptions: &descriptions,
        media: &media,
    };
    let err = assemble(&inputs, Vec::new(), &AssemblyOptions::default()).unwrap_err();
    assert!(matches!(err, OutputError::SchemaMismatch { .. }));
}

#[test]
fn sqlite_store_supports_search_and_detail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite");
    let mut store = SqliteStore::open(&path).unwrap();
    store.replace_tables(&assembled()).unwrap();

    let conn = store.connection();
    let hits = search_items(conn, "PORTAL", 20).unwrap();
    let names: Vec<Option<&str>> = hits.iter().map(|hit| hit.name.as_deref()).collect();
    assert_eq!(names, vec![Some("portal"), Some("portal 2")]);
    assert_eq!(hits[0].header_image.as_deref(), Some("portal.jpg"));
    assert_eq!(search_items(conn, "portal", 1).unwrap().len(), 1);
    assert!(search_items(conn, "%", 20).unwrap().is_empty());
    assert!(search_items(conn, "portal_2", 20).unwrap().is_empty());
    assert_eq!(search_items(conn, "counter-", 20).unwrap().len(), 1);

    let detail = item_detail(conn, 20).unwrap().unwrap();
    assert_eq!(detail.short_description.as_deref(), Some("a puzzle game"));
    assert_eq!(detail.genres, vec!["puzzle".to_string()]);
    assert_eq!(
        detail.tags,
        vec![("puzzle".to_string(), 300.0), ("funny".to_string(), 40.0)]
    );
    assert!(detail.categories.is_empty());
    assert!(item_detail(conn, 99).unwrap().is_none());
}

#[test]
fn sqlite_store_replaces_tables_fully() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.replace_tables(&assembled()).unwrap();

    let mut second = OutputTables::new();
    second
        .insert(
            "games",
            DataFrame::new(vec![
                Series::new("appid".into(), vec![99i64]).into(),
                Series::new("name".into(), vec!["half-life"]).into(),
            ])
            .unwrap(),
        )
        .unwrap();
    store.replace_tables(&second).unwrap();

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let staging: i64 = store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name LIKE '__staging_%'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(staging, 0);
}

#[test]
fn memory_store_keeps_every_table() {
    let mut store = MemoryStore::new();
    store.replace_tables(&assembled()).unwrap();
    assert_eq!(store.len(), 12);
    assert_eq!(store.get("tag_votes").unwrap().height(), 2);
}

#[test]
fn cleaned_export_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_cleaned(dir.path(), "media", &media()).unwrap();
    assert!(path.ends_with("media_cleaned.csv"));
    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("steam_appid,header_image"));
    assert_eq!(lines.next(), Some("10,cs.jpg"));
    assert_eq!(text.lines().count(), 4);
}
