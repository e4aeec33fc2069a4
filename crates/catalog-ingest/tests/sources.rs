use std::fs;

use catalog_ingest::{IngestError, SourceSet, SourceSpec, load_sources};
use tempfile::TempDir;

fn write_sources(dir: &TempDir) {
    fs::write(
        dir.path().join("steam.csv"),
        "appid,name,genres\n10,Counter-Strike,Action\n20,Team Fortress,Action;Indie\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("steamspy_tag_data.csv"),
        "appid,action,rpg\n10,120,0\n",
    )
    .unwrap();
}

#[test]
fn loads_every_declared_source() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir);
    let set = SourceSet::new(dir.path())
        .with_source(SourceSpec::new("steam", "steam.csv"))
        .with_source(SourceSpec::new("tag_votes", "steamspy_tag_data.csv"));

    let mut sources = load_sources(&set).unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources.get("steam").unwrap().height(), 2);

    let votes = sources.take("tag_votes").unwrap();
    assert_eq!(votes.width(), 3);
    assert!(matches!(
        sources.get("tag_votes"),
        Err(IngestError::UnknownSource { .. })
    ));
}

#[test]
fn missing_source_fails_before_reading() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir);
    let set = SourceSet::new(dir.path())
        .with_source(SourceSpec::new("steam", "steam.csv"))
        .with_source(SourceSpec::new("media", "steam_media_data.csv"));

    let err = load_sources(&set).unwrap_err();
    match err {
        IngestError::FileNotFound { name, .. } => assert_eq!(name, "media"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_directory_is_reported() {
    let set = SourceSet::new("/nonexistent/catalog/raw")
        .with_source(SourceSpec::new("steam", "steam.csv"));
    assert!(matches!(
        load_sources(&set),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}
