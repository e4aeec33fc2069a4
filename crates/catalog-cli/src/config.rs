//! Pipeline configuration.
//!
//! Every field has a default matching the Steam catalog layout, so an empty
//! (or absent) TOML file describes the standard run:
//!
//! ```toml
//! data_dir = "data/raw"
//! database = "data/steam.sqlite"
//! strict = false
//! delimiter = ";"
//!
//! [sources]
//! catalog = "steam.csv"
//! descriptions = "steam_description_data.csv"
//! media = "steam_media_data.csv"
//! tag_votes = "steamspy_tag_data.csv"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use catalog_clean::CleanOptions;
use catalog_ingest::{SourceSet, SourceSpec};
use catalog_model::AttributeDomain;
use catalog_output::AssemblyOptions;
use catalog_transform::NormalizeOptions;

/// Source name of the primary catalog.
pub const CATALOG_SOURCE: &str = "catalog";
/// Source name of the description table.
pub const DESCRIPTIONS_SOURCE: &str = "descriptions";
/// Source name of the media table.
pub const MEDIA_SOURCE: &str = "media";
/// Source name of the wide tag vote matrix.
pub const TAG_VOTES_SOURCE: &str = "tag_votes";

/// File names of the four raw sources, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceFiles {
    pub catalog: String,
    pub descriptions: String,
    pub media: String,
    pub tag_votes: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            catalog: "steam.csv".to_string(),
            descriptions: "steam_description_data.csv".to_string(),
            media: "steam_media_data.csv".to_string(),
            tag_votes: "steamspy_tag_data.csv".to_string(),
        }
    }
}

/// Column lists of the catalog cleaning recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogRecipe {
    pub text_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

impl Default for CatalogRecipe {
    fn default() -> Self {
        Self {
            text_columns: strings(&[
                "name",
                "developer",
                "publisher",
                "platforms",
                "categories",
                "genres",
                "steamspy_tags",
            ]),
            numeric_columns: strings(&[
                "english",
                "required_age",
                "achievements",
                "positive_ratings",
                "negative_ratings",
                "average_playtime",
                "median_playtime",
                "price",
            ]),
            date_columns: strings(&["release_date"]),
        }
    }
}

/// Column lists of the description cleaning recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptionRecipe {
    pub markup_columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub fill_value: String,
    pub drop_columns: Vec<String>,
}

impl Default for DescriptionRecipe {
    fn default() -> Self {
        Self {
            markup_columns: strings(&["short_description"]),
            text_columns: strings(&["short_description"]),
            fill_value: "No available description".to_string(),
            drop_columns: strings(&["detailed_description", "about_the_game"]),
        }
    }
}

/// Column lists of the media cleaning recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaRecipe {
    pub drop_columns: Vec<String>,
}

impl Default for MediaRecipe {
    fn default() -> Self {
        Self {
            drop_columns: strings(&["screenshots", "background", "movies"]),
        }
    }
}

/// Full configuration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the raw CSV files.
    pub data_dir: PathBuf,
    /// Destination SQLite database.
    pub database: PathBuf,
    /// Fail on absent columns instead of skipping them.
    pub strict: bool,
    /// Separator of multi-valued attribute cells.
    pub delimiter: char,
    pub sources: SourceFiles,
    pub item_id_column: String,
    pub description_id_column: String,
    pub media_id_column: String,
    pub tag_matrix_id_column: String,
    /// Catalog column feeding each attribute domain.
    pub domain_columns: BTreeMap<AttributeDomain, String>,
    pub catalog: CatalogRecipe,
    pub descriptions: DescriptionRecipe,
    pub media: MediaRecipe,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let normalize = NormalizeOptions::default();
        let assembly = AssemblyOptions::default();
        Self {
            data_dir: PathBuf::from("data/raw"),
            database: PathBuf::from("data/steam.sqlite"),
            strict: false,
            delimiter: normalize.delimiter,
            sources: SourceFiles::default(),
            item_id_column: assembly.item_id_column,
            description_id_column: assembly.description_id_column,
            media_id_column: assembly.media_id_column,
            tag_matrix_id_column: normalize.tag_matrix_id_column,
            domain_columns: normalize.domain_columns,
            catalog: CatalogRecipe::default(),
            descriptions: DescriptionRecipe::default(),
            media: MediaRecipe::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse config: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The four required sources.
    pub fn source_set(&self) -> SourceSet {
        SourceSet::new(&self.data_dir)
            .with_source(SourceSpec::new(CATALOG_SOURCE, &self.sources.catalog))
            .with_source(SourceSpec::new(
                DESCRIPTIONS_SOURCE,
                &self.sources.descriptions,
            ))
            .with_source(SourceSpec::new(MEDIA_SOURCE, &self.sources.media))
            .with_source(SourceSpec::new(TAG_VOTES_SOURCE, &self.sources.tag_votes))
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            strict: self.strict,
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            item_id_column: self.item_id_column.clone(),
            tag_matrix_id_column: self.tag_matrix_id_column.clone(),
            delimiter: self.delimiter,
            domain_columns: self.domain_columns.clone(),
        }
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            item_id_column: self.item_id_column.clone(),
            description_id_column: self.description_id_column.clone(),
            media_id_column: self.media_id_column.clone(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.sources.catalog, "steam.csv");
        assert_eq!(
            config.domain_columns[&AttributeDomain::Tags],
            "steamspy_tags"
        );
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = PipelineConfig::from_toml(
            r#"
            strict = true
            delimiter = "|"

            [sources]
            catalog = "games.csv"

            [domain_columns]
            genres = "genre_list"
            "#,
        )
        .unwrap();
        assert!(config.strict);
        assert_eq!(config.delimiter, '|');
        assert_eq!(config.sources.catalog, "games.csv");
        assert_eq!(config.sources.media, "steam_media_data.csv");
        assert_eq!(config.domain_columns.len(), 1);
        assert_eq!(config.domain_columns[&AttributeDomain::Genres], "genre_list");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PipelineConfig::from_toml("databse = \"x.sqlite\"").is_err());
    }

    #[test]
    fn source_set_lists_all_sources() {
        let set = PipelineConfig::default().source_set();
        let names: Vec<&str> = set.sources.iter().map(|spec| spec.name.as_str()).collect();
        assert_eq!(names, vec!["catalog", "descriptions", "media", "tag_votes"]);
    }
}
