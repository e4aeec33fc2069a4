//! Schema assembly.
//!
//! Merges the cleaned catalog with its descriptions, projects the fixed
//! column list of every output table and collects the normalized tables
//! into one [`OutputTables`] set that a store writes as a unit.

use polars::prelude::{
    Column, DataFrame, IntoLazy, JoinArgs, JoinType, MaintainOrderJoin, col,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Primary item table.
pub const GAMES_TABLE: &str = "games";
/// Rating and playtime figures per item.
pub const RATINGS_TABLE: &str = "ratings";
/// Pass-through media table.
pub const MEDIA_TABLE: &str = "game_media";

/// Columns of `games` after the item identifier.
pub const GAME_FIELDS: [&str; 4] = ["name", "release_date", "short_description", "price"];
/// Columns of `ratings` after the item identifier.
pub const RATING_FIELDS: [&str; 5] = [
    "positive_ratings",
    "negative_ratings",
    "average_playtime",
    "median_playtime",
    "owners",
];
/// Columns of `game_media` after the item identifier.
pub const MEDIA_FIELDS: [&str; 1] = ["header_image"];

/// Identifier column names of the assembled sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub item_id_column: String,
    pub description_id_column: String,
    pub media_id_column: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            item_id_column: "appid".to_string(),
            description_id_column: "steam_appid".to_string(),
            media_id_column: "steam_appid".to_string(),
        }
    }
}

/// Cleaned sources the assembler reads.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInputs<'a> {
    pub catalog: &'a DataFrame,
    pub descriptions: &'a DataFrame,
    pub media: &'a DataFrame,
}

/// Named output tables, in write order.
#[derive(Debug, Clone, Default)]
pub struct OutputTables {
    tables: Vec<(String, DataFrame)>,
}

impl OutputTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table; names must be unique within the set.
    pub fn insert(&mut self, name: impl Into<String>, frame: DataFrame) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(OutputError::DuplicateTable { table: name });
        }
        self.tables.push((name, frame));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.tables
            .iter()
            .find(|(table, _)| table == name)
            .map(|(_, frame)| frame)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.tables.iter().map(|(name, frame)| (name.as_str(), frame))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn require<'a>(df: &'a DataFrame, table: &str, column: &str) -> Result<&'a Column> {
    df.column(column).map_err(|_| OutputError::SchemaMismatch {
        table: table.to_string(),
        column: column.to_string(),
    })
}

/// Renames the identifier column `from` to `to`.
pub fn alias_key(df: &DataFrame, table: &str, from: &str, to: &str) -> Result<DataFrame> {
    require(df, table, from)?;
    let mut aliased = df.clone();
    if from != to {
        aliased.rename(from, to.into())?;
    }
    Ok(aliased)
}

/// Left join on `key`, which both frames must carry.
///
/// Every left row survives in order; a left row matching several right rows
/// is repeated once per match. The key appears once in the result, and right
/// columns whose name is already taken get a `_right` suffix.
pub fn left_join(table: &str, left: &DataFrame, right: &DataFrame, key: &str) -> Result<DataFrame> {
    let left_key = require(left, table, key)?;
    let right_key = require(right, table, key)?;

    let mut right = right.clone();
    if right_key.dtype() != left_key.dtype() {
        let cast = right_key.cast(left_key.dtype())?;
        right.with_column(cast)?;
    }

    let mut args = JoinArgs::new(JoinType::Left).with_suffix(Some("_right".into()));
    args.maintain_order = MaintainOrderJoin::LeftRight;
    let joined = left
        .clone()
        .lazy()
        .join(right.lazy(), [col(key)], [col(key)], args)
        .collect()?;
    debug!(table, rows = joined.height(), "left join");
    Ok(joined)
}

/// Selects exactly `columns`, in order.
pub fn project(df: &DataFrame, table: &str, columns: &[&str]) -> Result<DataFrame> {
    for column in columns {
        require(df, table, column)?;
    }
    Ok(df.select(columns.iter().copied())?)
}

fn with_key<'a>(key: &'a str, fields: &[&'a str]) -> Vec<&'a str> {
    std::iter::once(key).chain(fields.iter().copied()).collect()
}

/// Builds every output table.
///
/// `normalized` carries the lookup, junction and vote tables in write order.
/// Nothing is written here; a failure leaves no partial output behind.
pub fn assemble(
    inputs: &AssemblyInputs<'_>,
    normalized: Vec<(String, DataFrame)>,
    options: &AssemblyOptions,
) -> Result<OutputTables> {
    let key = options.item_id_column.as_str();

    let descriptions = alias_key(
        inputs.descriptions,
        GAMES_TABLE,
        &options.description_id_column,
        key,
    )?;
    let merged = left_join(GAMES_TABLE, inputs.catalog, &descriptions, key)?;
    let media = alias_key(inputs.media, MEDIA_TABLE, &options.media_id_column, key)?;

    let mut tables = OutputTables::new();
    tables.insert(
        GAMES_TABLE,
        project(&merged, GAMES_TABLE, &with_key(key, &GAME_FIELDS))?,
    )?;
    tables.insert(
        RATINGS_TABLE,
        project(inputs.catalog, RATINGS_TABLE, &with_key(key, &RATING_FIELDS))?,
    )?;
    tables.insert(
        MEDIA_TABLE,
        project(&media, MEDIA_TABLE, &with_key(key, &MEDIA_FIELDS))?,
    )?;
    for (name, frame) in normalized {
        tables.insert(name, frame)?;
    }

    for (name, frame) in tables.iter() {
        info!(table = name, rows = frame.height(), columns = frame.width(), "assembled table");
    }
    Ok(tables)
}
