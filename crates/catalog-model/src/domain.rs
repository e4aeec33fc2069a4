//! Multi-valued attribute domains.
//!
//! Each domain owns its own ID space, one lookup table and one junction
//! table in the normalized schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of multi-valued attribute attached to catalog items.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDomain {
    Categories,
    Genres,
    Platforms,
    Tags,
}

impl AttributeDomain {
    /// Every domain, in output order.
    pub const ALL: [AttributeDomain; 4] = [
        AttributeDomain::Categories,
        AttributeDomain::Genres,
        AttributeDomain::Platforms,
        AttributeDomain::Tags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Genres => "genres",
            Self::Platforms => "platforms",
            Self::Tags => "tags",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Self::Categories => "category",
            Self::Genres => "genre",
            Self::Platforms => "platform",
            Self::Tags => "tag",
        }
    }

    /// Name of the lookup table (e.g. `genres`).
    pub fn lookup_table(self) -> &'static str {
        self.as_str()
    }

    /// Name of the item-to-value junction table (e.g. `game_genres`).
    pub fn junction_table(self) -> &'static str {
        match self {
            Self::Categories => "game_categories",
            Self::Genres => "game_genres",
            Self::Platforms => "game_platforms",
            Self::Tags => "game_tags",
        }
    }

    /// Surrogate key column (e.g. `genre_id`).
    pub fn id_column(self) -> String {
        format!("{}_id", self.singular())
    }

    /// Value column of the lookup table (e.g. `genre_name`).
    pub fn name_column(self) -> String {
        format!("{}_name", self.singular())
    }
}

impl fmt::Display for AttributeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
