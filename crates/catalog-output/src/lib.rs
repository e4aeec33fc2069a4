//! Output side of the catalog pipeline.
//!
//! - **assemble**: merge, project and collect the named output tables
//! - **store**: the [`TableStore`] seam and an in-memory store
//! - **sqlite**: the SQLite store with staged, all-or-nothing replacement
//! - **export**: CSV export of cleaned sources
//! - **queries**: read-only search and detail lookups over a stored catalog

pub mod assemble;
mod error;
pub mod export;
pub mod queries;
pub mod sqlite;
pub mod store;

pub use assemble::{
    AssemblyInputs, AssemblyOptions, GAMES_TABLE, MEDIA_TABLE, OutputTables, RATINGS_TABLE,
    alias_key, assemble, left_join, project,
};
pub use error::{OutputError, Result};
pub use export::{cleaned_csv_path, export_cleaned, write_csv};
pub use queries::{DEFAULT_SEARCH_LIMIT, ItemDetail, SearchHit, item_detail, search_items};
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, TableStore};
