//! Catalog source ingestion.
//!
//! This crate loads the raw catalog CSV files into Polars DataFrames.
//!
//! # Features
//!
//! - **CSV Loading**: Read one CSV file with a header row into a DataFrame
//! - **Source Sets**: Load a named set of required sources in one call, failing
//!   before anything else runs if any source is missing or unreadable
//! - **Profiling**: Per-column statistics used by the `inspect` command
//!
//! # Example
//!
//! ```ignore
//! use catalog_ingest::{SourceSet, SourceSpec, load_sources};
//!
//! let set = SourceSet::new("data/raw")
//!     .with_source(SourceSpec::new("steam", "steam.csv"));
//! let sources = load_sources(&set)?;
//! let steam = sources.get("steam")?;
//! ```

mod csv;
mod error;
mod profile;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{IngestOptions, read_csv_frame, read_csv_frame_with_options};

// === Source Sets ===
pub use sources::{LoadedSources, SourceSet, SourceSpec, load_sources};

// === Profiling ===
pub use profile::{ColumnProfile, FrameProfile, profile_frame, sample_values};
