//! Named source sets.
//!
//! A pipeline run declares every source it needs up front in a
//! [`SourceSet`]; [`load_sources`] checks that all files exist before reading
//! any of them and returns a [`LoadedSources`] owned by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::csv::{IngestOptions, read_csv_frame_with_options};
use crate::error::{IngestError, Result};

/// One required source: a logical name and its file name in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub file: String,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// The full set of sources a run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub data_dir: PathBuf,
    pub sources: Vec<SourceSpec>,
    pub options: IngestOptions,
}

impl SourceSet {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sources: Vec::new(),
            options: IngestOptions::default(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, spec: SourceSpec) -> Self {
        self.sources.push(spec);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: IngestOptions) -> Self {
        self.options = options;
        self
    }

    /// Full path of a source file.
    pub fn path_of(&self, spec: &SourceSpec) -> PathBuf {
        self.data_dir.join(&spec.file)
    }
}

/// DataFrames for every source of a set, keyed by source name.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    frames: BTreeMap<String, DataFrame>,
}

impl LoadedSources {
    /// Borrow a loaded source.
    pub fn get(&self, name: &str) -> Result<&DataFrame> {
        self.frames.get(name).ok_or_else(|| IngestError::UnknownSource {
            name: name.to_string(),
        })
    }

    /// Take ownership of a loaded source, removing it from the set.
    pub fn take(&mut self, name: &str) -> Result<DataFrame> {
        self.frames
            .remove(name)
            .ok_or_else(|| IngestError::UnknownSource {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.frames.iter().map(|(name, df)| (name.as_str(), df))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Loads every source of a set.
///
/// All files are checked for existence first, so a missing source aborts the
/// run before any file is parsed.
pub fn load_sources(set: &SourceSet) -> Result<LoadedSources> {
    ensure_directory(&set.data_dir)?;
    for spec in &set.sources {
        let path = set.path_of(spec);
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                name: spec.name.clone(),
                path,
            });
        }
    }

    let mut frames = BTreeMap::new();
    for spec in &set.sources {
        let path = set.path_of(spec);
        let df = read_csv_frame_with_options(&path, set.options)?;
        tracing::info!(
            source = %spec.name,
            rows = df.height(),
            columns = df.width(),
            "loaded source"
        );
        frames.insert(spec.name.clone(), df);
    }
    Ok(LoadedSources { frames })
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        })
    }
}
