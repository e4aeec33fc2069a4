//! The chainable cleaner.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use catalog_model::AuditLog;

use crate::error::Result;
use crate::ops::{self, Step};

/// Placeholder written into missing cells when no other value is given.
pub const DEFAULT_FILL_VALUE: &str = "Unknown";

/// Behavior switches for the cleaner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Fail with [`CleanError::MissingColumn`](crate::CleanError::MissingColumn)
    /// when a named column is absent, instead of skipping it.
    #[serde(default)]
    pub strict: bool,
}

/// Working copy of one source plus the log of what was done to it.
#[derive(Debug, Clone)]
pub struct Cleaner {
    frame: DataFrame,
    log: AuditLog,
    options: CleanOptions,
}

fn to_owned_names<I>(columns: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    columns
        .into_iter()
        .map(|column| column.as_ref().to_string())
        .collect()
}

impl Cleaner {
    /// Starts cleaning a copy of `raw`. The caller's frame is left untouched.
    pub fn new(raw: &DataFrame) -> Self {
        Self {
            frame: raw.clone(),
            log: AuditLog::new(),
            options: CleanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CleanOptions) -> Self {
        self.options = options;
        self
    }

    fn apply(mut self, step: impl FnOnce(&DataFrame, CleanOptions) -> Result<Step>) -> Result<Self> {
        let Step { frame, entries } = step(&self.frame, self.options)?;
        for entry in &entries {
            debug!(action = %entry.action, affected = entry.affected, "{}", entry.message);
        }
        self.frame = frame;
        self.log.extend(entries);
        Ok(self)
    }

    /// Lowercases, trims and snake-cases every column name.
    pub fn standardize_columns(self) -> Result<Self> {
        self.apply(|df, _| ops::standardize_columns(df))
    }

    /// Removes exact duplicate rows, keeping the first occurrence.
    pub fn drop_duplicates(self) -> Result<Self> {
        self.apply(|df, _| ops::drop_duplicates(df))
    }

    /// Fills nulls in the named columns with [`DEFAULT_FILL_VALUE`].
    pub fn fill_missing<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.fill_missing_with(columns, DEFAULT_FILL_VALUE)
    }

    /// Fills nulls in the named columns with `value`.
    pub fn fill_missing_with<I>(self, columns: I, value: &str) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::fill_missing(df, &columns, value, options))
    }

    /// Trims, flattens newlines and lowercases the named text columns.
    pub fn normalize_text<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::normalize_text(df, &columns, options))
    }

    /// Replaces markup in the named columns with its visible text.
    pub fn strip_markup<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::strip_markup(df, &columns, options))
    }

    /// Converts the named columns to numbers; bad cells become `0`.
    pub fn coerce_numeric<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::coerce_numeric(df, &columns, options))
    }

    /// Converts the named columns to dates; bad cells become null.
    pub fn coerce_datetime<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::coerce_datetime(df, &columns, options))
    }

    /// Removes the named columns.
    pub fn drop_columns<I>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = to_owned_names(columns);
        self.apply(|df, options| ops::drop_columns(df, &columns, options))
    }

    /// Renames columns by `(old, new)` pairs.
    pub fn rename_columns<I, S, T>(self, renames: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let renames: Vec<(String, String)> = renames
            .into_iter()
            .map(|(old, new)| (old.as_ref().to_string(), new.as_ref().to_string()))
            .collect();
        self.apply(|df, options| ops::rename_columns(df, &renames, options))
    }

    /// Current state of the working copy.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    /// Emits the audit summary through tracing.
    pub fn print_audit_summary(&self, source: &str) {
        info!(source, entries = self.log.len(), "cleaning summary");
        for line in self.log.summary().lines() {
            info!(source, "{line}");
        }
    }

    pub fn finish(self) -> (DataFrame, AuditLog) {
        (self.frame, self.log)
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}
