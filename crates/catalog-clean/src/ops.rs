//! Cleaning operations as pure functions.
//!
//! Each operation reads a DataFrame snapshot and returns a [`Step`]: the new
//! frame plus the audit entries describing what changed. Input frames are
//! never modified.

use std::collections::HashSet;

use chrono::NaiveDate;
use polars::prelude::{
    Column, DataFrame, DataType, FillNullStrategy, IntoLazy, NamedFrom, Series,
    UniqueKeepStrategy,
};
use tracing::debug;

use catalog_common::{any_to_f64, cell_string, numeric_series};
use catalog_model::{AuditEntry, CleanAction};

use crate::datetime::parse_date;
use crate::engine::CleanOptions;
use crate::error::{CleanError, Result};
use crate::markup::strip_markup_text;

/// Outcome of one cleaning operation.
#[derive(Debug, Clone)]
pub struct Step {
    pub frame: DataFrame,
    pub entries: Vec<AuditEntry>,
}

impl Step {
    fn unchanged(df: &DataFrame) -> Self {
        Self {
            frame: df.clone(),
            entries: Vec::new(),
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Filters `columns` down to the ones present in `df`.
///
/// Absent columns are skipped with a debug trace, or rejected in strict mode.
fn present_columns<'a>(
    df: &DataFrame,
    columns: &'a [String],
    action: CleanAction,
    options: CleanOptions,
) -> Result<Vec<&'a str>> {
    let mut present = Vec::with_capacity(columns.len());
    for column in columns {
        if df.column(column).is_ok() {
            present.push(column.as_str());
        } else if options.strict {
            return Err(CleanError::MissingColumn {
                action,
                column: column.clone(),
            });
        } else {
            debug!(%action, column = %column, "column not found, skipping");
        }
    }
    Ok(present)
}

/// Lowercases, trims and snake-cases a column name.
pub fn standardize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Standardizes every column name.
///
/// Headers that standardize to a name already taken get a numeric suffix
/// (`name_2`, `name_3`, ...), and each such collision is logged.
pub fn standardize_columns(df: &DataFrame) -> Result<Step> {
    let old: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(old.len());
    let mut new: Vec<String> = Vec::with_capacity(old.len());
    let mut collisions = Vec::new();
    for name in &old {
        let standard = standardize_name(name);
        let mut candidate = standard.clone();
        let mut suffix = 2usize;
        while taken.contains(&candidate) {
            candidate = format!("{standard}_{suffix}");
            suffix += 1;
        }
        if candidate != standard {
            collisions.push(AuditEntry::new(
                CleanAction::StandardizeColumns,
                Some(name.as_str()),
                1,
                format!("'{name}' collides with '{standard}', renamed to '{candidate}'"),
            ));
        }
        taken.insert(candidate.clone());
        new.push(candidate);
    }

    let changed = old.iter().zip(&new).filter(|(a, b)| a != b).count();
    if changed == 0 {
        return Ok(Step::unchanged(df));
    }

    let mut frame = df.clone();
    frame.set_column_names(new.iter().map(String::as_str))?;
    let mut entries = vec![AuditEntry::new(
        CleanAction::StandardizeColumns,
        None,
        changed,
        format!("standardized {changed} {}", plural(changed, "column name")),
    )];
    entries.extend(collisions);
    Ok(Step { frame, entries })
}

/// Removes rows that duplicate an earlier row across all columns.
pub fn drop_duplicates(df: &DataFrame) -> Result<Step> {
    if df.height() == 0 {
        return Ok(Step::unchanged(df));
    }
    let frame = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = df.height() - frame.height();
    if removed == 0 {
        return Ok(Step::unchanged(df));
    }

    Ok(Step {
        frame,
        entries: vec![AuditEntry::new(
            CleanAction::DropDuplicates,
            None,
            removed,
            format!("removed {removed} duplicate {}", plural(removed, "row")),
        )],
    })
}

/// Replaces null cells with `value`.
///
/// Columns that contain nulls become text columns, since the fill value is
/// text; columns without nulls keep their type.
pub fn fill_missing(
    df: &DataFrame,
    columns: &[String],
    value: &str,
    options: CleanOptions,
) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for name in present_columns(df, columns, CleanAction::FillMissing, options)? {
        let column = df.column(name)?;
        let missing = column.null_count();
        if missing == 0 {
            continue;
        }
        let filled: Vec<String> = (0..column.len())
            .map(|idx| cell_string(column, idx).unwrap_or_else(|| value.to_string()))
            .collect();
        frame.with_column(Series::new(column.name().clone(), filled))?;
        entries.push(AuditEntry::new(
            CleanAction::FillMissing,
            Some(name),
            missing,
            format!(
                "filled {missing} missing {} in '{name}' with '{value}'",
                plural(missing, "value")
            ),
        ));
    }
    Ok(Step { frame, entries })
}

/// Rewrites the string form of each cell with `rewrite`, counting real changes.
///
/// Null cells stay null. The resulting column is always text.
fn rewrite_text(column: &Column, rewrite: impl Fn(&str) -> String) -> (Series, usize) {
    let mut changed = 0usize;
    let values: Vec<Option<String>> = (0..column.len())
        .map(|idx| {
            cell_string(column, idx).map(|before| {
                let after = rewrite(&before);
                if after != before {
                    changed += 1;
                }
                after
            })
        })
        .collect();
    (Series::new(column.name().clone(), values), changed)
}

/// Trims, flattens newlines to single spaces, and lowercases text.
pub fn normalize_text_value(value: &str) -> String {
    value
        .trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .to_lowercase()
}

/// Normalizes the text of each named column.
pub fn normalize_text(df: &DataFrame, columns: &[String], options: CleanOptions) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for name in present_columns(df, columns, CleanAction::NormalizeText, options)? {
        let (series, changed) = rewrite_text(df.column(name)?, normalize_text_value);
        frame.with_column(series)?;
        if changed > 0 {
            entries.push(AuditEntry::new(
                CleanAction::NormalizeText,
                Some(name),
                changed,
                format!("normalized {changed} {} in '{name}'", plural(changed, "value")),
            ));
        }
    }
    Ok(Step { frame, entries })
}

/// Replaces markup in each named column with its visible text.
pub fn strip_markup(df: &DataFrame, columns: &[String], options: CleanOptions) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for name in present_columns(df, columns, CleanAction::StripMarkup, options)? {
        let (series, changed) = rewrite_text(df.column(name)?, strip_markup_text);
        frame.with_column(series)?;
        if changed > 0 {
            entries.push(AuditEntry::new(
                CleanAction::StripMarkup,
                Some(name),
                changed,
                format!(
                    "stripped markup from {changed} {} in '{name}'",
                    plural(changed, "value")
                ),
            ));
        }
    }
    Ok(Step { frame, entries })
}

/// Converts each named column to a number.
///
/// Integer columns keep their type. Float columns stay `Float64`. Any other
/// column is parsed and becomes `Int64` when every value is whole, `Float64`
/// otherwise. Null, NaN and unparseable cells become `0` and are counted as
/// replaced.
pub fn coerce_numeric(df: &DataFrame, columns: &[String], options: CleanOptions) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for name in present_columns(df, columns, CleanAction::CoerceNumeric, options)? {
        let column = df.column(name)?;
        let (series, replaced) = if column.dtype().is_integer() {
            let filled = column
                .as_materialized_series()
                .fill_null(FillNullStrategy::Zero)?;
            (filled, column.null_count())
        } else {
            let mut replaced = 0usize;
            let values: Vec<f64> = (0..column.len())
                .map(|idx| {
                    match column
                        .get(idx)
                        .ok()
                        .and_then(any_to_f64)
                        .filter(|v| !v.is_nan())
                    {
                        Some(v) => v,
                        None => {
                            replaced += 1;
                            0.0
                        }
                    }
                })
                .collect();
            let series = if column.dtype().is_float() {
                Series::new(column.name().clone(), values)
            } else {
                numeric_series(column.name().clone(), values)
            };
            (series, replaced)
        };
        frame.with_column(series)?;
        if replaced > 0 {
            entries.push(AuditEntry::new(
                CleanAction::CoerceNumeric,
                Some(name),
                replaced,
                format!(
                    "{replaced} {} in '{name}' could not be parsed as numbers, set to 0",
                    plural(replaced, "value")
                ),
            ));
        }
    }
    Ok(Step { frame, entries })
}

fn days_since_epoch(date: NaiveDate) -> Option<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from(date.signed_duration_since(epoch).num_days()).ok()
}

/// Converts each named column to `Date`.
///
/// Unparseable cells become null; only nulls introduced by the conversion
/// are counted.
pub fn coerce_datetime(df: &DataFrame, columns: &[String], options: CleanOptions) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for name in present_columns(df, columns, CleanAction::CoerceDatetime, options)? {
        let column = df.column(name)?;
        let converted = match column.dtype() {
            DataType::Date => continue,
            DataType::Datetime(_, _) => column.cast(&DataType::Date)?,
            _ => {
                let days: Vec<Option<i32>> = (0..column.len())
                    .map(|idx| {
                        cell_string(column, idx)
                            .and_then(|value| parse_date(&value))
                            .and_then(days_since_epoch)
                    })
                    .collect();
                Series::new(column.name().clone(), days)
                    .cast(&DataType::Date)?
                    .into()
            }
        };
        let introduced = converted.null_count().saturating_sub(column.null_count());
        frame.with_column(converted)?;
        if introduced > 0 {
            entries.push(AuditEntry::new(
                CleanAction::CoerceDatetime,
                Some(name),
                introduced,
                format!(
                    "{introduced} {} in '{name}' could not be parsed as dates, set to null",
                    plural(introduced, "value")
                ),
            ));
        }
    }
    Ok(Step { frame, entries })
}

/// Removes each named column.
pub fn drop_columns(df: &DataFrame, columns: &[String], options: CleanOptions) -> Result<Step> {
    let present = present_columns(df, columns, CleanAction::DropColumns, options)?;
    if present.is_empty() {
        return Ok(Step::unchanged(df));
    }
    let mut frame = df.clone();
    for name in &present {
        frame = frame.drop(name)?;
    }
    let count = present.len();
    Ok(Step {
        frame,
        entries: vec![AuditEntry::new(
            CleanAction::DropColumns,
            None,
            count,
            format!("dropped {count} {}: {}", plural(count, "column"), present.join(", ")),
        )],
    })
}

/// Renames columns by `(old, new)` pairs.
pub fn rename_columns(
    df: &DataFrame,
    renames: &[(String, String)],
    options: CleanOptions,
) -> Result<Step> {
    let mut frame = df.clone();
    let mut entries = Vec::new();
    for (old, new) in renames {
        if old == new {
            continue;
        }
        if frame.column(old).is_err() {
            if options.strict {
                return Err(CleanError::MissingColumn {
                    action: CleanAction::RenameColumns,
                    column: old.clone(),
                });
            }
            debug!(column = %old, "column not found, skipping rename");
            continue;
        }
        frame.rename(old, new.as_str().into())?;
        entries.push(AuditEntry::new(
            CleanAction::RenameColumns,
            Some(old.as_str()),
            1,
            format!("renamed '{old}' to '{new}'"),
        ));
    }
    Ok(Step { frame, entries })
}
