//! Catalog pipeline with explicit stages.
//!
//! 1. **Load**: read the four raw sources, failing before any work if one is missing
//! 2. **Clean**: run each source's cleaning recipe and keep its audit log
//! 3. **Normalize**: extract attribute domains, assign keys, build edges and vote facts
//! 4. **Assemble**: merge and project the fixed output tables
//! 5. **Persist**: hand every table to the store in one all-or-nothing write
//!
//! Nothing reaches the store unless every earlier stage succeeded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use catalog_clean::Cleaner;
use catalog_ingest::{LoadedSources, load_sources};
use catalog_model::AuditLog;
use catalog_output::{
    AssemblyInputs, MemoryStore, OutputTables, SqliteStore, TableStore, assemble, export_cleaned,
};
use catalog_transform::{Normalized, normalize};

use crate::config::{
    CATALOG_SOURCE, DESCRIPTIONS_SOURCE, MEDIA_SOURCE, PipelineConfig, TAG_VOTES_SOURCE,
};
use crate::recipes::{clean_catalog, clean_descriptions, clean_media, clean_tag_votes};

/// Switches of one run that do not belong in the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Build every table but write none.
    pub dry_run: bool,
    /// Write each cleaned source as `<name>_cleaned.csv` into this directory.
    pub export_cleaned: Option<PathBuf>,
    /// Write every audit log as one JSON document to this path.
    pub audit_report: Option<PathBuf>,
}

/// Row counts of one source before and after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns: usize,
    pub audit_entries: usize,
}

/// Shape of one output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub sources: Vec<SourceSummary>,
    pub tables: Vec<TableSummary>,
    /// Database written, or `None` on a dry run.
    pub database: Option<PathBuf>,
    pub exported: Vec<PathBuf>,
    pub audit_report: Option<PathBuf>,
}

/// Cleaned frames and audit logs, keyed by source name.
#[derive(Debug, Clone, Default)]
pub struct CleanedSources {
    pub frames: BTreeMap<String, DataFrame>,
    pub audits: BTreeMap<String, AuditLog>,
    pub summaries: Vec<SourceSummary>,
}

impl CleanedSources {
    pub fn frame(&self, name: &str) -> Result<&DataFrame> {
        self.frames
            .get(name)
            .ok_or_else(|| anyhow!("cleaned source '{name}' missing"))
    }
}

// ============================================================================
// Stage 1: Load
// ============================================================================

pub fn load(config: &PipelineConfig) -> Result<LoadedSources> {
    let _span = info_span!("load", data_dir = %config.data_dir.display()).entered();
    let start = Instant::now();
    let sources = load_sources(&config.source_set()).context("load sources")?;
    info!(
        sources = sources.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(sources)
}

// ============================================================================
// Stage 2: Clean
// ============================================================================

type Recipe = fn(&DataFrame, &PipelineConfig) -> Result<Cleaner>;

const RECIPES: [(&str, Recipe); 4] = [
    (CATALOG_SOURCE, clean_catalog),
    (DESCRIPTIONS_SOURCE, clean_descriptions),
    (MEDIA_SOURCE, clean_media),
    (TAG_VOTES_SOURCE, clean_tag_votes),
];

pub fn clean(sources: &LoadedSources, config: &PipelineConfig) -> Result<CleanedSources> {
    let mut cleaned = CleanedSources::default();
    for (name, recipe) in RECIPES {
        let _span = info_span!("clean", source = name).entered();
        let start = Instant::now();
        let raw = sources.get(name)?;
        let cleaner = recipe(raw, config).with_context(|| format!("clean {name}"))?;
        cleaner.print_audit_summary(name);
        let (frame, log) = cleaner.finish();
        info!(
            rows_in = raw.height(),
            rows_out = frame.height(),
            duration_ms = start.elapsed().as_millis(),
            "clean complete"
        );
        cleaned.summaries.push(SourceSummary {
            name: name.to_string(),
            rows_in: raw.height(),
            rows_out: frame.height(),
            columns: frame.width(),
            audit_entries: log.len(),
        });
        cleaned.frames.insert(name.to_string(), frame);
        cleaned.audits.insert(name.to_string(), log);
    }
    Ok(cleaned)
}

// ============================================================================
// Stage 3: Normalize
// ============================================================================

pub fn normalize_stage(cleaned: &CleanedSources, config: &PipelineConfig) -> Result<Normalized> {
    let _span = info_span!("normalize").entered();
    let start = Instant::now();
    let normalized = normalize(
        cleaned.frame(CATALOG_SOURCE)?,
        Some(cleaned.frame(TAG_VOTES_SOURCE)?),
        &config.normalize_options(),
    )
    .context("normalize catalog")?;
    info!(
        domains = normalized.lookups.len(),
        votes = normalized.votes.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(normalized)
}

// ============================================================================
// Stage 4: Assemble
// ============================================================================

pub fn assemble_stage(
    cleaned: &CleanedSources,
    normalized: &Normalized,
    config: &PipelineConfig,
) -> Result<OutputTables> {
    let _span = info_span!("assemble").entered();
    let start = Instant::now();
    let inputs = AssemblyInputs {
        catalog: cleaned.frame(CATALOG_SOURCE)?,
        descriptions: cleaned.frame(DESCRIPTIONS_SOURCE)?,
        media: cleaned.frame(MEDIA_SOURCE)?,
    };
    let frames = normalized
        .frames(&config.item_id_column)
        .context("build normalized tables")?;
    let tables =
        assemble(&inputs, frames, &config.assembly_options()).context("assemble tables")?;
    info!(
        tables = tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "assemble complete"
    );
    Ok(tables)
}

// ============================================================================
// Stage 5: Persist
// ============================================================================

pub fn persist(tables: &OutputTables, store: &mut dyn TableStore) -> Result<()> {
    let _span = info_span!("persist").entered();
    let start = Instant::now();
    store.replace_tables(tables).context("write tables")?;
    info!(
        tables = tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "persist complete"
    );
    Ok(())
}

/// Writes every audit log as a JSON object keyed by source name.
pub fn write_audit_report(audits: &BTreeMap<String, AuditLog>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(audits).context("serialize audit report")?;
    fs::write(path, json).with_context(|| format!("write audit report {}", path.display()))?;
    Ok(())
}

/// Runs every stage against `config`.
pub fn run_pipeline(config: &PipelineConfig, options: &RunOptions) -> Result<RunReport> {
    let sources = load(config)?;
    let cleaned = clean(&sources, config)?;
    drop(sources);

    let mut report = RunReport {
        sources: cleaned.summaries.clone(),
        ..RunReport::default()
    };

    if let Some(dir) = &options.export_cleaned {
        for (name, frame) in &cleaned.frames {
            let path = export_cleaned(dir, name, frame)
                .with_context(|| format!("export cleaned {name}"))?;
            report.exported.push(path);
        }
    }
    if let Some(path) = &options.audit_report {
        write_audit_report(&cleaned.audits, path)?;
        report.audit_report = Some(path.clone());
    }

    let normalized = normalize_stage(&cleaned, config)?;
    let tables = assemble_stage(&cleaned, &normalized, config)?;
    report.tables = tables
        .iter()
        .map(|(name, frame)| TableSummary {
            name: name.to_string(),
            rows: frame.height(),
            columns: frame.width(),
        })
        .collect();

    if options.dry_run {
        let mut store = MemoryStore::new();
        persist(&tables, &mut store)?;
        info!("dry run: database left untouched");
    } else {
        if let Some(parent) = config.database.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let mut store = SqliteStore::open(&config.database)
            .with_context(|| format!("open database {}", config.database.display()))?;
        persist(&tables, &mut store)?;
        report.database = Some(config.database.clone());
    }
    Ok(report)
}
