use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info_span;

use catalog_cli::config::PipelineConfig;
use catalog_cli::pipeline::{RunOptions, RunReport, run_pipeline};
use catalog_ingest::{FrameProfile, load_sources, profile_frame};
use catalog_output::{ItemDetail, SearchHit, SqliteStore, item_detail, search_items};

use crate::cli::{InspectArgs, RunArgs, SearchArgs, ShowArgs};

pub fn run_run(config: PipelineConfig, args: &RunArgs) -> Result<RunReport> {
    let mut config = config;
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(path) = &args.database {
        config.database.clone_from(path);
    }
    config.strict |= args.strict;

    let options = RunOptions {
        dry_run: args.dry_run,
        export_cleaned: args.export_cleaned.clone(),
        audit_report: args.audit_report.clone(),
    };
    let _span = info_span!("run", data_dir = %config.data_dir.display()).entered();
    run_pipeline(&config, &options)
}

pub fn run_inspect(config: PipelineConfig, args: &InspectArgs) -> Result<Vec<FrameProfile>> {
    let mut config = config;
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    let sources = load_sources(&config.source_set()).context("load sources")?;
    Ok(sources
        .iter()
        .map(|(name, frame)| profile_frame(name, frame, args.samples))
        .collect())
}

fn open_existing(config: &PipelineConfig, database: Option<&PathBuf>) -> Result<SqliteStore> {
    let path: &Path = database.unwrap_or(&config.database);
    if !path.is_file() {
        bail!(
            "database not found: {} (run the pipeline first)",
            path.display()
        );
    }
    SqliteStore::open(path).with_context(|| format!("open database {}", path.display()))
}

pub fn run_search(config: &PipelineConfig, args: &SearchArgs) -> Result<Vec<SearchHit>> {
    let store = open_existing(config, args.database.as_ref())?;
    search_items(store.connection(), &args.term, args.limit).context("search items")
}

pub fn run_show(config: &PipelineConfig, args: &ShowArgs) -> Result<Option<ItemDetail>> {
    let store = open_existing(config, args.database.as_ref())?;
    item_detail(store.connection(), args.appid).context("load item")
}
