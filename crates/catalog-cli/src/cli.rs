//! CLI argument definitions for the catalog normalizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-normalizer",
    version,
    about = "Normalize a denormalized game catalog into a relational SQLite schema",
    long_about = "Clean the raw catalog CSV sources, split multi-valued attributes into\n\
                  lookup and junction tables, reshape the tag vote matrix, and write\n\
                  the normalized schema to SQLite in one all-or-nothing step."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file (defaults apply when omitted).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean, normalize and store the catalog.
    Run(RunArgs),

    /// Profile the raw sources without changing anything.
    Inspect(InspectArgs),

    /// Search stored items by name.
    Search(SearchArgs),

    /// Show everything stored about one item.
    Show(ShowArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the raw CSV sources.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Destination SQLite database.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Fail when a cleaning step names an absent column.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Build every table without writing the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write each cleaned source as <name>_cleaned.csv into DIR.
    #[arg(long = "export-cleaned", value_name = "DIR")]
    pub export_cleaned: Option<PathBuf>,

    /// Write the cleaning audit logs as JSON to PATH.
    #[arg(long = "audit-report", value_name = "PATH")]
    pub audit_report: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Directory holding the raw CSV sources.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Sample values shown per column.
    #[arg(long = "samples", default_value_t = 3)]
    pub samples: usize,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to look for in item names.
    #[arg(value_name = "TERM")]
    pub term: String,

    /// SQLite database to query.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Maximum number of results.
    #[arg(long = "limit", default_value_t = catalog_output::DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Item identifier.
    #[arg(value_name = "APPID")]
    pub appid: i64,

    /// SQLite database to query.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
