//! CLI argument definitions for the small populations publisher.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "small-pops",
    version,
    about = "Census small populations publisher - build tidy data and metadata sheets",
    long_about = "Combine raw census small population extracts into tidy per-dataset\n\
                  data sheets with fully resolved metadata, ready for publication.\n\
                  Metadata is joined from the cantabular reference catalogs and the\n\
                  commissioned table specification."
)]
pub struct Cli {
    /// Directory holding the cantabular reference catalog CSVs.
    #[arg(value_name = "CATALOG_DIR")]
    pub catalog_dir: PathBuf,

    /// Directory of raw area-prefixed extract CSVs (default: <CATALOG_DIR>/extracts).
    #[arg(long = "extracts-dir", value_name = "DIR")]
    pub extracts_dir: Option<PathBuf>,

    /// Directory of commissioned table extract CSVs.
    #[arg(long = "commissioned-dir", value_name = "DIR")]
    pub commissioned_dir: Option<PathBuf>,

    /// CSV export of the commission specification sheet
    /// (default: <CATALOG_DIR>/commission_spec.csv).
    #[arg(long = "commission-spec", value_name = "PATH")]
    pub commission_spec: Option<PathBuf>,

    /// Output directory for generated files (default: <CATALOG_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Release date stamped into every metadata sheet, dd/mm/yyyy
    /// (default: today).
    #[arg(long = "release-date", value_name = "DATE")]
    pub release_date: Option<String>,

    /// Resolve and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
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
