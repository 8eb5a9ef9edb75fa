//! CLI argument definitions for `kgs-specimen`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use kgs_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "kgs-specimen",
    version,
    about = "Translate studied specimen into the specimen hierarchy of a dataset document",
    long_about = "Translate a JSON list of studied specimen, as returned by the knowledge graph \
                  query, into the hierarchy, legend and overview of a dataset search document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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
    /// Translate a specimen list and print the resulting document.
    Hierarchy(HierarchyArgs),

    /// List the specimen kinds with their types and colors.
    Kinds(KindsArgs),
}

#[derive(Parser)]
pub struct HierarchyArgs {
    /// JSON file holding the list of studied specimen.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Id of the dataset version being translated.
    ///
    /// Related products with this id are not listed as other publications.
    #[arg(long = "dataset-version", value_name = "ID")]
    pub dataset_version: Option<String>,

    /// JSON file with hierarchy options (root title and color, kind table).
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Write the document to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print compact JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Print summary tables instead of the document.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct KindsArgs {
    /// JSON file with hierarchy options whose kind table should be listed.
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
