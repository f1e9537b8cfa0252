//! CLI argument definitions for the XML export publisher.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "xpub",
    version,
    about = "XML export publisher - fuse, validate and transform XML exports",
    long_about = "Fuse a per-run XML export with the persistently stored\n\
                  configuration documents, validate its project references\n\
                  against the project registry, and run the transformation\n\
                  engine to produce a downloadable result archive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Run the full pipeline on one export file.
    Run(RunArgs),

    /// List the configuration slots fused into every run.
    Slots,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the per-run XML export.
    #[arg(value_name = "EXPORT")]
    pub export: PathBuf,

    /// Transformation stylesheet handed to the engine.
    #[arg(long, value_name = "PATH")]
    pub stylesheet: PathBuf,

    /// Directory holding the configuration documents (presentation.xml,
    /// projects.xml, legal_mentions.xml, about.xml).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Static assets copied into the archive under output/statics/.
    #[arg(long = "statics-dir", value_name = "DIR")]
    pub statics_dir: Option<PathBuf>,

    /// External XSLT processor executable.
    #[arg(long, value_name = "BIN", default_value = "xsltproc")]
    pub engine: PathBuf,

    /// Base directory for run workspaces (default: the system temp dir).
    #[arg(long = "workspace-dir", value_name = "DIR")]
    pub workspace_dir: Option<PathBuf>,

    /// Discard the run workspace after printing the result instead of
    /// retaining the archive for later retrieval.
    #[arg(long)]
    pub discard: bool,
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
