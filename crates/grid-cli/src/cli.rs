//! CLI argument definitions for the grid remapper.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "grid-remap",
    version,
    about = "Remap categorical identifiers in reservoir grid files",
    long_about = "Rewrite property blocks of a block-structured grid file.\n\n\
                  Category names are read from the framed comments preceding the\n\
                  dictionary block (SATNUM by default). Each mapped block's values\n\
                  are replaced by looking up the cell's identifier in that block and\n\
                  translating the category through the mapping file."
)]
pub struct Cli {
    /// Grid file to read.
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Mapping file with [category] sections and BLOCK=value lines.
    #[arg(value_name = "MAP_FILE")]
    pub map: PathBuf,

    /// Output grid file (must not exist).
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Block whose preamble declares the identifier dictionary.
    #[arg(long = "block-name", value_name = "NAME", default_value = grid_model::DEFAULT_BLOCK_NAME)]
    pub block_name: String,

    /// Value written for identifiers without a mapping.
    #[arg(long = "sentinel", value_name = "VALUE", default_value = grid_model::DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Omit rows whose value count differs from the dictionary row
    /// instead of copying them unchanged.
    #[arg(long = "drop-mismatched-rows")]
    pub drop_mismatched_rows: bool,

    /// Report mapping file lines that are not `attribute=value` pairs as warnings.
    #[arg(long = "warn-malformed")]
    pub warn_malformed: bool,

    /// Write a JSON run summary to this path.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
