//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hsn",
    version,
    about = "Validate HSN codes and suggest codes for product descriptions",
    long_about = "Validate Harmonized System of Nomenclature codes against a reference table\n\
                  and suggest codes for free-text product descriptions.\n\n\
                  The reference table is a CSV export with an HSNCode column and a\n\
                  Description column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Reference table CSV (overrides HSN_TABLE_PATH and the config file).
    #[arg(long = "table", value_name = "PATH", global = true)]
    pub table: Option<PathBuf>,

    /// Config file (default: $HSN_CONFIG when set).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results.
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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
    /// Validate one or more codes. Exits with status 1 if any is invalid.
    Validate(ValidateArgs),

    /// Suggest codes for a product description.
    Suggest(SuggestArgs),

    /// Show a code's description and its full ancestry.
    Lookup(LookupArgs),

    /// Summarize the loaded reference table.
    Stats,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Codes to validate, checked exactly as given.
    #[arg(value_name = "CODE", required = true, allow_hyphen_values = true)]
    pub codes: Vec<String>,

    /// Ancestors reported for valid codes.
    #[arg(long = "hierarchy", value_enum)]
    pub hierarchy: Option<HierarchyArg>,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Description words; joined with single spaces.
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Maximum number of suggestions.
    #[arg(long = "limit", short = 'n', value_name = "N")]
    pub limit: Option<usize>,

    /// Suggestions must score strictly above this (0-100).
    #[arg(long = "min-confidence", value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_confidence: Option<u8>,

    /// Similarity algorithm.
    #[arg(long = "scorer", value_enum)]
    pub scorer: Option<ScorerArg>,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Code to look up.
    #[arg(value_name = "CODE", allow_hyphen_values = true)]
    pub code: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HierarchyArg {
    /// Only the two-digit chapter.
    Placeholder,
    /// Every registered 2/4/6 digit ancestor.
    Full,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScorerArg {
    TokenSet,
    JaroWinkler,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Off,
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
