//! CLI argument definitions for the quality indicator tracker.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "qi-tracker",
    version,
    about = "Quality indicator tracker - evaluate and record indicator submissions",
    long_about = "Record quality-indicator data entries against a mapping catalog.\n\n\
                  Computes percentages from raw inputs, classifies results against\n\
                  benchmark thresholds, and stores submissions for listing, statistics\n\
                  and CSV export."
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
    /// List the indicator mappings in a catalog.
    Mappings(CatalogArgs),

    /// Evaluate inputs against a mapping without recording anything.
    Preview(PreviewArgs),

    /// Evaluate inputs and record a submission.
    Submit(SubmitArgs),

    /// List recorded submissions.
    List(StoreArgs),

    /// Aggregate recorded submissions into per-indicator statistics.
    Stats(StatsArgs),

    /// Export recorded submissions as CSV.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Path to the mapping catalog JSON file.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Directory submissions are stored under.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Path to the mapping catalog JSON file.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Mapping id or indicator code to evaluate against.
    #[arg(long = "mapping", value_name = "ID")]
    pub mapping: String,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Print the result as JSON instead of text.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Path to the mapping catalog JSON file.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Directory submissions are stored under.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Mapping id or indicator code to submit against.
    #[arg(long = "mapping", value_name = "ID")]
    pub mapping: String,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Reporting date of the entry (YYYY-MM-DD).
    #[arg(long = "entry-date", value_name = "DATE")]
    pub entry_date: NaiveDate,

    /// Explanation; required when the result is non-compliant.
    #[arg(long = "remarks", value_name = "TEXT")]
    pub remarks: Option<String>,
}

/// Raw numeric inputs; which fields apply depends on the mapping's
/// formula type.
#[derive(Args)]
pub struct InputArgs {
    /// Numerator value (standard formula types).
    #[arg(long = "numerator", value_name = "NUMBER")]
    pub numerator: Option<f64>,

    /// Denominator value (standard formula types).
    #[arg(long = "denominator", value_name = "NUMBER")]
    pub denominator: Option<f64>,

    /// Custom formula variable, repeatable, e.g. --var A=50 --var B=10.
    #[arg(long = "var", value_name = "NAME=NUMBER", value_parser = parse_var)]
    pub vars: Vec<(String, f64)>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Directory submissions are stored under.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Restrict to entries from this year.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Restrict to entries from this month (1-12).
    #[arg(long = "month", value_name = "MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Restrict to one department (case-insensitive).
    #[arg(long = "department", value_name = "NAME")]
    pub department: Option<String>,

    /// Print the monthly series for one indicator code instead of the
    /// per-indicator summary.
    #[arg(long = "monthly", value_name = "INDICATOR")]
    pub monthly: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory submissions are stored under.
    #[arg(long = "store", value_name = "DIR")]
    pub store: PathBuf,

    /// Output CSV path (stdout when omitted).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse a `NAME=NUMBER` variable binding.
fn parse_var(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=NUMBER, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty variable name in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_var_bindings() {
        assert_eq!(parse_var("A=50").unwrap(), ("A".to_string(), 50.0));
        assert_eq!(parse_var(" B = 2.5 ").unwrap(), ("B".to_string(), 2.5));
        assert!(parse_var("A").is_err());
        assert!(parse_var("=1").is_err());
        assert!(parse_var("A=ten").is_err());
    }
}
