// crates/rr_cli/src/args.rs
//
// Offline CLI argument surface (types, value parsers, validation).
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - `generate` needs an existing --input bundle; --out may not exist yet
// - --date is YYYY-MM-DD; omitted means today (local)
// - --portfolio-value must be finite and > 0

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rr",
    disable_help_subcommand = true,
    about = "Offline risk-assessment scoring and report generation"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Only log warnings and errors (RUST_LOG still wins when set).
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate the report for one input bundle.
    Generate(GenerateArgs),
    /// Score a questionnaire and print the assessment as JSON.
    Score {
        /// Answers JSON: `[{question_id, value}]` or `{"answers": [...]}`.
        #[arg(long)]
        answers: PathBuf,
    },
    /// Print the built-in question bank as JSON.
    Questions,
}

#[derive(Debug, clap::Args, Clone)]
pub struct GenerateArgs {
    /// Input bundle JSON (assessment or answers, contact info, optional profile).
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Artifact to write.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Assessment date printed in the report (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Sample portfolio value the projections are expressed against.
    #[arg(long, value_parser = parse_portfolio_value)]
    pub portfolio_value: Option<f64>,

    /// Write the plain-text report if the document cannot be generated.
    #[arg(long)]
    pub text_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| format!("expected YYYY-MM-DD, got {s:?}"))
}

pub fn parse_portfolio_value(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|_| format!("not a number: {s:?}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err("portfolio value must be finite and greater than zero".into())
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_local_file(p: &Path) -> Result<(), CliError> {
    ensure_local_path(p)?;
    if p.is_file() {
        Ok(())
    } else {
        Err(CliError::NotFound(p.display().to_string()))
    }
}

/// Path checks clap cannot express.
pub fn validate(args: &Args) -> Result<(), CliError> {
    match &args.command {
        Command::Generate(g) => {
            ensure_local_file(&g.input)?;
            ensure_local_path(&g.out)
        }
        Command::Score { answers } => ensure_local_file(answers),
        Command::Questions => Ok(()),
    }
}
