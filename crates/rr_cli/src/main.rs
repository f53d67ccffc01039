// crates/rr_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, and the three subcommands.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const GENERATION: i32 = 5;
}

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use args::{Args, Command, Format, GenerateArgs};
use rr_io::loader::{load_answers, load_request, ReportRequest};
use rr_pipeline::{OutputFormat, PipelineError, PipelineOutputs};
use rr_report::ReportOptions;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad flags, unusable bundle, out-of-range answers
    Validation(String),
    /// Read/write/path errors
    Io(String),
    /// Document could not be produced
    Generation(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) | MainError::Generation(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet);

    if let Err(e) = args::validate(&args) {
        eprintln!("rr: error: {e}");
        return ExitCode::from(exitcodes::VALIDATION as u8);
    }

    let rc = match dispatch(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("rr: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(args: &Args) -> Result<(), MainError> {
    match &args.command {
        Command::Generate(g) => generate(g),
        Command::Score { answers } => score(answers),
        Command::Questions => print_json(rr_algo::questions::question_bank()),
    }
}

fn generate(g: &GenerateArgs) -> Result<(), MainError> {
    let request = load_request(&g.input).map_err(|e| map_pipeline_err(e.into()))?;

    let mut options = g.date.map(ReportOptions::on).unwrap_or_default();
    if let Some(v) = g.portfolio_value {
        options.portfolio_value = v;
    }

    let format = match g.format {
        Format::Json => OutputFormat::Json,
        Format::Text => OutputFormat::Text,
    };

    let outs = match rr_pipeline::run(&request, &options, &g.out, format) {
        Err(PipelineError::Generation(e)) if g.text_fallback && format == OutputFormat::Json => {
            warn!(cause = %e.cause, "document generation failed; writing text report");
            rr_pipeline::run(&request, &options, &g.out, OutputFormat::Text).map_err(map_pipeline_err)?
        }
        other => other.map_err(map_pipeline_err)?,
    };

    print_outputs(&outs);
    Ok(())
}

fn score(answers: &std::path::Path) -> Result<(), MainError> {
    let answers = load_answers(answers).map_err(|e| map_pipeline_err(e.into()))?;
    let request = ReportRequest {
        assessment: None,
        answers: Some(answers),
        profile: None,
        contact_info: Default::default(),
    };
    let assessment = rr_pipeline::resolve_assessment(&request).map_err(map_pipeline_err)?;
    print_json(&assessment)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), MainError> {
    let s = serde_json::to_string_pretty(value).map_err(|e| MainError::Io(format!("serialize: {e}")))?;
    println!("{s}");
    Ok(())
}

/// `sha256  path`, one line, like `sha256sum`.
fn print_outputs(outs: &PipelineOutputs) {
    println!("{}  {}", outs.sha256, outs.path.display());
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Generation(_) => GENERATION,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Validate(m) => MainError::Validation(m),
        PipelineError::Io(m) => MainError::Io(m),
        PipelineError::Generation(g) => MainError::Generation(g.to_string()),
    }
}
