//! crates/rr_pipeline/src/lib.rs
//! Orchestration for the report engine: request → assessment → document →
//! persisted artifact.
//!
//! Inputs:
//! - A `ReportRequest` (from `rr_io::loader`), carrying either a finished
//!   assessment or raw answers.
//! - `ReportOptions` (portfolio value and assessment date).
//!
//! Rules in this layer:
//! - All file I/O goes through `rr_io` (canonical JSON, atomic writes, hashing).
//! - Generation failures are caught here, logged once, and surfaced as a single
//!   user-facing `GenerationError`.
//! - Persistence is all-or-nothing: a failed run leaves no output file.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use rr_algo::questions::question_bank;
use rr_algo::scoring::{calculate_score, unknown_answers};
use rr_core::{Assessment, CoreError};
use rr_io::canonical_json::write_canonical_file;
use rr_io::loader::ReportRequest;
use rr_io::{try_sha256_hex, IoError};
use rr_report::{generate_report, Document, LayoutError, ReportData, ReportOptions};

// ------------------------------------ Errors ------------------------------------

/// The one failure a user sees when the document cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to generate PDF report. Please try the text report instead or contact support.")]
pub struct GenerationError {
    /// Underlying layout failure, kept for logs and diagnostics.
    pub cause: String,
}

/// Single error surface for the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input bundle is unusable (shape, answer indices, out-of-range values).
    #[error("validation: {0}")]
    Validate(String),
    /// Reading inputs or persisting artifacts failed.
    #[error("io: {0}")]
    Io(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Json { .. } | IoError::Invalid(_) => PipelineError::Validate(e.to_string()),
            IoError::Path(_) | IoError::Hash(_) => PipelineError::Io(e.to_string()),
        }
    }
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Validate(e.to_string())
    }
}

/// Bad caller input stays a validation error; anything else the layout engine
/// reports is a generation failure.
fn from_layout(e: LayoutError) -> PipelineError {
    match e {
        LayoutError::InvalidInput(m) => PipelineError::Validate(m.to_string()),
        other => {
            error!(error = %other, "report generation failed");
            PipelineError::Generation(GenerationError { cause: other.to_string() })
        }
    }
}

// ------------------------------------ Types ------------------------------------

/// Artifact flavour written by `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Paginated document as canonical JSON.
    #[default]
    Json,
    /// Plain-text fallback report.
    Text,
}

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "report.json",
            OutputFormat::Text => "report.txt",
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub assessment: Assessment,
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the bytes written to `path`.
    pub sha256: String,
    /// Page count for document output; `None` for text.
    pub pages: Option<usize>,
}

// ---------------------------------- Public API ----------------------------------

/// Use the request's assessment, or score its raw answers.
pub fn resolve_assessment(request: &ReportRequest) -> Result<Assessment, PipelineError> {
    if let Some(a) = &request.assessment {
        return Ok(a.clone());
    }
    let answers = request.answers.as_deref().unwrap_or_default();
    for skipped in unknown_answers(question_bank(), answers) {
        warn!(question = %skipped.question_id, "ignoring answer to unknown question");
    }
    let assessment = calculate_score(answers)?;
    debug!(score = assessment.score, category = %assessment.risk_level, "scored raw answers");
    Ok(assessment)
}

/// Assemble the generator's input from a request.
pub fn report_data(request: &ReportRequest) -> Result<ReportData, PipelineError> {
    Ok(ReportData {
        assessment: resolve_assessment(request)?,
        profile: request.profile.clone(),
        contact_info: request.contact_info.clone(),
        answers: request.answers.clone(),
    })
}

/// Generate the paginated document in memory.
pub fn generate(data: &ReportData, options: &ReportOptions) -> Result<Document, PipelineError> {
    generate_report(data, options).map_err(from_layout)
}

/// Generate the plain-text report in memory.
#[cfg(feature = "text")]
pub fn generate_text(data: &ReportData, options: &ReportOptions) -> Result<String, PipelineError> {
    rr_report::generate_text_report(data, options).map_err(from_layout)
}

/// Run the whole pipeline and write `report.json` / `report.txt` into `out_dir`.
pub fn run(
    request: &ReportRequest,
    options: &ReportOptions,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<PipelineOutputs, PipelineError> {
    let data = report_data(request)?;
    let path = out_dir.join(format.file_name());

    let (bytes, pages) = match format {
        OutputFormat::Json => {
            let doc = generate(&data, options)?;
            let bytes = write_canonical_file(&path, &doc)?;
            (bytes, Some(doc.page_count()))
        }
        OutputFormat::Text => (write_text(&data, options, &path)?, None),
    };

    let sha256 = try_sha256_hex(&bytes)?;
    info!(path = %path.display(), sha256 = %sha256, "report written");
    Ok(PipelineOutputs { assessment: data.assessment, path, sha256, pages })
}

/// Load a bundle from disk, then `run`.
pub fn run_from_path(
    input: &Path,
    options: &ReportOptions,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<PipelineOutputs, PipelineError> {
    let request = rr_io::loader::load_request(input)?;
    run(&request, options, out_dir, format)
}

// ------------------------------ (internal helpers) ------------------------------

#[cfg(feature = "text")]
fn write_text(data: &ReportData, options: &ReportOptions, path: &Path) -> Result<Vec<u8>, PipelineError> {
    let text = generate_text(data, options)?;
    rr_io::canonical_json::write_atomic(path, text.as_bytes())?;
    Ok(text.into_bytes())
}

#[cfg(not(feature = "text"))]
fn write_text(_data: &ReportData, _options: &ReportOptions, _path: &Path) -> Result<Vec<u8>, PipelineError> {
    Err(PipelineError::Validate("text output not enabled (build with feature `text`)".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rr_core::RiskCategory;
    use rr_io::loader::parse_request;
    use std::fs;

    fn options() -> ReportOptions {
        ReportOptions::on(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    fn moderate_request() -> ReportRequest {
        parse_request(
            r#"{
                "assessment": {"score": 50, "risk_level": "Moderate", "recommendations": ["Stay diversified"]},
                "contact_info": {"first_name": "Ada", "last_name": "Byron", "email": "ada@example.com"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn raw_answers_are_scored() {
        let req = parse_request(
            r#"{"answers": [{"question_id": "game_show", "value": 4}, {"question_id": "zzz", "value": 1}]}"#,
        )
        .unwrap();
        let a = resolve_assessment(&req).unwrap();
        assert_eq!(a.score, 9);
        assert_eq!(a.risk_level, RiskCategory::Conservative);
    }

    #[test]
    fn free_text_ids_are_skipped_not_rejected() {
        let req = parse_request(
            r#"{"answers": [{"question_id": "game_show", "value": 4}, {"question_id": "legacy question 7", "value": 1}]}"#,
        )
        .unwrap();
        assert_eq!(resolve_assessment(&req).unwrap().score, 9);
    }

    #[test]
    fn mismatched_category_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = moderate_request();
        if let Some(a) = req.assessment.as_mut() {
            a.score = 10;
        }
        let err = run(&req, &options(), dir.path(), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, PipelineError::Validate(_)));
        assert!(!dir.path().join("report.json").exists());
    }

    #[test]
    fn out_of_range_answer_is_a_validation_error() {
        let req = parse_request(r#"{"answers": [{"question_id": "game_show", "value": 99}]}"#).unwrap();
        assert!(matches!(resolve_assessment(&req), Err(PipelineError::Validate(_))));
    }

    #[test]
    fn given_assessment_wins_over_answers() {
        let mut req = moderate_request();
        req.answers = Some(vec![]);
        assert_eq!(resolve_assessment(&req).unwrap().score, 50);
    }

    #[test]
    fn json_run_writes_hashed_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(&moderate_request(), &options(), dir.path(), OutputFormat::Json).unwrap();
        assert_eq!(out.path, dir.path().join("report.json"));
        let bytes = fs::read(&out.path).unwrap();
        assert_eq!(out.sha256, try_sha256_hex(&bytes).unwrap());
        assert!(out.pages.unwrap() >= 2);
        assert_eq!(out.assessment.risk_level, RiskCategory::Moderate);
    }

    #[test]
    fn runs_are_reproducible() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let x = run(&moderate_request(), &options(), a.path(), OutputFormat::Json).unwrap();
        let y = run(&moderate_request(), &options(), b.path(), OutputFormat::Json).unwrap();
        assert_eq!(x.sha256, y.sha256);
    }

    #[test]
    fn text_run_writes_plain_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(&moderate_request(), &options(), dir.path(), OutputFormat::Text).unwrap();
        let text = fs::read_to_string(&out.path).unwrap();
        assert!(text.contains("Moderate"));
        assert!(text.contains("Ada Byron"));
        assert_eq!(out.pages, None);
    }

    #[test]
    fn bad_portfolio_value_is_validation_not_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options();
        opts.portfolio_value = f64::NAN;
        let err = run(&moderate_request(), &opts, dir.path(), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, PipelineError::Validate(_)));
        assert!(!dir.path().join("report.json").exists());
    }

    #[test]
    fn layout_failure_surfaces_generation_error() {
        let err = from_layout(LayoutError::TableShape { row: 1, expected: 5, found: 4 });
        match err {
            PipelineError::Generation(g) => {
                assert!(g.to_string().starts_with("Failed to generate PDF report."));
                assert!(g.cause.contains("row 1"));
            }
            other => panic!("expected generation error, got {other:?}"),
        }
    }

    #[test]
    fn failed_persistence_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        // report.json is occupied by a directory, so the final rename fails.
        fs::create_dir(dir.path().join("report.json")).unwrap();
        let err = run(&moderate_request(), &options(), dir.path(), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names, vec![std::ffi::OsString::from("report.json")]);
        assert!(dir.path().join("report.json").is_dir());
    }

    #[test]
    fn missing_input_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_from_path(&dir.path().join("nope.json"), &options(), dir.path(), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
