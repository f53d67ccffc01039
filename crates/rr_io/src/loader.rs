//! Loader: read the local JSON input bundle (and bare answer files) into typed
//! requests for the pipeline. No network I/O; no scoring here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rr_core::{Answer, Assessment, ContactInfo, FinancialProfile, RiskCategory};

use crate::IoError;

/// Input bundle for one report.
///
/// Either a finished `assessment` or raw `answers` must be present; when both
/// are given the assessment is used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub assessment: Option<Assessment>,
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
    #[serde(default)]
    pub profile: Option<FinancialProfile>,
    #[serde(default)]
    pub contact_info: ContactInfo,
}

/// Answer files come either as a bare array or wrapped in `{"answers": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Bare(Vec<Answer>),
    Wrapped { answers: Vec<Answer> },
}

fn read_text(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}

/// Parse and shape-check a bundle.
pub fn parse_request(text: &str) -> Result<ReportRequest, IoError> {
    let req: ReportRequest = serde_json::from_str(text)?;
    if req.assessment.is_none() && req.answers.is_none() {
        return Err(IoError::Invalid(
            "bundle needs either `assessment` or `answers`".into(),
        ));
    }
    if let Some(a) = &req.assessment {
        if a.score > 100 {
            return Err(IoError::Invalid(format!("assessment score {} above 100", a.score)));
        }
        let expected = RiskCategory::for_score(a.score);
        if a.risk_level != expected {
            return Err(IoError::Invalid(format!(
                "assessment score {} is {expected}, not {}",
                a.score, a.risk_level
            )));
        }
    }
    Ok(req)
}

pub fn load_request(path: &Path) -> Result<ReportRequest, IoError> {
    parse_request(&read_text(path)?)
}

pub fn load_answers(path: &Path) -> Result<Vec<Answer>, IoError> {
    let file: AnswerFile = serde_json::from_str(&read_text(path)?)?;
    Ok(match file {
        AnswerFile::Bare(a) | AnswerFile::Wrapped { answers: a } => a,
    })
}
