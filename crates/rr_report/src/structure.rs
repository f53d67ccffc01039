//! crates/rr_report/src/structure.rs
//! Report inputs and the derived report model.
//! Everything the renderers print is computed here once; renderers only lay
//! it out. Deterministic for fixed inputs and date.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use rr_algo::stress::{historical_context, key_vulnerabilities, mitigation_strategies, HistoricalEvent};
use rr_algo::{allocate, classify, project, worst_case};
use rr_core::{
    Answer, AssetAllocation, Assessment, ContactInfo, FinancialProfile, StressScenario,
};

use crate::LayoutError;

/// Sample portfolio the projections are expressed against.
pub const DEFAULT_PORTFOLIO_VALUE: f64 = 100_000.0;

/// Everything the caller knows about one submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub assessment: Assessment,
    #[serde(default)]
    pub profile: Option<FinancialProfile>,
    #[serde(default)]
    pub contact_info: ContactInfo,
    /// Raw answers, carried for the record; the assessment is authoritative.
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
}

/// Render-time settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportOptions {
    pub portfolio_value: f64,
    pub assessment_date: NaiveDate,
}

impl ReportOptions {
    pub fn on(assessment_date: NaiveDate) -> Self {
        Self { portfolio_value: DEFAULT_PORTFOLIO_VALUE, assessment_date }
    }
}

impl Default for ReportOptions {
    /// Sample portfolio, dated today (local time).
    fn default() -> Self {
        Self::on(Local::now().date_naive())
    }
}

/// Derived, render-ready view of one report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    pub assessment: Assessment,
    /// `M/D/YYYY`
    pub assessment_date: String,
    pub portfolio_value: f64,
    pub allocation: AssetAllocation,
    pub scenarios: Vec<StressScenario>,
    pub worst_case: f64,
    pub historical: Vec<HistoricalEvent>,
    pub vulnerabilities: [&'static str; 3],
    pub mitigations: [&'static str; 3],
    pub contact: ContactInfo,
    pub profile: Option<FinancialProfile>,
}

impl ReportModel {
    /// Dollar change at the worst-case scenario.
    pub fn worst_case_dollars(&self) -> f64 {
        self.portfolio_value * self.worst_case / 100.0
    }
}

/// Validate inputs and derive allocation, scenarios and insights.
pub fn build_report_model(data: &ReportData, options: &ReportOptions) -> Result<ReportModel, LayoutError> {
    if data.assessment.score > 100 {
        return Err(LayoutError::InvalidInput("assessment score above 100"));
    }
    if data.assessment.risk_level != classify(data.assessment.score) {
        return Err(LayoutError::InvalidInput("risk level does not match score"));
    }
    if !options.portfolio_value.is_finite() || options.portfolio_value <= 0.0 {
        return Err(LayoutError::InvalidInput("portfolio value must be positive"));
    }

    let category = data.assessment.risk_level;
    let allocation = allocate(category);
    let scenarios = project(category, &allocation);
    let worst = worst_case(&scenarios);

    Ok(ReportModel {
        assessment: data.assessment.clone(),
        assessment_date: options.assessment_date.format("%-m/%-d/%Y").to_string(),
        portfolio_value: options.portfolio_value,
        allocation,
        historical: historical_context(&allocation),
        scenarios,
        worst_case: worst,
        vulnerabilities: key_vulnerabilities(category),
        mitigations: mitigation_strategies(category),
        contact: data.contact_info.clone(),
        profile: data.profile.clone(),
    })
}
