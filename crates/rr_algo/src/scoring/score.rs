// --------------------------------------------------------------------------------
// FILE: crates/rr_algo/src/scoring/score.rs
// --------------------------------------------------------------------------------
//! Questionnaire scoring (deterministic, no I/O).
//!
//! Inputs:
//! - `bank`: the question set (the built-in bank unless a caller supplies one)
//! - `answers`: selected 1-based option indices keyed by question id
//!
//! Output:
//! - `Assessment { score, risk_level, recommendations }`
//!
//! Rules in this layer:
//! - maximum = Σ max(scores) × weight over **all** bank questions.
//! - achieved = Σ scores[value - 1] × weight over answers.
//! - Answers for unknown question ids are skipped (contribute zero).
//! - An option index outside `1..=options` is rejected (`InvalidAnswerIndex`).
//! - Answers are de-duplicated per question before summing: when a question
//!   is answered twice only the later answer counts. This departs from a
//!   plain sum over every answer so the normalized score never exceeds 100.
//! - normalized = round(achieved / maximum × 100).

use std::collections::BTreeMap;

use rr_core::{rounding::round_to_int, Answer, Assessment, CoreError, Question, RiskCategory};

use super::recommend::recommendations_for;
use crate::questions::question_bank;

/// Scores strictly below this are Conservative.
pub const CONSERVATIVE_BELOW: u8 = RiskCategory::CONSERVATIVE_BELOW;
/// Scores strictly below this (and at least `CONSERVATIVE_BELOW`) are Moderate.
pub const MODERATE_BELOW: u8 = RiskCategory::MODERATE_BELOW;

/// Score `answers` against the built-in question bank.
pub fn calculate_score(answers: &[Answer]) -> Result<Assessment, CoreError> {
    calculate_score_with(question_bank(), answers)
}

/// Score `answers` against an arbitrary bank.
pub fn calculate_score_with(bank: &[Question], answers: &[Answer]) -> Result<Assessment, CoreError> {
    let max_score: f64 = bank.iter().map(|q| q.max_score() as f64 * q.weight).sum();
    if max_score <= 0.0 {
        return Err(CoreError::DomainOutOfRange("max_score"));
    }

    let by_id: BTreeMap<&str, &Question> = bank.iter().map(|q| (q.id.as_str(), q)).collect();

    // Last answer per question wins; unknown ids never make it into the map.
    let mut chosen: BTreeMap<&str, (&Question, u32)> = BTreeMap::new();
    for a in answers {
        if let Some(q) = by_id.get(a.question_id.as_str()) {
            chosen.insert(q.id.as_str(), (q, a.value));
        }
    }

    let mut achieved = 0.0f64;
    for (q, value) in chosen.values() {
        achieved += q.score_for(*value)? as f64 * q.weight;
    }

    let normalized = round_to_int(achieved / max_score * 100.0).clamp(0, 100) as u8;
    Ok(assessment_for(normalized))
}

/// Build an assessment from an already-known normalized score.
pub fn assess_score(score: u8) -> Result<Assessment, CoreError> {
    if score > 100 {
        return Err(CoreError::DomainOutOfRange("score"));
    }
    Ok(assessment_for(score))
}

fn assessment_for(score: u8) -> Assessment {
    let risk_level = classify(score);
    Assessment {
        score,
        risk_level,
        recommendations: recommendations_for(risk_level),
    }
}

/// Band a normalized score: `[0,35)` Conservative, `[35,65)` Moderate, `[65,100]` Aggressive.
pub fn classify(score: u8) -> RiskCategory {
    RiskCategory::for_score(score)
}

/// Answers whose question id is not in `bank` (ignored by the scorer).
pub fn unknown_answers<'a>(bank: &[Question], answers: &'a [Answer]) -> Vec<&'a Answer> {
    answers
        .iter()
        .filter(|a| !bank.iter().any(|q| q.id.as_str() == a.question_id))
        .collect()
}
