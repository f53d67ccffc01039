//! entities.rs: domain records shared across the engine.
//!
//! Everything here is created fresh per report generation and discarded after
//! the document is finalized. No persistence, no interior mutability.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::tokens::QuestionId;

/// Define a closed enum with explicit display tokens and a stable `ALL` order.
macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident => { $($variant:ident = $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// Coarse classification derived from the normalized score.
    RiskCategory => {
        Conservative = "Conservative",
        Moderate     = "Moderate",
        Aggressive   = "Aggressive",
    }
);

impl RiskCategory {
    /// Scores strictly below this are Conservative.
    pub const CONSERVATIVE_BELOW: u8 = 35;
    /// Scores strictly below this (and at least `CONSERVATIVE_BELOW`) are Moderate.
    pub const MODERATE_BELOW: u8 = 65;

    /// Band a normalized score: `[0,35)` Conservative, `[35,65)` Moderate, `[65,100]` Aggressive.
    pub const fn for_score(score: u8) -> RiskCategory {
        if score < Self::CONSERVATIVE_BELOW {
            RiskCategory::Conservative
        } else if score < Self::MODERATE_BELOW {
            RiskCategory::Moderate
        } else {
            RiskCategory::Aggressive
        }
    }
}

closed_enum!(
    /// Static qualitative tier attached to each stress scenario.
    Vulnerability => {
        Low    = "Low",
        Medium = "Medium",
        High   = "High",
    }
);

closed_enum!(
    AssetClass => {
        Stocks       = "Stocks",
        Bonds        = "Bonds",
        Alternatives = "Alternatives",
        Cash         = "Cash",
    }
);

closed_enum!(
    /// Scenario families, in report order.
    ScenarioGroup => {
        InterestRate = "Interest Rate Shocks",
        MarketCrash  = "Market Crash Scenarios",
        Economic     = "Economic Stress Events",
    }
);

// ----------------------------- Questionnaire -----------------------------

/// One multiple-choice question. `scores[i]` is the score of `options[i]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    pub scores: Vec<u32>,
    pub weight: f64,
}

impl Question {
    /// Build a question, enforcing `scores.len() == options.len()`, a
    /// non-empty option list, and `weight > 0`.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        scores: Vec<u32>,
        weight: f64,
    ) -> Result<Self, CoreError> {
        let q = Question { id, text: text.into(), options, scores, weight };
        q.validate()?;
        Ok(q)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.options.is_empty() {
            return Err(CoreError::EmptyChoiceSet);
        }
        if self.scores.len() != self.options.len() {
            return Err(CoreError::ScoresMismatch(self.id.clone()));
        }
        if !(self.weight > 0.0) || !self.weight.is_finite() {
            return Err(CoreError::DomainOutOfRange("weight"));
        }
        Ok(())
    }

    /// Highest option score (0 for an empty list, which `validate` rejects).
    pub fn max_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Score for a 1-based option index, or `InvalidAnswerIndex`.
    pub fn score_for(&self, index: u32) -> Result<u32, CoreError> {
        let slot = (index as usize).checked_sub(1);
        slot.and_then(|i| self.scores.get(i).copied())
            .ok_or_else(|| CoreError::InvalidAnswerIndex {
                question: self.id.clone(),
                index,
                options: self.scores.len(),
            })
    }
}

/// A selected option (1-based `value`) for a question.
///
/// `question_id` is kept as free text: ids that are not in the bank, even
/// ones that could never be a `QuestionId`, are skipped by the scorer
/// rather than rejected at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Answer {
    pub question_id: String,
    pub value: u32,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: u32) -> Self {
        Answer { question_id: question_id.into(), value }
    }
}

/// Finished assessment. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assessment {
    pub score: u8,
    pub risk_level: RiskCategory,
    pub recommendations: Vec<String>,
}

// ----------------------------- Portfolio model -----------------------------

/// Percentages per asset class; the four fields sum to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetAllocation {
    pub stocks: u8,
    pub bonds: u8,
    pub alternatives: u8,
    pub cash: u8,
}

impl AssetAllocation {
    pub fn total(&self) -> u32 {
        self.stocks as u32 + self.bonds as u32 + self.alternatives as u32 + self.cash as u32
    }

    pub fn pct(&self, class: AssetClass) -> u8 {
        match class {
            AssetClass::Stocks => self.stocks,
            AssetClass::Bonds => self.bonds,
            AssetClass::Alternatives => self.alternatives,
            AssetClass::Cash => self.cash,
        }
    }

    /// `(class, pct)` pairs in fixed order: stocks, bonds, alternatives, cash.
    pub fn classes(&self) -> impl Iterator<Item = (AssetClass, u8)> + '_ {
        AssetClass::ALL.iter().map(move |&c| (c, self.pct(c)))
    }

    /// Dollar amount held in `class` for a portfolio of `portfolio_value`.
    pub fn dollars(&self, class: AssetClass, portfolio_value: f64) -> f64 {
        portfolio_value * (self.pct(class) as f64 / 100.0)
    }
}

/// One projected adverse event. `impact` is a signed percentage, two decimals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StressScenario {
    pub group: ScenarioGroup,
    pub name: String,
    pub label: String,
    pub description: String,
    pub impact: f64,
    pub recovery_time: String,
    pub vulnerability: Vulnerability,
    pub vulnerable_assets: String,
    pub hedging: String,
}

impl StressScenario {
    /// Dollar change for a portfolio of `portfolio_value` (negative = loss).
    pub fn dollar_impact(&self, portfolio_value: f64) -> f64 {
        portfolio_value * (self.impact / 100.0)
    }

    pub fn portfolio_value_after(&self, portfolio_value: f64) -> f64 {
        portfolio_value + self.dollar_impact(portfolio_value)
    }
}

// ----------------------------- Display-only records -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl ContactInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinancialProfile {
    pub age: String,
    pub income: String,
    pub properties: Vec<String>,
    pub has_alternative_investments: bool,
}
