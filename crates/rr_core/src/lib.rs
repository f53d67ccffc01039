//! rr_core: Core types, closed enums, tokens, and rounding helpers.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`rr_algo`, `rr_report`, `rr_io`, `rr_pipeline`, `rr_cli`).
//!
//! - Registry tokens: `QuestionId`
//! - Domain entities: `Question`, `Answer`, `Assessment`, `AssetAllocation`,
//!   `StressScenario`, `ContactInfo`, `FinancialProfile`
//! - Closed enums: `RiskCategory`, `Vulnerability`, `AssetClass`, `ScenarioGroup`
//! - Rounding helpers for scores (integer) and impacts (two decimals)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;

pub mod errors {
    use core::fmt;

    use crate::tokens::QuestionId;

    /// Error set for core-domain validation and scoring.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        /// Selected option index is outside `1..=options` for its question.
        InvalidAnswerIndex {
            question: QuestionId,
            index: u32,
            options: usize,
        },
        DomainOutOfRange(&'static str),
        EmptyChoiceSet,
        ScoresMismatch(QuestionId),
        DuplicateQuestion(QuestionId),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidAnswerIndex { question, index, options } => write!(
                    f,
                    "answer index {index} out of range 1..={options} for question {question}"
                ),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::EmptyChoiceSet => write!(f, "empty choice set"),
                CoreError::ScoresMismatch(q) => {
                    write!(f, "scores/options length mismatch for question {q}")
                }
                CoreError::DuplicateQuestion(q) => write!(f, "duplicate question id {q}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod tokens {
    //! Registry token types with strict charset.

    use crate::errors::CoreError;
    use core::fmt;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    fn is_token(s: &str) -> bool {
        let len = s.len();
        if !(1..=64).contains(&len) { return false; }
        s.bytes().all(|b| matches!(b,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' |
            b'_' | b'-' | b':' | b'.'
        ))
    }

    macro_rules! def_token {
        ($name:ident) => {
            #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
            #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
            #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
            pub struct $name(String);

            impl $name {
                pub fn as_str(&self) -> &str { &self.0 }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
            }

            impl FromStr for $name {
                type Err = CoreError;
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    if is_token(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidToken) }
                }
            }

            impl TryFrom<String> for $name {
                type Error = CoreError;
                fn try_from(s: String) -> Result<Self, Self::Error> {
                    if is_token(&s) { Ok(Self(s)) } else { Err(CoreError::InvalidToken) }
                }
            }

            impl From<$name> for String {
                fn from(t: $name) -> String { t.0 }
            }
        }
    }

    def_token!(QuestionId);
}

pub mod rounding {
    //! Rounding used by scoring and projection.
    //!
    //! Both helpers round half away from zero (`f64::round`).

    /// Round to the nearest integer.
    #[inline]
    pub fn round_to_int(x: f64) -> i64 {
        x.round() as i64
    }

    /// Round to two decimal places.
    #[inline]
    pub fn round_2dp(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    /// Render a signed percentage with up to two decimals and no trailing zeros
    /// (`-5.76%`, `-9%`, `-2.1%`).
    pub fn pct_label(x: f64) -> String {
        let s = format!("{:.2}", round_2dp(x));
        let s = s.trim_end_matches('0').trim_end_matches('.');
        let s = if s == "-0" { "0" } else { s };
        format!("{s}%")
    }
}

pub mod money {
    //! Single display format for currency: whole US dollars with comma grouping.

    /// Format a dollar amount rounded to whole dollars: `$97,500`, `-$5,760`.
    pub fn fmt_usd(amount: f64) -> String {
        let whole = amount.round() as i64;
        let sign = if whole < 0 { "-" } else { "" };
        let digits = whole.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        format!("{sign}${out}")
    }
}

pub use entities::{
    Answer, AssetAllocation, AssetClass, Assessment, ContactInfo, FinancialProfile, Question,
    RiskCategory, ScenarioGroup, StressScenario, Vulnerability,
};
pub use errors::CoreError;
pub use tokens::QuestionId;
