// crates/rr_algo/src/lib.rs
#![forbid(unsafe_code)]

// Core types used across every algorithm module
pub use rr_core::{
    Answer, AssetAllocation, AssetClass, Assessment, CoreError, Question, RiskCategory,
    StressScenario, Vulnerability,
};

// ----------------------------- Question bank -----------------------------------------

pub mod questions;

pub use questions::{question_bank, validate_bank};

// ----------------------------- Scoring (public surface) -------------------------------

pub mod scoring {
    // File modules (actual implementations)
    pub mod score;
    pub mod recommend;

    pub use score::{
        assess_score, calculate_score, calculate_score_with, classify, unknown_answers,
        CONSERVATIVE_BELOW, MODERATE_BELOW,
    };
    pub use recommend::{generate_recommendations, recommendations_for};
}

// Convenience re-exports (pipeline imports these from crate root)
pub use scoring::{assess_score, calculate_score, calculate_score_with, classify};

// ----------------------------- Allocation (public surface) ----------------------------

pub mod allocation {
    pub mod model;

    pub use model::{allocate, exposure_notes};
}

pub use allocation::allocate;

// ----------------------------- Stress projection --------------------------------------

pub mod stress {
    pub mod projector;
    #[cfg(feature = "insights")]
    pub mod insights;

    pub use projector::{
        base_multiplier, impact_severity, project, project_stress_scenarios, worst_case,
        ImpactSeverity, SCENARIO_COUNT,
    };
    #[cfg(feature = "insights")]
    pub use insights::{
        historical_context, key_vulnerabilities, mitigation_strategies, HedgingStrategy,
        HistoricalEvent, ACTION_ITEMS, HEDGING_STRATEGIES, RECOVERY_PROJECTION,
    };
}

pub use stress::{project, project_stress_scenarios, worst_case};
