//! Stress-scenario projection.
//!
//! Contract:
//! - Exactly nine scenarios, fixed order: three rate shocks, three equity
//!   crashes, three economic events.
//! - `base_multiplier`: Conservative 0.6, Moderate 0.8, Aggressive 1.0.
//! - Flat scenarios: `round2(base_rate × multiplier)`, independent of allocation.
//! - Equity-scaled scenarios: `round2(base_rate × stocks/100 × multiplier)`.
//! - Vulnerability tiers and recovery bands are static per scenario; they are
//!   never derived from the impact number.
//!
//! Pure: no RNG, no clock. Identical inputs yield identical lists.

use rr_core::{
    rounding::round_2dp, AssetAllocation, Assessment, RiskCategory, ScenarioGroup, StressScenario,
    Vulnerability,
};

use crate::allocation::model::allocate;

pub const SCENARIO_COUNT: usize = 9;

/// How a scenario's base rate reaches the portfolio.
#[derive(Clone, Copy, Debug)]
enum Exposure {
    /// Applies to the whole portfolio.
    Flat,
    /// Applies in proportion to the equity weight.
    Equity,
}

/// Tier rule evaluated against the category only.
#[derive(Clone, Copy, Debug)]
enum TierRule {
    Fixed(Vulnerability),
    /// `.0` when Conservative, `.1` otherwise.
    IfConservative(Vulnerability, Vulnerability),
    /// `.0` when Aggressive, `.1` otherwise.
    IfAggressive(Vulnerability, Vulnerability),
}

impl TierRule {
    fn tier(self, category: RiskCategory) -> Vulnerability {
        match self {
            TierRule::Fixed(v) => v,
            TierRule::IfConservative(yes, no) => {
                if category == RiskCategory::Conservative { yes } else { no }
            }
            TierRule::IfAggressive(yes, no) => {
                if category == RiskCategory::Aggressive { yes } else { no }
            }
        }
    }
}

struct ScenarioSpec {
    group: ScenarioGroup,
    name: &'static str,
    label: &'static str,
    description: &'static str,
    base_rate: f64,
    exposure: Exposure,
    recovery: &'static str,
    tier: TierRule,
    vulnerable_assets: &'static str,
    hedging: &'static str,
}

use Vulnerability::{High, Low, Medium};

const SCENARIOS: [ScenarioSpec; SCENARIO_COUNT] = [
    ScenarioSpec {
        group: ScenarioGroup::InterestRate,
        name: "Interest Rate Shock (+100bp)",
        label: "Interest +100bp",
        description: "Sudden 1% interest rate increase",
        base_rate: -3.5,
        exposure: Exposure::Flat,
        recovery: "6-12 months",
        tier: TierRule::IfConservative(Medium, Low),
        vulnerable_assets: "Bonds",
        hedging: "Shorter Duration",
    },
    ScenarioSpec {
        group: ScenarioGroup::InterestRate,
        name: "Interest Rate Shock (+200bp)",
        label: "Interest +200bp",
        description: "Sudden 2% interest rate increase",
        base_rate: -7.2,
        exposure: Exposure::Flat,
        recovery: "12-18 months",
        tier: TierRule::IfConservative(High, Medium),
        vulnerable_assets: "Bonds, REITs",
        hedging: "Floaters, Swaps",
    },
    ScenarioSpec {
        group: ScenarioGroup::InterestRate,
        name: "Interest Rate Shock (+300bp)",
        label: "Interest +300bp",
        description: "Sudden 3% interest rate increase",
        base_rate: -11.8,
        exposure: Exposure::Flat,
        recovery: "18-24 months",
        tier: TierRule::Fixed(High),
        vulnerable_assets: "Bonds, Utilities",
        hedging: "Treasury Futures",
    },
    ScenarioSpec {
        group: ScenarioGroup::MarketCrash,
        name: "Market Crash (-20%)",
        label: "Market -20%",
        description: "Moderate equity market decline",
        base_rate: -12.0,
        exposure: Exposure::Equity,
        recovery: "12-18 months",
        tier: TierRule::IfAggressive(High, Medium),
        vulnerable_assets: "Stocks",
        hedging: "Put Options",
    },
    ScenarioSpec {
        group: ScenarioGroup::MarketCrash,
        name: "Market Crash (-30%)",
        label: "Market -30%",
        description: "Severe equity market decline",
        base_rate: -18.0,
        exposure: Exposure::Equity,
        recovery: "24-36 months",
        tier: TierRule::Fixed(High),
        vulnerable_assets: "Equities, High Beta",
        hedging: "Inverse ETF",
    },
    ScenarioSpec {
        group: ScenarioGroup::MarketCrash,
        name: "Market Crash (-40%)",
        label: "Market -40%",
        description: "Extreme equity market decline (2008-style)",
        base_rate: -24.0,
        exposure: Exposure::Equity,
        recovery: "36-48 months",
        tier: TierRule::Fixed(High),
        vulnerable_assets: "Equities, Growth",
        hedging: "Gold, Cash",
    },
    ScenarioSpec {
        group: ScenarioGroup::Economic,
        name: "High Inflation (>6%)",
        label: "High Inflation",
        description: "Sustained high inflation environment",
        base_rate: -8.5,
        exposure: Exposure::Flat,
        recovery: "24-36 months",
        tier: TierRule::IfConservative(High, Medium),
        vulnerable_assets: "Cash, Bonds",
        hedging: "TIPS, Commodities",
    },
    ScenarioSpec {
        group: ScenarioGroup::Economic,
        name: "Recession Scenario",
        label: "Recession",
        description: "2 quarters negative GDP growth",
        base_rate: -15.0,
        exposure: Exposure::Flat,
        recovery: "18-30 months",
        tier: TierRule::Fixed(High),
        vulnerable_assets: "Cyclicals",
        hedging: "Defensive Sectors",
    },
    ScenarioSpec {
        group: ScenarioGroup::Economic,
        name: "Currency Crisis",
        label: "Currency Crisis",
        description: "Major currency devaluation event",
        base_rate: -6.8,
        exposure: Exposure::Flat,
        recovery: "12-24 months",
        tier: TierRule::Fixed(Medium),
        vulnerable_assets: "Foreign Bonds",
        hedging: "USD Hedging",
    },
];

pub fn base_multiplier(category: RiskCategory) -> f64 {
    match category {
        RiskCategory::Conservative => 0.6,
        RiskCategory::Moderate => 0.8,
        RiskCategory::Aggressive => 1.0,
    }
}

/// Project the nine scenarios for `category` holding `allocation`.
pub fn project(category: RiskCategory, allocation: &AssetAllocation) -> Vec<StressScenario> {
    let multiplier = base_multiplier(category);
    let equity = allocation.stocks as f64 / 100.0;

    SCENARIOS
        .iter()
        .map(|spec| {
            let raw = match spec.exposure {
                Exposure::Flat => spec.base_rate * multiplier,
                Exposure::Equity => spec.base_rate * equity * multiplier,
            };
            StressScenario {
                group: spec.group,
                name: spec.name.to_string(),
                label: spec.label.to_string(),
                description: spec.description.to_string(),
                impact: round_2dp(raw),
                recovery_time: spec.recovery.to_string(),
                vulnerability: spec.tier.tier(category),
                vulnerable_assets: spec.vulnerable_assets.to_string(),
                hedging: spec.hedging.to_string(),
            }
        })
        .collect()
}

/// Scenarios for a finished assessment using its category's fixed allocation.
pub fn project_stress_scenarios(assessment: &Assessment) -> Vec<StressScenario> {
    let allocation = allocate(assessment.risk_level);
    project(assessment.risk_level, &allocation)
}

/// Most negative impact across `scenarios` (0.0 when none are negative).
pub fn worst_case(scenarios: &[StressScenario]) -> f64 {
    scenarios.iter().fold(0.0f64, |acc, s| acc.min(s.impact))
}

/// Display band for an impact percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactSeverity {
    /// impact > -5
    Mild,
    /// -15 < impact <= -5
    Elevated,
    /// impact <= -15
    Severe,
}

pub fn impact_severity(impact: f64) -> ImpactSeverity {
    if impact > -5.0 {
        ImpactSeverity::Mild
    } else if impact > -15.0 {
        ImpactSeverity::Elevated
    } else {
        ImpactSeverity::Severe
    }
}
