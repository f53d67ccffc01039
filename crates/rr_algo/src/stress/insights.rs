//! Executive-summary insights attached to a stress analysis.
//!
//! Static per-category text plus two historical reference events whose
//! portfolio impact scales with the equity weight.

use rr_core::{rounding::round_2dp, AssetAllocation, RiskCategory};

/// Three key vulnerabilities for a category.
pub fn key_vulnerabilities(category: RiskCategory) -> [&'static str; 3] {
    match category {
        RiskCategory::Conservative => [
            "High sensitivity to interest rate increases",
            "Inflation erosion of fixed-income returns",
            "Limited growth potential in low-rate environment",
        ],
        RiskCategory::Moderate => [
            "Moderate equity market exposure",
            "Balanced but not optimized for extreme scenarios",
            "Interest rate sensitivity in bond allocation",
        ],
        RiskCategory::Aggressive => [
            "High equity market correlation risk",
            "Significant drawdown potential in market crashes",
            "Extended recovery periods during downturns",
        ],
    }
}

/// Three mitigation strategies for a category.
pub fn mitigation_strategies(category: RiskCategory) -> [&'static str; 3] {
    match category {
        RiskCategory::Conservative => [
            "Incorporate TIPS for inflation protection",
            "Consider floating-rate instruments",
            "Add modest equity allocation for growth",
        ],
        RiskCategory::Moderate => [
            "Implement systematic rebalancing",
            "Add alternative investments for diversification",
            "Consider tactical hedging strategies",
        ],
        RiskCategory::Aggressive => [
            "Implement downside protection strategies",
            "Diversify across global markets",
            "Consider volatility-based hedging",
        ],
    }
}

pub const ACTION_ITEMS: [&str; 5] = [
    "Review and potentially adjust asset allocation based on stress test results",
    "Implement recommended hedging strategies appropriate for your risk level",
    "Establish or review emergency fund adequacy (6-12 months expenses)",
    "Consider professional portfolio stress testing on a quarterly basis",
    "Develop a written investment policy statement including stress scenarios",
];

/// A named group of hedging instruments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HedgingStrategy {
    pub title: &'static str,
    pub instruments: [&'static str; 3],
}

/// Hedging groups shown for every category, in report order.
pub const HEDGING_STRATEGIES: [HedgingStrategy; 3] = [
    HedgingStrategy {
        title: "Interest Rate Protection",
        instruments: [
            "Floating rate bonds",
            "Treasury Inflation-Protected Securities (TIPS)",
            "Short-duration bond funds",
        ],
    },
    HedgingStrategy {
        title: "Market Downside Protection",
        instruments: [
            "Put options on major indices",
            "Inverse ETFs for hedging",
            "Volatility-based instruments",
        ],
    },
    HedgingStrategy {
        title: "Diversification Enhancement",
        instruments: [
            "International exposure",
            "Commodity allocations",
            "Real estate investment trusts",
        ],
    },
];

pub const RECOVERY_PROJECTION: &str = "Historical analysis suggests that portfolios with similar risk \
profiles typically recover from major market disruptions within 24-48 months, assuming normal market \
conditions resume and no additional major shocks occur during the recovery period.";

/// A past market event used as a reference point.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalEvent {
    pub name: &'static str,
    /// Broad market decline, percent.
    pub market_decline: f64,
    pub recovery_months: u32,
    /// Estimated impact on this portfolio, percent, two decimals.
    pub portfolio_impact: f64,
}

struct EventSpec {
    name: &'static str,
    market_decline: f64,
    recovery_months: u32,
    equity_rate: f64,
}

const EVENTS: [EventSpec; 2] = [
    EventSpec {
        name: "2008 Financial Crisis",
        market_decline: -37.0,
        recovery_months: 49,
        equity_rate: -22.0,
    },
    EventSpec {
        name: "2020 COVID-19 Crash",
        market_decline: -34.0,
        recovery_months: 5,
        equity_rate: -20.0,
    },
];

/// Historical events with portfolio impact scaled by `allocation.stocks`.
pub fn historical_context(allocation: &AssetAllocation) -> Vec<HistoricalEvent> {
    let equity = allocation.stocks as f64 / 100.0;
    EVENTS
        .iter()
        .map(|e| HistoricalEvent {
            name: e.name,
            market_decline: e.market_decline,
            recovery_months: e.recovery_months,
            portfolio_impact: round_2dp(e.equity_rate * equity),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::model::allocate;

    #[test]
    fn historical_impact_scales_with_equity() {
        let h = historical_context(&allocate(RiskCategory::Moderate));
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].portfolio_impact, -13.2);
        assert_eq!(h[1].portfolio_impact, -12.0);
        assert_eq!(h[0].recovery_months, 49);

        let h = historical_context(&allocate(RiskCategory::Aggressive));
        assert_eq!(h[0].portfolio_impact, -17.6);
    }

    #[test]
    fn every_category_has_three_of_each() {
        for &c in RiskCategory::ALL {
            assert!(key_vulnerabilities(c).iter().all(|s| !s.is_empty()));
            assert!(mitigation_strategies(c).iter().all(|s| !s.is_empty()));
        }
        assert_ne!(
            key_vulnerabilities(RiskCategory::Conservative),
            key_vulnerabilities(RiskCategory::Aggressive)
        );
    }

    #[test]
    fn hedging_groups_are_fixed() {
        let titles: Vec<_> = HEDGING_STRATEGIES.iter().map(|h| h.title).collect();
        assert_eq!(
            titles,
            ["Interest Rate Protection", "Market Downside Protection", "Diversification Enhancement"]
        );
        assert!(HEDGING_STRATEGIES.iter().all(|h| h.instruments.iter().all(|i| !i.is_empty())));
        assert!(RECOVERY_PROJECTION.contains("24-48 months"));
        assert!(!RECOVERY_PROJECTION.contains("  "));
    }
}
