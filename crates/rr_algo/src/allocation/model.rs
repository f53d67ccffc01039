//! Target asset allocation per risk category.
//!
//! Contract:
//! - One fixed row per category; no interpolation between categories.
//! - Every row sums to exactly 100.

use rr_core::{AssetAllocation, AssetClass, RiskCategory};

/// Allocation table. Exhaustive over `RiskCategory`.
pub const fn allocate(category: RiskCategory) -> AssetAllocation {
    match category {
        RiskCategory::Conservative => AssetAllocation { stocks: 30, bonds: 50, alternatives: 10, cash: 10 },
        RiskCategory::Moderate     => AssetAllocation { stocks: 60, bonds: 30, alternatives: 8,  cash: 2 },
        RiskCategory::Aggressive   => AssetAllocation { stocks: 80, bonds: 15, alternatives: 5,  cash: 0 },
    }
}

/// Exposure notes shown beside each asset class. Cash carries none.
pub fn exposure_notes(class: AssetClass) -> &'static [&'static str] {
    match class {
        AssetClass::Stocks => &[
            "Market volatility risk",
            "Economic downturn sensitivity",
            "Sector concentration risk",
        ],
        AssetClass::Bonds => &[
            "Interest rate sensitivity",
            "Credit risk exposure",
            "Inflation erosion risk",
        ],
        AssetClass::Alternatives => &[
            "Liquidity constraints",
            "Correlation breakdown risk",
            "Complexity and transparency",
        ],
        AssetClass::Cash => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_sums_to_100() {
        for &c in RiskCategory::ALL {
            assert_eq!(allocate(c).total(), 100, "{c}");
        }
    }

    #[test]
    fn equity_weight_rises_with_risk() {
        let s: Vec<u8> = RiskCategory::ALL.iter().map(|&c| allocate(c).stocks).collect();
        assert_eq!(s, vec![30, 60, 80]);
    }

    #[test]
    fn cash_has_no_exposure_notes() {
        assert!(exposure_notes(AssetClass::Cash).is_empty());
        assert_eq!(exposure_notes(AssetClass::Bonds).len(), 3);
    }
}
