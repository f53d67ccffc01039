//! Advisory strings per risk band. The raw answers are never consulted.

use rr_core::RiskCategory;

use super::score::classify;

const CONSERVATIVE: [&str; 4] = [
    "Consider a portfolio focused on capital preservation with high-quality bonds and dividend stocks",
    "Maintain a larger emergency fund for financial security",
    "Look into Principal Protection Accounts to ensure safety of principal",
    "Focus on stable, income-producing investments",
];

const MODERATE: [&str; 4] = [
    "Consider a balanced portfolio with a mix of stocks and bonds",
    "Diversify across multiple asset classes including Principal Protection Accounts",
    "Look into index funds for steady market exposure",
    "Maintain a moderate emergency fund while pursuing growth opportunities",
];

const AGGRESSIVE: [&str; 4] = [
    "Consider a growth-oriented portfolio with higher allocation to stocks",
    "Look into emerging markets and small-cap investments for higher potential returns",
    "Consider Principal Protection Accounts to help offset downside risk",
    "Be prepared for higher volatility while pursuing long-term growth",
];

fn table(category: RiskCategory) -> &'static [&'static str; 4] {
    match category {
        RiskCategory::Conservative => &CONSERVATIVE,
        RiskCategory::Moderate => &MODERATE,
        RiskCategory::Aggressive => &AGGRESSIVE,
    }
}

pub fn recommendations_for(category: RiskCategory) -> Vec<String> {
    table(category).iter().map(|s| s.to_string()).collect()
}

/// Recommendations for a normalized score (depends only on its band).
pub fn generate_recommendations(score: u8) -> Vec<String> {
    recommendations_for(classify(score))
}
