use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::Ratios;
use super::scores::FinancialScores;
use crate::policy::ScoringPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Advisory rules, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryRule {
    LowSavingsRate,
    InsufficientEmergencyFund,
    HighDebtRatio,
    IncreaseInvestment,
}

impl AdvisoryRule {
    pub const ORDER: [AdvisoryRule; 4] = [
        Self::LowSavingsRate,
        Self::InsufficientEmergencyFund,
        Self::HighDebtRatio,
        Self::IncreaseInvestment,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::LowSavingsRate => "low_savings_rate",
            Self::InsufficientEmergencyFund => "insufficient_emergency_fund",
            Self::HighDebtRatio => "high_debt_ratio",
            Self::IncreaseInvestment => "increase_investment",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::LowSavingsRate => Severity::Warning,
            Self::InsufficientEmergencyFund | Self::IncreaseInvestment => Severity::Info,
            Self::HighDebtRatio => Severity::Critical,
        }
    }
}

/// A triggered rule with the value that tripped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub rule: AdvisoryRule,
    pub severity: Severity,
    pub message: String,
    pub value: Decimal,
    pub threshold: Decimal,
}

impl Advisory {
    fn new(rule: AdvisoryRule, value: Decimal, threshold: Decimal, message: String) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message,
            value,
            threshold,
        }
    }
}

/// Evaluate every rule independently; output order follows [`AdvisoryRule::ORDER`].
pub fn derive_advisories(
    ratios: &Ratios,
    scores: &FinancialScores,
    policy: &ScoringPolicy,
) -> Vec<Advisory> {
    AdvisoryRule::ORDER
        .into_iter()
        .filter_map(|rule| evaluate_rule(rule, ratios, scores, policy))
        .collect()
}

fn evaluate_rule(
    rule: AdvisoryRule,
    ratios: &Ratios,
    scores: &FinancialScores,
    policy: &ScoringPolicy,
) -> Option<Advisory> {
    match rule {
        AdvisoryRule::LowSavingsRate => {
            let (value, floor) = (ratios.savings_rate, policy.savings_rate_floor);
            (value < floor).then(|| {
                Advisory::new(
                    rule,
                    value,
                    floor,
                    format!(
                        "Your savings rate is {}, below {}. Reduce discretionary expenses.",
                        fmt_pct(value),
                        fmt_pct(floor)
                    ),
                )
            })
        }
        AdvisoryRule::InsufficientEmergencyFund => {
            let (value, target) = (ratios.emergency_months, policy.emergency_months_target);
            (value < target).then(|| {
                Advisory::new(
                    rule,
                    value,
                    target,
                    format!(
                        "Emergency fund covers {} months of expenses; it should cover at least {} months.",
                        value.round_dp(1),
                        target.normalize()
                    ),
                )
            })
        }
        AdvisoryRule::HighDebtRatio => {
            let (value, ceiling) = (ratios.debt_ratio, policy.debt_ratio_ceiling);
            (value > ceiling).then(|| {
                Advisory::new(
                    rule,
                    value,
                    ceiling,
                    format!(
                        "High debt ratio of {} of income (limit {}). Try to reduce liabilities.",
                        fmt_pct(value),
                        fmt_pct(ceiling)
                    ),
                )
            })
        }
        AdvisoryRule::IncreaseInvestment => {
            let (score, floor) = (scores.investment, policy.investment_score_floor);
            (score < floor).then(|| {
                Advisory::new(
                    rule,
                    Decimal::from(score),
                    Decimal::from(floor),
                    format!(
                        "Investment score is {score}/100 (target {floor}). Consider increasing investments for long-term growth."
                    ),
                )
            })
        }
    }
}

fn fmt_pct(rate: Decimal) -> String {
    match rate.checked_mul(dec!(100)) {
        Some(pct) => format!("{}%", pct.round_dp(1).normalize()),
        None => format!("{}x", rate.round_dp(2)),
    }
}
