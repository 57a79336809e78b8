use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Months, Rate, Score};
use crate::{FinactiveError, FinactiveResult};

/// Thresholds and switches applied by the wellness engine.
///
/// Defaults: 20% savings floor, six months of emergency cover, 40% debt
/// ceiling, investment score floor of 60, lenient amounts and an unclamped
/// budgeting score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub savings_rate_floor: Rate,
    pub emergency_months_target: Months,
    pub debt_ratio_ceiling: Rate,
    pub investment_score_floor: Score,
    /// Reject records carrying any negative amount.
    pub strict_amounts: bool,
    /// Bound the budgeting score to 0–100 like the other three scores.
    pub clamp_budgeting_score: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            savings_rate_floor: dec!(0.20),
            emergency_months_target: dec!(6),
            debt_ratio_ceiling: dec!(0.40),
            investment_score_floor: 60,
            strict_amounts: false,
            clamp_budgeting_score: false,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> FinactiveResult<()> {
        if self.emergency_months_target <= Decimal::ZERO {
            return Err(FinactiveError::InvalidInput {
                field: "emergency_months_target".into(),
                reason: "Emergency fund target must be positive.".into(),
            });
        }
        if self.savings_rate_floor < Decimal::ZERO {
            return Err(FinactiveError::InvalidInput {
                field: "savings_rate_floor".into(),
                reason: "Savings rate floor cannot be negative.".into(),
            });
        }
        if self.debt_ratio_ceiling < Decimal::ZERO {
            return Err(FinactiveError::InvalidInput {
                field: "debt_ratio_ceiling".into(),
                reason: "Debt ratio ceiling cannot be negative.".into(),
            });
        }
        if !(0..=100).contains(&self.investment_score_floor) {
            return Err(FinactiveError::InvalidInput {
                field: "investment_score_floor".into(),
                reason: "Investment score floor must lie within 0–100.".into(),
            });
        }
        Ok(())
    }
}
