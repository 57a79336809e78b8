use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::{checked_mul, checked_sub, safe_divide, Ratios};
use crate::policy::ScoringPolicy;
use crate::record::ClientRecord;
use crate::types::{OpenScore, Score};
use crate::{FinactiveError, FinactiveResult};

const SCORE_FLOOR: Decimal = Decimal::ZERO;
const SCORE_CEILING: Decimal = dec!(100);

/// The four 0–100 indicators. Budgeting is unbounded unless the policy clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialScores {
    pub investment: Score,
    pub debt: Score,
    pub budgeting: OpenScore,
    pub emergency_fund: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Investment,
    Debt,
    Budgeting,
    EmergencyFund,
}

impl ScoreKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Investment => "Investment Score",
            Self::Debt => "Debt Score",
            Self::Budgeting => "Budgeting Score",
            Self::EmergencyFund => "Emergency Fund Score",
        }
    }
}

/// A score whose unrounded value fell outside 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub kind: ScoreKind,
    pub raw: Decimal,
    pub clamped: bool,
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} raw value {} lies outside 0–100{}",
            self.kind.label(),
            self.raw.round_dp(2).normalize(),
            if self.clamped { " (clamped)" } else { " (reported unclamped)" }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub scores: FinancialScores,
    pub range_warnings: Vec<RangeWarning>,
}

/// Derive all four scores from the record and its ratios.
pub fn derive_scores(
    record: &ClientRecord,
    ratios: &Ratios,
    policy: &ScoringPolicy,
) -> FinactiveResult<ScoreCard> {
    let mut warnings = Vec::new();

    let invested = record
        .equity
        .checked_add(record.mutual_funds)
        .ok_or_else(|| FinactiveError::Overflow {
            context: "equity + mutual funds".into(),
        })?;
    let investment_raw = percent(
        safe_divide(invested, record.income, "investments / income")?,
        "investment score",
    )?;

    let debt_raw = checked_sub(
        SCORE_CEILING,
        percent(ratios.debt_ratio, "debt score")?,
        "debt score",
    )?;

    let budgeting_raw = percent(ratios.savings_rate, "budgeting score")?;

    let coverage = safe_divide(
        ratios.emergency_months,
        policy.emergency_months_target,
        "emergency months / target",
    )?;
    let emergency_raw = percent(coverage.min(Decimal::ONE), "emergency fund score")?;

    let scores = FinancialScores {
        investment: banded_score(ScoreKind::Investment, investment_raw, &mut warnings)?,
        debt: banded_score(ScoreKind::Debt, debt_raw, &mut warnings)?,
        budgeting: open_score(
            ScoreKind::Budgeting,
            budgeting_raw,
            policy.clamp_budgeting_score,
            &mut warnings,
        ),
        emergency_fund: banded_score(ScoreKind::EmergencyFund, emergency_raw, &mut warnings)?,
    };

    Ok(ScoreCard {
        scores,
        range_warnings: warnings,
    })
}

fn percent(rate: Decimal, context: &str) -> FinactiveResult<Decimal> {
    checked_mul(rate, SCORE_CEILING, context)
}

/// Round half up (toward positive infinity); optionally clamp to the score band.
pub fn round_score(raw: Decimal, clamp: bool) -> Decimal {
    let strategy = if raw.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    let rounded = raw.round_dp_with_strategy(0, strategy);
    if clamp {
        rounded.clamp(SCORE_FLOOR, SCORE_CEILING)
    } else {
        rounded
    }
}

fn note_range(kind: ScoreKind, raw: Decimal, clamped: bool, warnings: &mut Vec<RangeWarning>) {
    if raw < SCORE_FLOOR || raw > SCORE_CEILING {
        warnings.push(RangeWarning { kind, raw, clamped });
    }
}

fn banded_score(
    kind: ScoreKind,
    raw: Decimal,
    warnings: &mut Vec<RangeWarning>,
) -> FinactiveResult<Score> {
    note_range(kind, raw, true, warnings);
    round_score(raw, true)
        .to_i64()
        .ok_or_else(|| FinactiveError::Overflow {
            context: kind.label().to_string(),
        })
}

fn open_score(
    kind: ScoreKind,
    raw: Decimal,
    clamp: bool,
    warnings: &mut Vec<RangeWarning>,
) -> OpenScore {
    note_range(kind, raw, clamp, warnings);
    round_score(raw, clamp).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::ratios::derive_ratios;

    fn record(equity: Decimal, liabilities: Decimal, income: Decimal) -> ClientRecord {
        ClientRecord {
            client: "Test".into(),
            cash: Decimal::ZERO,
            fixed_deposits: Decimal::ZERO,
            equity,
            mutual_funds: Decimal::ZERO,
            real_estate: Decimal::ZERO,
            retirement_fund: Decimal::ZERO,
            home_loan: liabilities,
            car_loan: Decimal::ZERO,
            income,
            expenses: dec!(1200),
            emergency_fund: dec!(300),
        }
    }

    fn card(r: &ClientRecord, policy: &ScoringPolicy) -> ScoreCard {
        let ratios = derive_ratios(r).unwrap();
        derive_scores(r, &ratios, policy).unwrap()
    }

    #[test]
    fn test_round_score_half_up() {
        assert_eq!(round_score(dec!(40.5), true), dec!(41));
        assert_eq!(round_score(dec!(40.49), true), dec!(40));
        assert_eq!(round_score(dec!(-12.5), false), dec!(-12));
        assert_eq!(round_score(dec!(-12.51), false), dec!(-13));
        assert_eq!(round_score(dec!(-0.5), false), dec!(0));
        assert_eq!(round_score(dec!(-12.5), true), dec!(0));
        assert_eq!(round_score(dec!(250), true), dec!(100));
    }

    #[test]
    fn test_investment_score_capped_with_warning() {
        let c = card(&record(dec!(5000), dec!(0), dec!(1000)), &ScoringPolicy::default());
        assert_eq!(c.scores.investment, 100);
        assert_eq!(c.range_warnings[0].kind, ScoreKind::Investment);
        assert_eq!(c.range_warnings[0].raw, dec!(500));
        assert!(c.range_warnings[0].clamped);
    }

    #[test]
    fn test_debt_score_floored_at_zero() {
        let c = card(&record(dec!(0), dec!(3000), dec!(1000)), &ScoringPolicy::default());
        assert_eq!(c.scores.debt, 0);
    }

    #[test]
    fn test_budgeting_unclamped_by_default() {
        // expenses 1200 against income 1000 -> savings rate -0.2
        let c = card(&record(dec!(0), dec!(0), dec!(1000)), &ScoringPolicy::default());
        assert_eq!(c.scores.budgeting, dec!(-20));
        let w = c
            .range_warnings
            .iter()
            .find(|w| w.kind == ScoreKind::Budgeting)
            .unwrap();
        assert!(!w.clamped);
    }

    #[test]
    fn test_budgeting_clamped_when_policy_asks() {
        let policy = ScoringPolicy {
            clamp_budgeting_score: true,
            ..ScoringPolicy::default()
        };
        let c = card(&record(dec!(0), dec!(0), dec!(1000)), &policy);
        assert_eq!(c.scores.budgeting, dec!(0));
    }

    #[test]
    fn test_budgeting_holds_values_beyond_integer_range() {
        let mut r = record(dec!(0), dec!(0), dec!(1));
        r.expenses = dec!(100000000000000000);
        r.emergency_fund = dec!(0);
        let c = card(&r, &ScoringPolicy::default());
        assert_eq!(c.scores.budgeting, dec!(-9999999999999999900));
    }

    #[test]
    fn test_emergency_score_scales_with_target() {
        // 300 * 12 / 1200 = 3 months: half of six, a quarter of twelve
        let r = record(dec!(0), dec!(0), dec!(2000));
        assert_eq!(card(&r, &ScoringPolicy::default()).scores.emergency_fund, 50);
        let policy = ScoringPolicy {
            emergency_months_target: dec!(12),
            ..ScoringPolicy::default()
        };
        assert_eq!(card(&r, &policy).scores.emergency_fund, 25);
    }

    #[test]
    fn test_range_warning_display() {
        let w = RangeWarning {
            kind: ScoreKind::Debt,
            raw: dec!(-70),
            clamped: true,
        };
        assert_eq!(w.to_string(), "Debt Score raw value -70 lies outside 0–100 (clamped)");
    }
}
