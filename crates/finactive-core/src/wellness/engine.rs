use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::advisories::{derive_advisories, Advisory};
use super::breakdown::{breakdown, BalanceSheetBreakdown};
use super::ratios::derive_ratios;
use super::scores::{derive_scores, FinancialScores, RangeWarning};
use crate::policy::ScoringPolicy;
use crate::record::ClientRecord;
use crate::types::*;
use crate::FinactiveResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
    pub savings_rate: Rate,
    pub debt_ratio: Rate,
    pub emergency_months: Months,
    pub scores: FinancialScores,
    pub recommendations: Vec<Advisory>,
}

/// Everything a dashboard needs for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientAssessment {
    pub client: String,
    pub metrics: MetricsResult,
    pub breakdown: BalanceSheetBreakdown,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute metrics, scores and advisories under the default policy.
pub fn compute(record: &ClientRecord) -> FinactiveResult<MetricsResult> {
    compute_with_policy(record, &ScoringPolicy::default())
}

pub fn compute_with_policy(
    record: &ClientRecord,
    policy: &ScoringPolicy,
) -> FinactiveResult<MetricsResult> {
    evaluate(record, policy).map(|(metrics, _)| metrics)
}

/// Full assessment wrapped in the computation envelope. Scores that left the
/// 0–100 band before clamping are reported as warnings.
pub fn assess_client(
    record: &ClientRecord,
    policy: &ScoringPolicy,
) -> FinactiveResult<ComputationOutput<ClientAssessment>> {
    let start = Instant::now();

    let (metrics, range_warnings) = evaluate(record, policy)?;
    let balance_sheet = breakdown(record)?;
    let warnings: Vec<String> = range_warnings.iter().map(ToString::to_string).collect();

    let output = ClientAssessment {
        client: record.client.clone(),
        metrics,
        breakdown: balance_sheet,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "emergency_months": "emergency_fund * 12 / expenses",
        "score_rounding": "half away from zero",
        "budgeting_score_clamped": policy.clamp_budgeting_score,
        "strict_amounts": policy.strict_amounts,
        "policy": policy,
    });

    Ok(with_metadata(
        "Personal financial wellness scoring",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn evaluate(
    record: &ClientRecord,
    policy: &ScoringPolicy,
) -> FinactiveResult<(MetricsResult, Vec<RangeWarning>)> {
    policy.validate()?;
    if policy.strict_amounts {
        record.check_non_negative()?;
    }

    let ratios = derive_ratios(record)?;
    let card = derive_scores(record, &ratios, policy)?;
    let recommendations = derive_advisories(&ratios, &card.scores, policy);

    for w in &card.range_warnings {
        warn!(client = %record.client, score = w.kind.label(), raw = %w.raw, "score outside 0-100");
    }
    for a in &recommendations {
        debug!(client = %record.client, rule = a.rule.id(), value = %a.value, "advisory raised");
    }

    let metrics = MetricsResult {
        total_assets: ratios.total_assets,
        total_liabilities: ratios.total_liabilities,
        net_worth: ratios.net_worth,
        savings_rate: ratios.savings_rate,
        debt_ratio: ratios.debt_ratio,
        emergency_months: ratios.emergency_months,
        scores: card.scores,
        recommendations,
    };
    Ok((metrics, card.range_warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::advisories::AdvisoryRule;
    use crate::FinactiveError;
    use rust_decimal_macros::dec;

    fn scenario_a() -> ClientRecord {
        ClientRecord {
            client: "Scenario A".into(),
            cash: dec!(10000),
            fixed_deposits: dec!(20000),
            equity: dec!(30000),
            mutual_funds: dec!(10000),
            real_estate: dec!(200000),
            retirement_fund: dec!(50000),
            home_loan: dec!(150000),
            car_loan: dec!(20000),
            income: dec!(100000),
            expenses: dec!(70000),
            emergency_fund: dec!(210000),
        }
    }

    #[test]
    fn test_assess_client_reports_range_warnings() {
        let out = assess_client(&scenario_a(), &ScoringPolicy::default()).unwrap();
        // debt: 100 - 170 = -70 before clamping
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("Debt Score raw value -70"));
        assert_eq!(out.result.client, "Scenario A");
        assert_eq!(out.result.breakdown.total_invested, dec!(40000));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_strict_mode_rejects_negative_amounts() {
        let record = ClientRecord {
            cash: dec!(-1),
            ..scenario_a()
        };
        assert!(compute(&record).is_ok());
        let strict = ScoringPolicy {
            strict_amounts: true,
            ..ScoringPolicy::default()
        };
        assert!(matches!(
            compute_with_policy(&record, &strict),
            Err(FinactiveError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_invalid_policy_fails_before_computing() {
        let policy = ScoringPolicy {
            emergency_months_target: dec!(0),
            ..ScoringPolicy::default()
        };
        assert!(matches!(
            compute_with_policy(&scenario_a(), &policy),
            Err(FinactiveError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_custom_thresholds_change_advisories() {
        let policy = ScoringPolicy {
            debt_ratio_ceiling: dec!(2),
            investment_score_floor: 30,
            ..ScoringPolicy::default()
        };
        let m = compute_with_policy(&scenario_a(), &policy).unwrap();
        assert!(m.recommendations.is_empty());

        let m = compute(&scenario_a()).unwrap();
        let rules: Vec<AdvisoryRule> = m.recommendations.iter().map(|a| a.rule).collect();
        assert_eq!(
            rules,
            vec![AdvisoryRule::HighDebtRatio, AdvisoryRule::IncreaseInvestment]
        );
    }
}
