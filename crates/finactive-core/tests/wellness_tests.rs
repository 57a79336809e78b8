use finactive_core::wellness::advisories::{AdvisoryRule, Severity};
use finactive_core::wellness::{assess_client, compute, compute_with_policy};
use finactive_core::{ClientRecord, ErrorKind, FinactiveError, ScoringPolicy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

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

/// savings rate 0.5, 12 months of cover, debt ratio 0.1, investment score 80
fn healthy_client() -> ClientRecord {
    ClientRecord {
        client: "Healthy".into(),
        cash: dec!(5000),
        fixed_deposits: dec!(0),
        equity: dec!(60000),
        mutual_funds: dec!(20000),
        real_estate: dec!(0),
        retirement_fund: dec!(0),
        home_loan: dec!(10000),
        car_loan: dec!(0),
        income: dec!(100000),
        expenses: dec!(50000),
        emergency_fund: dec!(50000),
    }
}

fn rules(record: &ClientRecord) -> Vec<AdvisoryRule> {
    compute(record)
        .unwrap()
        .recommendations
        .iter()
        .map(|a| a.rule)
        .collect()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_scenario_a_metrics() {
    let m = compute(&scenario_a()).unwrap();

    assert_eq!(m.total_assets, dec!(320000));
    assert_eq!(m.total_liabilities, dec!(170000));
    assert_eq!(m.net_worth, dec!(150000));
    assert_eq!(m.savings_rate, dec!(0.3));
    assert_eq!(m.debt_ratio, dec!(1.7));
    assert_eq!(m.emergency_months, dec!(36));

    assert_eq!(m.scores.investment, 40);
    assert_eq!(m.scores.debt, 0);
    assert_eq!(m.scores.budgeting, dec!(30));
    assert_eq!(m.scores.emergency_fund, 100);
}

#[test]
fn test_scenario_a_advisories() {
    let m = compute(&scenario_a()).unwrap();
    let fired: Vec<(AdvisoryRule, Severity)> = m
        .recommendations
        .iter()
        .map(|a| (a.rule, a.severity))
        .collect();
    assert_eq!(
        fired,
        vec![
            (AdvisoryRule::HighDebtRatio, Severity::Critical),
            (AdvisoryRule::IncreaseInvestment, Severity::Info),
        ]
    );
    assert_eq!(m.recommendations[1].value, dec!(40));
    assert_eq!(m.recommendations[1].threshold, dec!(60));
}

#[test]
fn test_scenario_b_zero_income_rejected() {
    let record = ClientRecord {
        income: Decimal::ZERO,
        ..scenario_a()
    };
    let err = compute(&record).unwrap_err();
    assert!(matches!(err, FinactiveError::InvalidIncome { .. }));
    assert_eq!(err.kind(), ErrorKind::ArithmeticPrecondition);
    assert!(assess_client(&record, &ScoringPolicy::default()).is_err());
}

#[test]
fn test_scenario_c_no_advisories() {
    let m = compute(&healthy_client()).unwrap();
    assert_eq!(m.savings_rate, dec!(0.5));
    assert_eq!(m.emergency_months, dec!(12));
    assert_eq!(m.debt_ratio, dec!(0.1));
    assert_eq!(m.scores.investment, 80);
    assert!(m.recommendations.is_empty());
}

// ===========================================================================
// Threshold boundaries
// ===========================================================================

#[test]
fn test_six_months_of_cover_is_enough() {
    // 6000 * 12 / 12000 = 6 exactly
    let record = ClientRecord {
        expenses: dec!(12000),
        emergency_fund: dec!(6000),
        ..healthy_client()
    };
    assert_eq!(compute(&record).unwrap().emergency_months, dec!(6));
    assert!(!rules(&record).contains(&AdvisoryRule::InsufficientEmergencyFund));
}

#[test]
fn test_just_under_six_months_fires() {
    // 5999 * 12 / 12000 = 5.999
    let record = ClientRecord {
        expenses: dec!(12000),
        emergency_fund: dec!(5999),
        ..healthy_client()
    };
    assert_eq!(compute(&record).unwrap().emergency_months, dec!(5.999));
    assert!(rules(&record).contains(&AdvisoryRule::InsufficientEmergencyFund));
}

#[test]
fn test_debt_ratio_at_ceiling_does_not_fire() {
    let record = ClientRecord {
        home_loan: dec!(40000),
        ..healthy_client()
    };
    assert_eq!(compute(&record).unwrap().debt_ratio, dec!(0.4));
    assert!(!rules(&record).contains(&AdvisoryRule::HighDebtRatio));
}

#[test]
fn test_debt_ratio_above_ceiling_fires() {
    let record = ClientRecord {
        home_loan: dec!(40001),
        ..healthy_client()
    };
    assert_eq!(compute(&record).unwrap().debt_ratio, dec!(0.40001));
    assert!(rules(&record).contains(&AdvisoryRule::HighDebtRatio));
}

#[test]
fn test_savings_rate_at_floor_does_not_fire() {
    let record = ClientRecord {
        expenses: dec!(80000),
        emergency_fund: dec!(80000),
        ..healthy_client()
    };
    assert_eq!(compute(&record).unwrap().savings_rate, dec!(0.2));
    assert!(!rules(&record).contains(&AdvisoryRule::LowSavingsRate));
}

// ===========================================================================
// Budgeting score clamp
// ===========================================================================

#[test]
fn test_budgeting_score_unclamped_by_default() {
    let record = ClientRecord {
        expenses: dec!(250000),
        ..healthy_client()
    };
    let m = compute(&record).unwrap();
    assert_eq!(m.scores.budgeting, dec!(-150));

    let clamped = compute_with_policy(
        &record,
        &ScoringPolicy {
            clamp_budgeting_score: true,
            ..ScoringPolicy::default()
        },
    )
    .unwrap();
    assert_eq!(clamped.scores.budgeting, dec!(0));
}

#[test]
fn test_huge_expenses_still_score() {
    let record = ClientRecord {
        cash: Decimal::ZERO,
        equity: Decimal::ZERO,
        mutual_funds: Decimal::ZERO,
        home_loan: Decimal::ZERO,
        income: dec!(1),
        expenses: dec!(100000000000000000),
        emergency_fund: Decimal::ZERO,
        ..healthy_client()
    };
    let m = compute(&record).unwrap();
    assert_eq!(m.scores.budgeting, dec!(-9999999999999999900));
    assert_eq!(m.scores.investment, 0);
    assert_eq!(m.scores.emergency_fund, 0);
    assert_eq!(serde_json::to_value(&m).unwrap()["scores"]["budgeting"], "-9999999999999999900");
}

#[test]
fn test_missing_field_surfaces_before_computation() {
    let err = ClientRecord::from_cells([("Client", "Partial"), ("Cash", "100")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Missing field: FDs");
}

#[test]
fn test_result_serialises_amounts_as_strings() {
    let m = compute(&scenario_a()).unwrap();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["net_worth"], serde_json::json!("150000"));
    assert_eq!(json["scores"]["investment"], serde_json::json!(40));
    assert_eq!(
        json["recommendations"][0]["rule"],
        serde_json::json!("high_debt_ratio")
    );
    assert_eq!(
        json["recommendations"][0]["severity"],
        serde_json::json!("critical")
    );
}

// ===========================================================================
// Properties
// ===========================================================================

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
}

fn positive() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
}

prop_compose! {
    fn any_record()(
        assets in prop::array::uniform6(amount()),
        loans in prop::array::uniform2(amount()),
        income in positive(),
        expenses in positive(),
        emergency_fund in amount(),
    ) -> ClientRecord {
        ClientRecord {
            client: "Generated".into(),
            cash: assets[0],
            fixed_deposits: assets[1],
            equity: assets[2],
            mutual_funds: assets[3],
            real_estate: assets[4],
            retirement_fund: assets[5],
            home_loan: loans[0],
            car_loan: loans[1],
            income,
            expenses,
            emergency_fund,
        }
    }
}

proptest! {
    #[test]
    fn prop_net_worth_is_exact(record in any_record()) {
        let m = compute(&record).unwrap();
        let expected = (record.cash + record.fixed_deposits + record.equity
            + record.mutual_funds + record.real_estate + record.retirement_fund)
            - (record.home_loan + record.car_loan);
        prop_assert_eq!(m.net_worth, expected);
    }

    #[test]
    fn prop_clamped_scores_stay_in_band(record in any_record()) {
        let s = compute(&record).unwrap().scores;
        prop_assert!((0..=100).contains(&s.investment));
        prop_assert!((0..=100).contains(&s.debt));
        prop_assert!((0..=100).contains(&s.emergency_fund));
    }

    #[test]
    fn prop_compute_is_idempotent(record in any_record()) {
        prop_assert_eq!(compute(&record).unwrap(), compute(&record).unwrap());
    }

    #[test]
    fn prop_advisories_follow_rule_order(record in any_record()) {
        let fired: Vec<AdvisoryRule> =
            compute(&record).unwrap().recommendations.iter().map(|a| a.rule).collect();
        let positions: Vec<usize> = fired
            .iter()
            .map(|r| AdvisoryRule::ORDER.iter().position(|o| o == r).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
