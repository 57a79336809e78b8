use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::record::ClientRecord;
use crate::types::{Money, Months, Rate};
use crate::{FinactiveError, FinactiveResult};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Balance-sheet aggregates and the ratios derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
    pub savings_rate: Rate,
    pub debt_ratio: Rate,
    pub emergency_months: Months,
}

/// Derive net worth, savings rate, debt ratio and emergency-fund months.
///
/// Income and expenses must both be positive; otherwise no ratio is returned.
pub fn derive_ratios(record: &ClientRecord) -> FinactiveResult<Ratios> {
    if record.income <= Decimal::ZERO {
        return Err(FinactiveError::InvalidIncome {
            value: record.income,
        });
    }
    if record.expenses <= Decimal::ZERO {
        return Err(FinactiveError::InvalidExpenses {
            value: record.expenses,
        });
    }

    let total_assets = record.total_assets()?;
    let total_liabilities = record.total_liabilities()?;
    let net_worth = checked_sub(total_assets, total_liabilities, "net worth")?;

    let expense_share = safe_divide(record.expenses, record.income, "expenses / income")?;
    let savings_rate = checked_sub(Decimal::ONE, expense_share, "savings rate")?;
    let debt_ratio = safe_divide(total_liabilities, record.income, "liabilities / income")?;

    // fund / (expenses / 12) evaluated as fund * 12 / expenses: one division,
    // so whole-month coverage stays exact.
    let annualised_fund = checked_mul(record.emergency_fund, MONTHS_PER_YEAR, "emergency months")?;
    let emergency_months = safe_divide(annualised_fund, record.expenses, "emergency months")?;

    Ok(Ratios {
        total_assets,
        total_liabilities,
        net_worth,
        savings_rate,
        debt_ratio,
        emergency_months,
    })
}

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

pub(crate) fn safe_divide(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> FinactiveResult<Decimal> {
    if denominator.is_zero() {
        return Err(FinactiveError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| overflow(context))
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, context: &str) -> FinactiveResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

pub(crate) fn checked_sub(a: Decimal, b: Decimal, context: &str) -> FinactiveResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> FinactiveError {
    FinactiveError::Overflow {
        context: context.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordField;
    use crate::ErrorKind;

    fn record(income: Decimal, expenses: Decimal, fund: Decimal) -> ClientRecord {
        let mut fields: Vec<(&str, Decimal)> = RecordField::ALL
            .iter()
            .map(|f| (f.label(), Decimal::ZERO))
            .collect();
        fields.push(("Income", income));
        fields.push(("Expenses", expenses));
        fields.push(("Emergency Fund", fund));
        ClientRecord::from_fields("Test", fields).unwrap()
    }

    #[test]
    fn test_savings_rate_can_go_negative() {
        let r = derive_ratios(&record(dec!(1000), dec!(1500), dec!(0))).unwrap();
        assert_eq!(r.savings_rate, dec!(-0.5));
    }

    #[test]
    fn test_emergency_months_exact_for_whole_months() {
        let r = derive_ratios(&record(dec!(100), dec!(70000), dec!(210000))).unwrap();
        assert_eq!(r.emergency_months, dec!(36));
    }

    #[test]
    fn test_negative_income_rejected() {
        let err = derive_ratios(&record(dec!(-1), dec!(10), dec!(0))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArithmeticPrecondition);
    }

    #[test]
    fn test_zero_expenses_rejected() {
        match derive_ratios(&record(dec!(100), dec!(0), dec!(50))) {
            Err(FinactiveError::InvalidExpenses { value }) => assert_eq!(value, Decimal::ZERO),
            other => panic!("Expected InvalidExpenses, got {other:?}"),
        }
    }

    #[test]
    fn test_overflow_is_reported_not_saturated() {
        let r = derive_ratios(&record(dec!(0.0000000001), dec!(1), Decimal::MAX));
        assert!(matches!(r, Err(FinactiveError::Overflow { .. })));
    }
}
