use serde::{Deserialize, Serialize};

use super::ratios::safe_divide;
use crate::record::{ClientRecord, RecordField};
use crate::types::{Money, Rate};
use crate::FinactiveResult;

/// Fields making up the investment portfolio split.
const PORTFOLIO: [RecordField; 2] = [RecordField::Equity, RecordField::MutualFunds];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub field: RecordField,
    pub label: String,
    pub amount: Money,
    /// Share of the group total; `None` when the total is zero.
    pub share: Option<Rate>,
}

/// Composition of a client's balance sheet, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetBreakdown {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub total_invested: Money,
    pub assets: Vec<BreakdownLine>,
    pub liabilities: Vec<BreakdownLine>,
    pub portfolio: Vec<BreakdownLine>,
}

pub fn breakdown(record: &ClientRecord) -> FinactiveResult<BalanceSheetBreakdown> {
    let (total_assets, assets) = group(record, &RecordField::ASSETS, "total assets")?;
    let (total_liabilities, liabilities) =
        group(record, &RecordField::LIABILITIES, "total liabilities")?;
    let (total_invested, portfolio) = group(record, &PORTFOLIO, "total invested")?;

    Ok(BalanceSheetBreakdown {
        total_assets,
        total_liabilities,
        total_invested,
        assets,
        liabilities,
        portfolio,
    })
}

fn group(
    record: &ClientRecord,
    fields: &[RecordField],
    context: &str,
) -> FinactiveResult<(Money, Vec<BreakdownLine>)> {
    let total = record.sum_of(fields, context)?;
    let lines = fields
        .iter()
        .map(|field| {
            let amount = record.amount(*field);
            let share = if total.is_zero() {
                None
            } else {
                Some(safe_divide(amount, total, context)?)
            };
            Ok(BreakdownLine {
                field: *field,
                label: field.label().to_string(),
                amount,
                share,
            })
        })
        .collect::<FinactiveResult<Vec<_>>>()?;
    Ok((total, lines))
}
