use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{types::Money, FinactiveError, FinactiveResult};

/// Column holding the client identifier in a client sheet.
pub const CLIENT_COLUMN: &str = "Client";

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Every numeric field a client record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Cash,
    FixedDeposits,
    Equity,
    MutualFunds,
    RealEstate,
    RetirementFund,
    HomeLoan,
    CarLoan,
    Income,
    Expenses,
    EmergencyFund,
}

impl RecordField {
    pub const ASSETS: [RecordField; 6] = [
        Self::Cash,
        Self::FixedDeposits,
        Self::Equity,
        Self::MutualFunds,
        Self::RealEstate,
        Self::RetirementFund,
    ];

    pub const LIABILITIES: [RecordField; 2] = [Self::HomeLoan, Self::CarLoan];

    pub const ALL: [RecordField; 11] = [
        Self::Cash,
        Self::FixedDeposits,
        Self::Equity,
        Self::MutualFunds,
        Self::RealEstate,
        Self::RetirementFund,
        Self::HomeLoan,
        Self::CarLoan,
        Self::Income,
        Self::Expenses,
        Self::EmergencyFund,
    ];

    /// Spreadsheet column label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::FixedDeposits => "FDs",
            Self::Equity => "Equity",
            Self::MutualFunds => "MFs",
            Self::RealEstate => "Real Estate",
            Self::RetirementFund => "EPF",
            Self::HomeLoan => "Home Loan",
            Self::CarLoan => "Car Loan",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
            Self::EmergencyFund => "Emergency Fund",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Cash => &["cash"],
            Self::FixedDeposits => &["fds", "fixed_deposits", "fixed deposits"],
            Self::Equity => &["equity"],
            Self::MutualFunds => &["mfs", "mutual_funds", "mutual funds"],
            Self::RealEstate => &["real estate", "real_estate"],
            Self::RetirementFund => &["epf", "retirement_fund", "retirement fund"],
            Self::HomeLoan => &["home loan", "home_loan"],
            Self::CarLoan => &["car loan", "car_loan"],
            Self::Income => &["income"],
            Self::Expenses => &["expenses"],
            Self::EmergencyFund => &["emergency fund", "emergency_fund"],
        }
    }

    /// Resolve a column or JSON key, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.aliases().iter().any(|a| *a == needle))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub(crate) fn is_client_column(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(CLIENT_COLUMN)
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One client's raw financial position. Flows (income, expenses) share a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub client: String,
    pub cash: Money,
    pub fixed_deposits: Money,
    pub equity: Money,
    pub mutual_funds: Money,
    pub real_estate: Money,
    pub retirement_fund: Money,
    pub home_loan: Money,
    pub car_loan: Money,
    pub income: Money,
    pub expenses: Money,
    pub emergency_fund: Money,
}

impl ClientRecord {
    /// Build a record from named amounts. Unknown names are ignored; every
    /// field in [`RecordField::ALL`] must be present.
    pub fn from_fields<I, K>(client: &str, fields: I) -> FinactiveResult<Self>
    where
        I: IntoIterator<Item = (K, Money)>,
        K: AsRef<str>,
    {
        let mut slots: [Option<Money>; 11] = [None; 11];
        for (name, amount) in fields {
            if let Some(field) = RecordField::from_name(name.as_ref()) {
                slots[field.index()] = Some(amount);
            }
        }
        Self::from_slots(client, slots)
    }

    /// Build a record from raw text cells, e.g. one spreadsheet row.
    ///
    /// Blank cells count as missing, not zero.
    pub fn from_cells<'a, I>(cells: I) -> FinactiveResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut client = None;
        let mut slots: [Option<Money>; 11] = [None; 11];
        for (column, cell) in cells {
            if is_client_column(column) {
                client = Some(cell.trim());
            } else if let Some(field) = RecordField::from_name(column) {
                slots[field.index()] = parse_amount(field, cell)?;
            }
        }
        Self::from_slots(client.unwrap_or_default(), slots)
    }

    /// Build a record from a JSON object keyed by column label or snake_case name.
    /// Numbers and numeric strings are accepted; `null` counts as missing.
    pub fn from_json(value: &serde_json::Value) -> FinactiveResult<Self> {
        let obj = value.as_object().ok_or_else(|| FinactiveError::InvalidInput {
            field: "record".into(),
            reason: "Client record must be a JSON object.".into(),
        })?;

        let mut client = "";
        let mut slots: [Option<Money>; 11] = [None; 11];
        for (key, val) in obj {
            if is_client_column(key) {
                client = val.as_str().unwrap_or_default();
                continue;
            }
            let Some(field) = RecordField::from_name(key) else {
                continue;
            };
            slots[field.index()] = match val {
                serde_json::Value::Null => None,
                serde_json::Value::Number(n) => parse_amount(field, &n.to_string())?,
                serde_json::Value::String(s) => parse_amount(field, s)?,
                other => {
                    return Err(FinactiveError::MalformedField {
                        field: field.label().into(),
                        value: other.to_string(),
                    })
                }
            };
        }
        Self::from_slots(client, slots)
    }

    fn from_slots(client: &str, slots: [Option<Money>; 11]) -> FinactiveResult<Self> {
        let client = client.trim();
        if client.is_empty() {
            return Err(FinactiveError::MissingField {
                field: CLIENT_COLUMN.into(),
            });
        }
        let take = |field: RecordField| {
            slots[field.index()].ok_or_else(|| FinactiveError::MissingField {
                field: field.label().into(),
            })
        };
        Ok(Self {
            client: client.to_string(),
            cash: take(RecordField::Cash)?,
            fixed_deposits: take(RecordField::FixedDeposits)?,
            equity: take(RecordField::Equity)?,
            mutual_funds: take(RecordField::MutualFunds)?,
            real_estate: take(RecordField::RealEstate)?,
            retirement_fund: take(RecordField::RetirementFund)?,
            home_loan: take(RecordField::HomeLoan)?,
            car_loan: take(RecordField::CarLoan)?,
            income: take(RecordField::Income)?,
            expenses: take(RecordField::Expenses)?,
            emergency_fund: take(RecordField::EmergencyFund)?,
        })
    }

    pub fn amount(&self, field: RecordField) -> Money {
        match field {
            RecordField::Cash => self.cash,
            RecordField::FixedDeposits => self.fixed_deposits,
            RecordField::Equity => self.equity,
            RecordField::MutualFunds => self.mutual_funds,
            RecordField::RealEstate => self.real_estate,
            RecordField::RetirementFund => self.retirement_fund,
            RecordField::HomeLoan => self.home_loan,
            RecordField::CarLoan => self.car_loan,
            RecordField::Income => self.income,
            RecordField::Expenses => self.expenses,
            RecordField::EmergencyFund => self.emergency_fund,
        }
    }

    pub fn total_assets(&self) -> FinactiveResult<Money> {
        self.sum_of(&RecordField::ASSETS, "total assets")
    }

    pub fn total_liabilities(&self) -> FinactiveResult<Money> {
        self.sum_of(&RecordField::LIABILITIES, "total liabilities")
    }

    pub(crate) fn sum_of(&self, fields: &[RecordField], context: &str) -> FinactiveResult<Money> {
        fields.iter().try_fold(Decimal::ZERO, |acc, f| {
            acc.checked_add(self.amount(*f))
                .ok_or_else(|| FinactiveError::Overflow {
                    context: context.to_string(),
                })
        })
    }

    /// Reject the first negative amount, in column order.
    pub fn check_non_negative(&self) -> FinactiveResult<()> {
        match RecordField::ALL
            .into_iter()
            .find(|f| self.amount(*f) < Decimal::ZERO)
        {
            Some(field) => Err(FinactiveError::NegativeAmount {
                field: field.label().into(),
                value: self.amount(field),
            }),
            None => Ok(()),
        }
    }
}

/// Parse a monetary cell; blank is `None`. Commas are accepted only as digit
/// group separators, either `1,250,000` or lakh-style `12,50,000`.
fn parse_amount(field: RecordField, raw: &str) -> FinactiveResult<Option<Money>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let malformed = || FinactiveError::MalformedField {
        field: field.label().into(),
        value: raw.to_string(),
    };
    let cleaned = if trimmed.contains(',') {
        if !well_grouped(trimmed) {
            return Err(malformed());
        }
        trimmed.replace(',', "")
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(Some)
        .map_err(|_| malformed())
}

fn well_grouped(amount: &str) -> bool {
    let unsigned = amount
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(amount);
    let whole = unsigned.split('.').next().unwrap_or("");
    if unsigned[whole.len()..].contains(',') {
        return false;
    }
    let groups: Vec<&str> = whole.split(',').collect();
    if groups
        .iter()
        .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return false;
    }
    match groups.as_slice() {
        [first, middle @ .., last] if last.len() == 3 => {
            let thousands = first.len() <= 3 && middle.iter().all(|g| g.len() == 3);
            let lakhs = first.len() <= 2 && middle.iter().all(|g| g.len() == 2);
            thousands || lakhs
        }
        _ => false,
    }
}
