use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finactive_core::wellness::assess_client;
use finactive_core::{ClientRecord, RecordField, ScoringPolicy};

use crate::input;

/// Arguments for a single-client assessment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AssessArgs {
    /// Path to JSON client record (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Client name or identifier
    #[arg(long)]
    pub client: Option<String>,

    /// Cash
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Fixed deposits
    #[arg(long, alias = "fds")]
    pub fixed_deposits: Option<Decimal>,

    /// Direct equity holdings
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Mutual fund holdings
    #[arg(long, alias = "mfs")]
    pub mutual_funds: Option<Decimal>,

    /// Real estate
    #[arg(long)]
    pub real_estate: Option<Decimal>,

    /// Retirement fund (EPF)
    #[arg(long, alias = "epf")]
    pub retirement_fund: Option<Decimal>,

    /// Home loan outstanding
    #[arg(long)]
    pub home_loan: Option<Decimal>,

    /// Car loan outstanding
    #[arg(long)]
    pub car_loan: Option<Decimal>,

    /// Income for the period
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Expenses for the same period
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Emergency fund balance
    #[arg(long)]
    pub emergency_fund: Option<Decimal>,
}

impl AssessArgs {
    fn to_record(&self) -> Result<ClientRecord, Box<dyn std::error::Error>> {
        let flags = [
            (RecordField::Cash, self.cash),
            (RecordField::FixedDeposits, self.fixed_deposits),
            (RecordField::Equity, self.equity),
            (RecordField::MutualFunds, self.mutual_funds),
            (RecordField::RealEstate, self.real_estate),
            (RecordField::RetirementFund, self.retirement_fund),
            (RecordField::HomeLoan, self.home_loan),
            (RecordField::CarLoan, self.car_loan),
            (RecordField::Income, self.income),
            (RecordField::Expenses, self.expenses),
            (RecordField::EmergencyFund, self.emergency_fund),
        ];
        let fields = flags
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field.label(), v)));
        let client = self.client.as_deref().unwrap_or_default();
        ClientRecord::from_fields(client, fields)
            .map_err(|e| format!("{} (pass the matching flag or provide --input)", e).into())
    }
}

pub fn run_assess(
    args: AssessArgs,
    policy: &ScoringPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let record = if let Some(ref path) = args.input {
        ClientRecord::from_json(&input::file::read_json_value(path)?)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        ClientRecord::from_json(&data)?
    } else {
        args.to_record()?
    };

    let result = assess_client(&record, policy)?;
    Ok(serde_json::to_value(result)?)
}
