use clap::Args;
use serde_json::{json, Value};

use finactive_core::roster::RosterEntry;
use finactive_core::wellness::assess_client;
use finactive_core::ScoringPolicy;

use crate::input;

/// Arguments for listing the clients in a sheet
#[derive(Args)]
pub struct ClientsArgs {
    /// Path to the client sheet (CSV)
    #[arg(long)]
    pub file: String,
}

/// Arguments for assessing one client from a sheet
#[derive(Args)]
pub struct ReportArgs {
    /// Path to the client sheet (CSV)
    #[arg(long)]
    pub file: String,

    /// Client to assess; the first matching row is used
    #[arg(long)]
    pub client: String,
}

/// Arguments for assessing every row of a sheet
#[derive(Args)]
pub struct BatchArgs {
    /// Path to the client sheet (CSV)
    #[arg(long)]
    pub file: String,
}

pub fn run_clients(args: ClientsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roster = input::sheet::read_roster(&args.file)?;
    Ok(json!({
        "rows": roster.len(),
        "clients": roster.client_names(),
    }))
}

pub fn run_report(
    args: ReportArgs,
    policy: &ScoringPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let roster = input::sheet::read_roster(&args.file)?;
    let record = roster.select(&args.client)?;
    let result = assess_client(&record, policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_batch(
    args: BatchArgs,
    policy: &ScoringPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let roster = input::sheet::read_roster(&args.file)?;
    let entries = roster.assess_all(policy);
    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let results: Vec<Value> = entries.iter().map(summary_row).collect();
    Ok(json!({
        "assessed": entries.len() - failed,
        "failed": failed,
        "results": results,
    }))
}

/// One flat row per client so table and CSV output stay readable.
fn summary_row(entry: &RosterEntry) -> Value {
    let mut row = json!({
        "row": entry.row,
        "client": entry.client,
        "net_worth": null,
        "savings_rate": null,
        "debt_ratio": null,
        "emergency_months": null,
        "investment_score": null,
        "debt_score": null,
        "budgeting_score": null,
        "emergency_fund_score": null,
        "advisories": null,
        "error": entry.error,
    });
    if let Some(m) = &entry.metrics {
        let advisories: Vec<&str> = m.recommendations.iter().map(|a| a.rule.id()).collect();
        row["net_worth"] = json!(m.net_worth.to_string());
        row["savings_rate"] = json!(m.savings_rate.round_dp(4).to_string());
        row["debt_ratio"] = json!(m.debt_ratio.round_dp(4).to_string());
        row["emergency_months"] = json!(m.emergency_months.round_dp(2).to_string());
        row["investment_score"] = json!(m.scores.investment);
        row["debt_score"] = json!(m.scores.debt);
        row["budgeting_score"] = json!(m.scores.budgeting);
        row["emergency_fund_score"] = json!(m.scores.emergency_fund);
        row["advisories"] = json!(advisories.join(" "));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_row_leads_with_row_and_client() {
        let entry = RosterEntry {
            row: 2,
            client: Some("Ravi".into()),
            metrics: None,
            error: Some("Missing field: Equity".into()),
        };
        let row = summary_row(&entry);
        let keys: Vec<&str> = row.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys[..3], ["row", "client", "net_worth"]);
        assert_eq!(keys.last(), Some(&"error"));
        assert_eq!(row["error"], "Missing field: Equity");
    }
}
