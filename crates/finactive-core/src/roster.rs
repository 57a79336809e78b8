//! Client sheets: many tabular rows, one per client, selected by name.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::policy::ScoringPolicy;
use crate::record::{is_client_column, ClientRecord};
use crate::wellness::{compute_with_policy, MetricsResult};
use crate::{FinactiveError, FinactiveResult};

/// One sheet row: column header to raw cell text.
pub type RecordRow = BTreeMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ClientRoster {
    rows: Vec<RecordRow>,
}

/// Outcome for one row of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 1-based data row number.
    pub row: usize,
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClientRoster {
    pub fn new(rows: Vec<RecordRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct client names in first-seen order. Rows without a name are skipped.
    pub fn client_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(client_of)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// The first row for `name`, as a validated record.
    pub fn select(&self, name: &str) -> FinactiveResult<ClientRecord> {
        let wanted = name.trim();
        let row = self
            .rows
            .iter()
            .find(|row| client_of(row) == Some(wanted))
            .ok_or_else(|| FinactiveError::ClientNotFound(wanted.to_string()))?;
        record_from_row(row)
    }

    /// Compute every row on its own; a bad row never stops the rest.
    pub fn assess_all(&self, policy: &ScoringPolicy) -> Vec<RosterEntry> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let client = client_of(row).map(str::to_string);
                match record_from_row(row).and_then(|r| compute_with_policy(&r, policy)) {
                    Ok(metrics) => RosterEntry {
                        row: i + 1,
                        client,
                        metrics: Some(metrics),
                        error: None,
                    },
                    Err(e) => {
                        warn!(row = i + 1, error = %e, "row skipped");
                        RosterEntry {
                            row: i + 1,
                            client,
                            metrics: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}

fn client_of(row: &RecordRow) -> Option<&str> {
    row.iter()
        .find(|(column, _)| is_client_column(column))
        .map(|(_, cell)| cell.trim())
        .filter(|name| !name.is_empty())
}

fn record_from_row(row: &RecordRow) -> FinactiveResult<ClientRecord> {
    ClientRecord::from_cells(row.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}
