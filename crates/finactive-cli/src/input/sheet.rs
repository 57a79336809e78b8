use finactive_core::record::{RecordField, CLIENT_COLUMN};
use finactive_core::roster::{ClientRoster, RecordRow};
use std::io::Read;
use tracing::debug;

use super::file::resolve_path;

/// Load a client sheet (CSV, one row per client) from disk.
pub fn read_roster(path: &str) -> Result<ClientRoster, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let file = std::fs::File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_roster(file).map_err(|e| format!("'{}': {}", canonical.display(), e).into())
}

/// Parse CSV text into a roster, checking every required column is present.
/// Ragged rows are kept; their absent cells surface later as missing fields.
pub fn parse_roster<R: Read>(reader: R) -> Result<ClientRoster, Box<dyn std::error::Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut missing: Vec<&str> = Vec::new();
    if !headers.iter().any(|h| h.eq_ignore_ascii_case(CLIENT_COLUMN)) {
        missing.push(CLIENT_COLUMN);
    }
    missing.extend(
        RecordField::ALL
            .iter()
            .filter(|field| {
                !headers
                    .iter()
                    .any(|h| RecordField::from_name(h) == Some(**field))
            })
            .map(|field| field.label()),
    );
    if !missing.is_empty() {
        return Err(format!("missing columns: {}", missing.join(", ")).into());
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| format!("row {}: {}", i + 1, e))?;
        let row: RecordRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| (h.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), "client sheet loaded");
    Ok(ClientRoster::new(rows))
}
