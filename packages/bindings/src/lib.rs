use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finactive_core::wellness::{self, breakdown};
use finactive_core::{ClientRecord, ScoringPolicy};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_record(input_json: &str) -> NapiResult<ClientRecord> {
    let value: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    ClientRecord::from_json(&value).map_err(to_napi_error)
}

/// `{ "record": {...}, "policy": {...} }`; the policy may be omitted.
#[derive(Deserialize)]
struct AssessRequest {
    record: serde_json::Value,
    #[serde(default)]
    policy: ScoringPolicy,
}

// ---------------------------------------------------------------------------
// Wellness
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_metrics(input_json: String) -> NapiResult<String> {
    let record = parse_record(&input_json)?;
    let output = wellness::compute(&record).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_client(input_json: String) -> NapiResult<String> {
    let request: AssessRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let record = ClientRecord::from_json(&request.record).map_err(to_napi_error)?;
    let output = wellness::assess_client(&record, &request.policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn balance_sheet_breakdown(input_json: String) -> NapiResult<String> {
    let record = parse_record(&input_json)?;
    let output = breakdown::breakdown(&record).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
