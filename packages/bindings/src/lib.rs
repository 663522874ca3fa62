use napi::Result as NapiResult;
use napi_derive::napi;

use loan_ledger_core::amortization::report::{self, ScheduleRequest, SummaryRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// `{ principal, annual_rate_percent, term_months, rounding? }` -> schedule report.
#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::build_schedule_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Same fields plus `month_number` -> summary report.
#[napi]
pub fn compute_summary(input_json: String) -> NapiResult<String> {
    let input: SummaryRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::build_summary_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
