use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use loan_calc_core::calculator::{self, LoanCalculator, LoanDisplay};
use loan_calc_core::{LoanInputs, ValidationError};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_inputs(input_json: &str) -> NapiResult<LoanInputs> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ValidationError>,
}

#[derive(Serialize)]
struct ResetState {
    inputs: LoanInputs,
    display: LoanDisplay,
}

/// Check the three raw fields. Problems are data, not exceptions, so the UI
/// can show them as a dismissible notice.
#[napi]
pub fn validate_loan(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let report = match loan_calc_core::validation::parse(&inputs) {
        Ok(_) => ValidationReport {
            valid: true,
            error: None,
        },
        Err(e) => ValidationReport {
            valid: false,
            error: Some(e),
        },
    };
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let inputs = parse_inputs(&input_json)?;
    let output = loan_calc_core::amortization::compute(&inputs).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Empty inputs and the zeroed display of a fresh calculator.
#[napi]
pub fn reset_loan() -> NapiResult<String> {
    let (inputs, _) = calculator::reset();
    let state = ResetState {
        inputs,
        display: LoanCalculator::new().display(),
    };
    serde_json::to_string(&state).map_err(to_napi_error)
}
