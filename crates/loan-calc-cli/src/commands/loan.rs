use clap::Args;
use serde_json::{json, Value};

use loan_calc_core::amortization;
use loan_calc_core::validation;
use loan_calc_core::LoanInputs;

use crate::input;

/// Raw loan fields, shared by `calculate` and `validate`
#[derive(Args)]
pub struct LoanFieldArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount (UGX)
    #[arg(long, alias = "loan-amount", allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Annual interest rate in percent, e.g. 12 for 12%
    #[arg(long, alias = "annual-rate-percent", allow_hyphen_values = true)]
    pub rate: Option<String>,

    /// Loan term in years
    #[arg(long, alias = "term-years", allow_hyphen_values = true)]
    pub term: Option<String>,
}

/// Arguments for a one-shot calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub fields: LoanFieldArgs,
}

/// Arguments for input validation only
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub fields: LoanFieldArgs,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(args.fields)?;
    let result = amortization::compute(&inputs)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(args.fields)?;
    let report = match validation::parse(&inputs) {
        Ok(_) => json!({ "valid": true }),
        Err(e) => json!({
            "valid": false,
            "field": e.field,
            "kind": e.kind,
            "title": e.title,
            "message": e.message,
        }),
    };
    Ok(report)
}

/// `--input` file first, then any field flags, then JSON piped on stdin.
/// Absent fields stay empty so the core reports them as missing.
fn resolve_inputs(args: LoanFieldArgs) -> Result<LoanInputs, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }

    let any_flag = args.amount.is_some() || args.rate.is_some() || args.term.is_some();
    if !any_flag {
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }
    }

    Ok(LoanInputs::new(
        args.amount.unwrap_or_default(),
        args.rate.unwrap_or_default(),
        args.term.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(amount: &str, rate: &str, term: &str) -> LoanFieldArgs {
        LoanFieldArgs {
            input: None,
            amount: Some(amount.into()),
            rate: Some(rate.into()),
            term: Some(term.into()),
        }
    }

    #[test]
    fn test_calculate_from_flags() {
        let value = run_calculate(CalculateArgs {
            fields: flags("1000000", "12", "1"),
        })
        .unwrap();
        assert_eq!(value["result"]["monthly_payment"], "88848.79");
        assert_eq!(value["metadata"]["currency"], "UGX");
    }

    #[test]
    fn test_calculate_missing_rate_is_error() {
        let err = run_calculate(CalculateArgs {
            fields: flags("1000000", "", "1"),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Rate is Missing: Yearly rate is required");
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let value = run_validate(ValidateArgs {
            fields: flags("abc", "12", ""),
        })
        .unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["field"], "TERM");
        assert_eq!(value["kind"], "missing");
    }

    #[test]
    fn test_validate_accepts_good_inputs() {
        let value = run_validate(ValidateArgs {
            fields: flags("1000", "0", "2"),
        })
        .unwrap();
        assert_eq!(value, json!({ "valid": true }));
    }
}
