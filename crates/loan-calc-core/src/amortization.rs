use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::inputs::LoanInputs;
use crate::time_value;
use crate::validation::{self, LoanTerms};
use crate::{types::*, LoanCalcError, LoanCalcResult};

/// Decimal places shown for every currency amount.
pub const DISPLAY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Full precision; not rounded for display.
    pub monthly_interest_rate: Rate,
    pub number_of_payments: u32,
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// Sum of all monthly payments.
    pub total_repayment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate, parse and price a loan straight from the raw input text.
pub fn compute(inputs: &LoanInputs) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let terms = validation::parse(inputs)?;
    compute_terms(&terms)
}

/// Price a loan with level monthly payments.
pub fn compute_terms(terms: &LoanTerms) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let monthly_rate = terms.monthly_interest_rate();
    let n = terms.number_of_payments;

    if monthly_rate.is_zero() {
        warnings.push("Zero interest rate: principal repaid in equal instalments".into());
    }

    let payment = time_value::pmt(monthly_rate, n, terms.principal)?;

    // Totals come from the unrounded payment.
    let total_repayment = payment
        .checked_mul(Decimal::from(n))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "total repayment".into(),
        })?;
    let total_interest = total_repayment - terms.principal;

    let result = LoanResult {
        monthly_interest_rate: monthly_rate,
        number_of_payments: n,
        monthly_payment: round_money(payment),
        total_interest: round_money(total_interest),
        total_repayment: round_money(total_repayment),
    };

    tracing::debug!(
        principal = %terms.principal,
        monthly_rate = %monthly_rate,
        payments = n,
        monthly_payment = %result.monthly_payment,
        "priced loan"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization, monthly compounding",
        terms,
        warnings,
        elapsed,
        result,
    ))
}

/// Round to [`DISPLAY_DP`] places, halves away from zero.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed-point text with exactly two decimals, e.g. `88848.79` or `0.50`.
pub fn format_money(value: Money) -> String {
    format!("{:.*}", DISPLAY_DP as usize, round_money(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_loan() {
        let out = compute(&LoanInputs::new("1000000", "12", "1")).unwrap();
        let r = &out.result;
        assert_eq!(r.monthly_interest_rate, dec!(0.01));
        assert_eq!(r.number_of_payments, 12);
        assert_eq!(r.monthly_payment, dec!(88848.79));
        assert_eq!(r.total_interest, dec!(66185.46));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_warns() {
        let out = compute(&LoanInputs::new("1200000", "0", "1")).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(100000));
        assert_eq!(out.result.total_interest, dec!(0));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_round_money_midpoint_goes_up() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_format_money_pads_to_two_places() {
        assert_eq!(format_money(dec!(0.5)), "0.50");
        assert_eq!(format_money(dec!(100000)), "100000.00");
        assert_eq!(format_money(dec!(88848.78867)), "88848.79");
    }

    #[test]
    fn test_metadata_carries_currency() {
        let out = compute(&LoanInputs::new("1000", "10", "1")).unwrap();
        assert_eq!(out.metadata.currency, "UGX");
        assert_eq!(out.assumptions["number_of_payments"], 12);
    }
}
