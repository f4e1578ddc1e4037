use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inputs::{LoanField, LoanInputs};
use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Nothing was entered.
    Missing,
    /// Text was entered but it is not a number.
    NotANumber,
    /// A number that the payment formula cannot use.
    OutOfRange,
}

/// A single input problem, ready to be shown to the user as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{title}: {message}")]
pub struct ValidationError {
    pub field: LoanField,
    pub kind: ValidationErrorKind,
    pub title: String,
    pub message: String,
}

impl ValidationError {
    /// Build the error with the standard wording for `field` and `kind`.
    pub fn new(field: LoanField, kind: ValidationErrorKind) -> Self {
        let (title, message) = match (field, kind) {
            (LoanField::Amount, ValidationErrorKind::Missing) => {
                ("Loan Amount Missing", "loan amount is required")
            }
            (LoanField::Rate, ValidationErrorKind::Missing) => {
                ("Rate is Missing", "Yearly rate is required")
            }
            (LoanField::Term, ValidationErrorKind::Missing) => {
                ("Loan term is Missing", "Loan Term is required")
            }
            (LoanField::Amount, ValidationErrorKind::NotANumber) => {
                ("Loan Amount Invalid", "loan amount must be a number")
            }
            (LoanField::Rate, ValidationErrorKind::NotANumber) => {
                ("Rate is Invalid", "Yearly rate must be a number")
            }
            (LoanField::Term, ValidationErrorKind::NotANumber) => {
                ("Loan term is Invalid", "Loan Term must be a number")
            }
            (LoanField::Amount, ValidationErrorKind::OutOfRange) => {
                ("Loan Amount Out of Range", "loan amount must be greater than zero")
            }
            (LoanField::Rate, ValidationErrorKind::OutOfRange) => {
                ("Rate Out of Range", "Yearly rate cannot be negative")
            }
            (LoanField::Term, ValidationErrorKind::OutOfRange) => {
                ("Loan term Out of Range", "Loan Term must be greater than zero")
            }
        };
        Self {
            field,
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Standard title, custom body.
    pub fn with_message(
        field: LoanField,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            ..Self::new(field, kind)
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed terms
// ---------------------------------------------------------------------------

/// Inputs after parsing and range checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: Decimal,
    pub number_of_payments: u32,
}

impl LoanTerms {
    /// (annual % / 100) / 12, at full precision.
    pub fn monthly_interest_rate(&self) -> Rate {
        self.annual_rate_percent / PERCENT / MONTHS_PER_YEAR
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Report the first missing field, checking amount, rate, then term.
///
/// Only presence is checked here; see [`parse`] for number and range checks.
/// Unlike a plain emptiness test, a field holding only whitespace also
/// counts as missing.
pub fn validate(inputs: &LoanInputs) -> Result<(), ValidationError> {
    match LoanField::ALL
        .into_iter()
        .find(|field| inputs.is_missing(*field))
    {
        Some(field) => Err(ValidationError::new(field, ValidationErrorKind::Missing)),
        None => Ok(()),
    }
}

/// Turn raw inputs into typed [`LoanTerms`].
///
/// A missing field always wins over a malformed one, so two incomplete
/// attempts in a row report the same field the presentation layer saw first.
pub fn parse(inputs: &LoanInputs) -> Result<LoanTerms, ValidationError> {
    validate(inputs)?;

    let principal = parse_number(inputs, LoanField::Amount)?;
    if principal <= Decimal::ZERO {
        return Err(ValidationError::new(
            LoanField::Amount,
            ValidationErrorKind::OutOfRange,
        ));
    }

    let annual_rate_percent = parse_number(inputs, LoanField::Rate)?;
    if annual_rate_percent < Decimal::ZERO {
        return Err(ValidationError::new(
            LoanField::Rate,
            ValidationErrorKind::OutOfRange,
        ));
    }

    let term_years = parse_number(inputs, LoanField::Term)?;
    if term_years <= Decimal::ZERO {
        return Err(ValidationError::new(
            LoanField::Term,
            ValidationErrorKind::OutOfRange,
        ));
    }
    let number_of_payments = months_in(term_years)?;

    Ok(LoanTerms {
        principal,
        annual_rate_percent,
        term_years,
        number_of_payments,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_number(inputs: &LoanInputs, field: LoanField) -> Result<Decimal, ValidationError> {
    let text = inputs.get(field).trim();
    if !looks_numeric(text) {
        return Err(ValidationError::new(field, ValidationErrorKind::NotANumber));
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| {
            let name = match field {
                LoanField::Amount => "loan amount",
                LoanField::Rate => "Yearly rate",
                LoanField::Term => "Loan Term",
            };
            let problem = if text.contains("e-") || text.contains("E-") {
                "has too many decimal places"
            } else {
                "is too large"
            };
            ValidationError::with_message(
                field,
                ValidationErrorKind::OutOfRange,
                format!("{name} {problem}"),
            )
        })
}

/// Plain decimal or scientific notation: `[+-]digits[.digits][e[+-]digits]`.
/// Digit separators such as `_` or `,` are not numbers.
fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok =
        !(whole.is_empty() && frac.is_empty()) && all_digits(whole) && all_digits(frac);

    let exponent_ok = match exponent {
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            !digits.is_empty() && all_digits(digits)
        }
        None => true,
    };

    mantissa_ok && exponent_ok
}

fn months_in(term_years: Decimal) -> Result<u32, ValidationError> {
    let too_long = || {
        ValidationError::with_message(
            LoanField::Term,
            ValidationErrorKind::OutOfRange,
            "Loan Term is too long",
        )
    };

    let months = term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(too_long)?;
    if !months.fract().is_zero() {
        return Err(ValidationError::with_message(
            LoanField::Term,
            ValidationErrorKind::OutOfRange,
            "Loan Term must cover a whole number of months",
        ));
    }
    months.to_u32().ok_or_else(too_long)
}
