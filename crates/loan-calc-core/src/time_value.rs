use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Compound growth factor (1 + rate)^nper.
pub fn compound_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: format!("compound factor (1 + {rate})^{nper}"),
        })
}

/// Level payment that repays `principal` over `nper` periods at `rate` per
/// period: P·r / (1 − (1 + r)^−n).
///
/// A zero rate repays the principal in equal instalments. The payment is
/// returned as a positive amount; callers do not need a sign convention.
pub fn pmt(rate: Rate, nper: u32, principal: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::DivisionByZero {
            context: "payment over zero periods".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    // (1 + r)^-n underflows towards zero once (1 + r)^n leaves the decimal
    // range, and the payment tends to the interest-only P·r.
    let discount = match compound_factor(rate, nper) {
        Ok(factor) if factor.is_zero() => {
            return Err(LoanCalcError::DivisionByZero {
                context: "PMT discount factor".into(),
            });
        }
        Ok(factor) => Decimal::ONE / factor,
        Err(_) => Decimal::ZERO,
    };

    let annuity_factor = Decimal::ONE - discount;
    if annuity_factor.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(annuity_factor))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "monthly payment".into(),
        })
}
