//! Interactive calculator session.
//!
//! Owns the three input fields, the last good [`LoanResult`] and the error
//! currently being surfaced. Presentation layers drive it with
//! [`LoanCalculator::set_field`], [`LoanCalculator::calculate`],
//! [`LoanCalculator::dismiss`] and [`LoanCalculator::clear`], then render
//! [`LoanCalculator::display`].

use serde::{Deserialize, Serialize};

use crate::amortization::{self, LoanResult};
use crate::inputs::{LoanField, LoanInputs};
use crate::types::CURRENCY_LABEL;
use crate::{LoanCalcError, LoanCalcResult};

/// Text shown for a total that has not been computed yet.
pub const ZERO_DISPLAY: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CalculatorState {
    #[default]
    Editing,
    Error(LoanCalcError),
}

/// Title and body of a dismissible notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl From<&LoanCalcError> for Notice {
    fn from(err: &LoanCalcError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.message(),
        }
    }
}

/// Everything a presentation layer needs to draw the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDisplay {
    pub currency: String,
    pub monthly_payment: String,
    pub total_interest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default)]
pub struct LoanCalculator {
    inputs: LoanInputs,
    result: Option<LoanResult>,
    state: CalculatorState,
}

impl LoanCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &LoanInputs {
        &self.inputs
    }

    /// Last successful result, kept across failed attempts.
    pub fn result(&self) -> Option<&LoanResult> {
        self.result.as_ref()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn error(&self) -> Option<&LoanCalcError> {
        match &self.state {
            CalculatorState::Error(err) => Some(err),
            CalculatorState::Editing => None,
        }
    }

    /// Replace the text of one field. Does not touch the result or state.
    pub fn set_field(&mut self, field: LoanField, text: impl Into<String>) {
        self.inputs.set(field, text);
    }

    /// Validate and price the current inputs.
    ///
    /// On failure the previous result stays in place and the session moves
    /// to [`CalculatorState::Error`].
    pub fn calculate(&mut self) -> LoanCalcResult<&LoanResult> {
        match amortization::compute(&self.inputs) {
            Ok(output) => {
                tracing::debug!(state = "editing", "calculation succeeded");
                self.state = CalculatorState::Editing;
                let result: &LoanResult = self.result.insert(output.result);
                Ok(result)
            }
            Err(err) => {
                tracing::debug!(state = "error", error = %err, "calculation rejected");
                self.state = CalculatorState::Error(err.clone());
                Err(err)
            }
        }
    }

    /// Hide the current notice. Returns it, or `None` if nothing was shown.
    pub fn dismiss(&mut self) -> Option<LoanCalcError> {
        match std::mem::take(&mut self.state) {
            CalculatorState::Error(err) => Some(err),
            CalculatorState::Editing => None,
        }
    }

    /// Back to empty inputs and zeroed totals, from any state.
    pub fn clear(&mut self) {
        let (inputs, result) = reset();
        self.inputs = inputs;
        self.result = result;
        self.state = CalculatorState::Editing;
    }

    pub fn display(&self) -> LoanDisplay {
        let (monthly_payment, total_interest) = match &self.result {
            Some(r) => (
                amortization::format_money(r.monthly_payment),
                amortization::format_money(r.total_interest),
            ),
            None => (ZERO_DISPLAY.to_string(), ZERO_DISPLAY.to_string()),
        };
        LoanDisplay {
            currency: CURRENCY_LABEL.to_string(),
            monthly_payment,
            total_interest,
            notice: self.error().map(Notice::from),
        }
    }
}

/// Default inputs and result of a fresh calculator.
pub fn reset() -> (LoanInputs, Option<LoanResult>) {
    (LoanInputs::default(), None)
}
