use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanCalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    /// Short heading for a user-facing notice.
    pub fn title(&self) -> &str {
        match self {
            LoanCalcError::Validation(e) => &e.title,
            LoanCalcError::DivisionByZero { .. } => "Calculation Failed",
            LoanCalcError::Overflow { .. } => "Numbers Too Large",
            LoanCalcError::SerializationError(_) => "Invalid Data",
        }
    }

    /// Body text for a user-facing notice.
    pub fn message(&self) -> String {
        match self {
            LoanCalcError::Validation(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            LoanCalcError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
