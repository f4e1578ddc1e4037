pub mod amortization;
pub mod error;
pub mod inputs;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "calculator")]
pub mod calculator;

pub use error::LoanCalcError;
pub use inputs::{LoanField, LoanInputs};
pub use types::*;
pub use validation::{LoanTerms, ValidationError, ValidationErrorKind};

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
