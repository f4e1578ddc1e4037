use serde::{Deserialize, Serialize};

/// One of the three user-editable fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanField {
    Amount,
    Rate,
    Term,
}

impl LoanField {
    /// Fixed check order. Only the first failing field is ever reported.
    pub const ALL: [LoanField; 3] = [LoanField::Amount, LoanField::Rate, LoanField::Term];

    pub fn label(self) -> &'static str {
        match self {
            LoanField::Amount => "loan amount",
            LoanField::Rate => "annual interest rate (in percentage)",
            LoanField::Term => "loan term (in years)",
        }
    }
}

/// Raw text exactly as typed into the three input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    #[serde(default)]
    pub loan_amount: String,
    #[serde(default)]
    pub annual_rate_percent: String,
    #[serde(default)]
    pub term_years: String,
}

impl LoanInputs {
    pub fn new(
        loan_amount: impl Into<String>,
        annual_rate_percent: impl Into<String>,
        term_years: impl Into<String>,
    ) -> Self {
        Self {
            loan_amount: loan_amount.into(),
            annual_rate_percent: annual_rate_percent.into(),
            term_years: term_years.into(),
        }
    }

    pub fn get(&self, field: LoanField) -> &str {
        match field {
            LoanField::Amount => &self.loan_amount,
            LoanField::Rate => &self.annual_rate_percent,
            LoanField::Term => &self.term_years,
        }
    }

    pub fn set(&mut self, field: LoanField, value: impl Into<String>) {
        let slot = match field {
            LoanField::Amount => &mut self.loan_amount,
            LoanField::Rate => &mut self.annual_rate_percent,
            LoanField::Term => &mut self.term_years,
        };
        *slot = value.into();
    }

    /// A field counts as missing when nothing but whitespace was entered.
    pub fn is_missing(&self, field: LoanField) -> bool {
        self.get(field).trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_round_through_each_field() {
        let mut inputs = LoanInputs::default();
        inputs.set(LoanField::Amount, "1000000");
        inputs.set(LoanField::Rate, "12");
        inputs.set(LoanField::Term, "1");
        assert_eq!(inputs, LoanInputs::new("1000000", "12", "1"));
        assert_eq!(inputs.get(LoanField::Rate), "12");
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let inputs = LoanInputs::new("  ", "\t", "5");
        assert!(inputs.is_missing(LoanField::Amount));
        assert!(inputs.is_missing(LoanField::Rate));
        assert!(!inputs.is_missing(LoanField::Term));
    }

    #[test]
    fn test_deserialize_fills_absent_keys_with_empty() {
        let inputs: LoanInputs = serde_json::from_str(r#"{"loan_amount": "500"}"#).unwrap();
        assert_eq!(inputs.loan_amount, "500");
        assert!(inputs.annual_rate_percent.is_empty());
        assert!(inputs.term_years.is_empty());
    }

    #[test]
    fn test_field_serializes_as_upper_case() {
        let json = serde_json::to_string(&LoanField::Amount).unwrap();
        assert_eq!(json, "\"AMOUNT\"");
    }
}
