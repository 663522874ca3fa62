use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanLedgerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Loan not found: {loan_id}")]
    NotFound { loan_id: u64 },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanLedgerError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanLedgerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanLedgerError {
    fn from(e: serde_json::Error) -> Self {
        LoanLedgerError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "book")]
impl From<serde_yaml::Error> for LoanLedgerError {
    fn from(e: serde_yaml::Error) -> Self {
        LoanLedgerError::SerializationError(e.to_string())
    }
}
