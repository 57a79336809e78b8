use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinactiveError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Malformed field: {field} — '{value}' is not a number")]
    MalformedField { field: String, value: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Negative amount: {field} = {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("Income must be positive (got {value})")]
    InvalidIncome { value: Decimal },

    #[error("Expenses must be positive to size the emergency fund (got {value})")]
    InvalidExpenses { value: Decimal },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Coarse classification used by callers deciding how to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The record itself is malformed or incomplete.
    Validation,
    /// A denominator (income, expenses) is not usable.
    ArithmeticPrecondition,
    /// Decimal range exceeded.
    Overflow,
}

impl FinactiveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIncome { .. }
            | Self::InvalidExpenses { .. }
            | Self::DivisionByZero { .. } => ErrorKind::ArithmeticPrecondition,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::MissingField { .. }
            | Self::MalformedField { .. }
            | Self::InvalidInput { .. }
            | Self::NegativeAmount { .. }
            | Self::ClientNotFound(_)
            | Self::SerializationError(_) => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for FinactiveError {
    fn from(e: serde_json::Error) -> Self {
        FinactiveError::SerializationError(e.to_string())
    }
}
