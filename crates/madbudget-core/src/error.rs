use madbudget_domain::{PeriodError, TransactionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid weekly budget: {0}")]
    InvalidBudget(f64),
    #[error("Invalid transaction {id}: amount {amount} must be non-negative")]
    InvalidTransaction { id: TransactionId, amount: f64 },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PeriodError> for CoreError {
    fn from(err: PeriodError) -> Self {
        CoreError::InvalidPeriod(err.to_string())
    }
}
