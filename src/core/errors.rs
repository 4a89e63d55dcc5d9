use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: &str, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.to_string(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Unknown party: {0}")]
    UnknownParty(String),
    /// Transient storage failure, safe to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl LedgerError {
    pub fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }

    /// Whether the failed operation may succeed if attempted again.
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::StorageUnavailable(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                LedgerError::StorageUnavailable(err.to_string())
            }
            _ => LedgerError::StorageError(err.to_string()),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::StorageError(format!("CSV error: {}", err))
    }
}
