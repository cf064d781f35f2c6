use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum GapchinError {
    /// Participant with given ID not found
    #[error("Participant {0} not found")]
    ParticipantNotFound(String),

    /// A participant cannot be their own linked payer
    #[error("Participant {0} cannot be linked to themselves")]
    SelfLink(String),

    /// The chosen payer is itself linked to someone else
    #[error("Participant {0} is already linked to another payer")]
    LinkedPayerUnavailable(String),

    /// A participant with dependents cannot become a dependent
    #[error("Participant {0} has linked dependents")]
    HasDependents(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
