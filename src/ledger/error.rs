use chrono::{DateTime, Utc};
use thiserror::Error;

/// Rejections raised by entry validation, before the ledger is touched.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InvalidEntry {
    #[error("task name must not be empty")]
    EmptyTask,

    #[error("duration must not be negative, got {0} minutes")]
    NegativeDuration(i64),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LedgerError {
    #[error("an entry already exists at {0}")]
    DuplicateTimestamp(DateTime<Utc>),

    #[error("no entry exists at {0}")]
    NotFound(DateTime<Utc>),

    #[error(transparent)]
    Invalid(#[from] InvalidEntry),
}
