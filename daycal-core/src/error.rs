//! Error types for daycal.

use thiserror::Error;

/// Errors that can occur in daycal operations.
#[derive(Error, Debug)]
pub enum DayCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Day {day_of_year} does not exist in year {year}")]
    InvalidDay { year: i32, day_of_year: u32 },

    #[error("Timestamp {0} is outside the supported date range")]
    InvalidTimestamp(i64),

    #[error("Event '{0}' has neither an alert nor a start time")]
    Unscheduled(String),
}

impl From<serde_json::Error> for DayCalError {
    fn from(e: serde_json::Error) -> Self {
        DayCalError::Serialization(e.to_string())
    }
}

/// Result type alias for daycal operations.
pub type DayCalResult<T> = Result<T, DayCalError>;
