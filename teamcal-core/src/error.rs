//! Error types for teamcal.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur in teamcal operations.
#[derive(Error, Debug)]
pub enum TeamCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event '{id}' ends before it starts ({start} > {end})")]
    InvalidEventRange {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Event id '{0}' appears more than once")]
    DuplicateEventId(String),

    #[error("Day window must span exactly 24 hours ({start} .. {end})")]
    InvalidDayWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for teamcal operations.
pub type TeamCalResult<T> = Result<T, TeamCalError>;
