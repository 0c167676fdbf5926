//! Core error types for habit-core.
//!
//! Every error here is recoverable by the caller. `MalformedStorage` is only
//! produced for logging while loading; the store falls back to an empty
//! collection instead of returning it.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::habit::HabitId;

/// Core error type for habit-core.
#[derive(Error, Debug)]
pub enum HabitError {
    /// Name was blank after trimming
    #[error("habit name must not be empty")]
    EmptyName,

    /// No habit with the given id
    #[error("habit not found: {0}")]
    NotFound(HabitId),

    /// Custom duration without an end date
    #[error("custom duration requires an end date")]
    MissingEndDate,

    /// Bounded window whose end lies before its start
    #[error("invalid date range: end ({end}) is before start ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Completion toggle on a day that is view-only
    #[error("completion for {date} can no longer be changed")]
    NotEditable { date: NaiveDate },

    /// Persisted blob could not be parsed
    #[error("malformed habit storage: {0}")]
    MalformedStorage(String),

    /// IO errors from the blob store
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl HabitError {
    /// Whether the error comes from user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HabitError::EmptyName
                | HabitError::MissingEndDate
                | HabitError::InvalidDateRange { .. }
                | HabitError::NotEditable { .. }
        )
    }
}

/// Result type alias for HabitError
pub type Result<T, E = HabitError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(HabitError::EmptyName.is_validation());
        assert!(HabitError::MissingEndDate.is_validation());
        assert!(!HabitError::NotFound(HabitId::from("x")).is_validation());
        assert!(!HabitError::MalformedStorage("eof".into()).is_validation());
    }

    #[test]
    fn messages_name_the_offending_values() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let msg = HabitError::InvalidDateRange { start, end }.to_string();
        assert!(msg.contains("2024-06-10"));
        assert!(msg.contains("2024-06-01"));
    }
}
