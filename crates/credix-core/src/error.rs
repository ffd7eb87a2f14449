//! Error types for the Credix core crate.
//!
//! This module defines the error types used by the date, day-count, and
//! schedule layers, providing structured error handling with context.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid accrual schedule specification.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of what's wrong with the schedule.
        reason: String,
    },

    /// Day count calculation error.
    #[error("Day count error: {reason}")]
    DayCountError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates a day count error.
    #[must_use]
    pub fn day_count_error(reason: impl Into<String>) -> Self {
        Self::DayCountError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_schedule_error() {
        let err = CoreError::invalid_schedule("end before start");
        assert!(err.to_string().contains("Invalid schedule"));
    }
}
