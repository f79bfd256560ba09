//! Error types for calendar and convention handling.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building dates, tenors and schedules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or out-of-range calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string could not be parsed or applied.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The offending tenor text.
        tenor: String,
        /// Why it was rejected.
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

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2025-02-30");
        assert_eq!(err.to_string(), "Invalid date: 2025-02-30");

        let err = CoreError::invalid_tenor("5Q", "unknown unit 'Q'");
        assert!(err.to_string().contains("5Q"));
        assert!(err.to_string().contains("unknown unit"));
    }
}
