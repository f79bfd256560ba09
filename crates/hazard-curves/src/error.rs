//! Error types for curve construction, pricing and calibration.

use hazard_core::{CoreError, Date};
use hazard_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur while building, pricing or calibrating curves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve nodes are malformed.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the problem.
        reason: String,
    },

    /// Node times or tenors are not strictly increasing.
    #[error("Non-monotonic times at index {index}: {prev} >= {current}")]
    NonMonotonicTimes {
        /// Index of the offending entry.
        index: usize,
        /// Previous value.
        prev: f64,
        /// Current value.
        current: f64,
    },

    /// Tenor and spread vectors disagree.
    #[error("Quote mismatch: {tenors} tenors but {spreads} spreads")]
    MismatchedQuotes {
        /// Number of tenors.
        tenors: usize,
        /// Number of spreads.
        spreads: usize,
    },

    /// Instrument definition is unusable.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of the problem.
        reason: String,
    },

    /// Solver configuration or initial guess rejected before any evaluation.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfiguration(#[source] MathError),

    /// The hazard rate for one tenor could not be solved.
    #[error("Calibration failed for tenor {index} maturing {maturity}: {source}")]
    CalibrationFailure {
        /// Zero-based tenor index.
        index: usize,
        /// Maturity of the calibration instrument.
        maturity: Date,
        /// Underlying solver failure.
        #[source]
        source: MathError,
    },

    /// Solver error outside a calibration step.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Date or tenor error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates a non-monotonic times error.
    #[must_use]
    pub fn non_monotonic(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTimes {
            index,
            prev,
            current,
        }
    }

    /// Attaches tenor context to a solver error raised while calibrating.
    ///
    /// Configuration errors stay configuration errors; everything else becomes
    /// a [`CurveError::CalibrationFailure`]. Non-solver errors pass through.
    #[must_use]
    pub fn in_calibration(self, index: usize, maturity: Date) -> Self {
        match self {
            Self::Math(err) if err.is_configuration_error() => Self::InvalidConfiguration(err),
            Self::Math(source) => Self::CalibrationFailure {
                index,
                maturity,
                source,
            },
            other => other,
        }
    }

    /// True for [`CurveError::CalibrationFailure`].
    #[must_use]
    pub fn is_calibration_failure(&self) -> bool {
        matches!(self, Self::CalibrationFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maturity() -> Date {
        Date::from_ymd(2030, 6, 20).unwrap()
    }

    #[test]
    fn test_calibration_context() {
        let err = CurveError::from(MathError::convergence_failed(100, 1e-3)).in_calibration(2, maturity());
        assert!(err.is_calibration_failure());
        let text = err.to_string();
        assert!(text.contains("tenor 2"));
        assert!(text.contains("2030-06-20"));
    }

    #[test]
    fn test_configuration_errors_not_wrapped() {
        let err = CurveError::from(MathError::InvalidBounds {
            lower: 10.0,
            upper: 1.0,
        })
        .in_calibration(0, maturity());
        assert!(matches!(err, CurveError::InvalidConfiguration(_)));
        assert!(!err.is_calibration_failure());
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = CurveError::invalid_curve("empty").in_calibration(0, maturity());
        assert_eq!(err, CurveError::invalid_curve("empty"));
    }
}
