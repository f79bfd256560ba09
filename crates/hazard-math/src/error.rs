//! Error types for root finding.

use thiserror::Error;

/// A specialized Result type for solver operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the hybrid root finder.
///
/// The first three variants describe a bad [`SolverConfig`] or guess and are
/// raised before the objective is evaluated. The others are calibration
/// failures.
///
/// [`SolverConfig`]: crate::solvers::SolverConfig
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Lower bound is not strictly below the upper bound.
    #[error("Invalid search bounds: lower {lower} must be below upper {upper}")]
    InvalidBounds {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// Initial guess lies outside the search bounds.
    #[error("Initial guess {guess} outside search bounds [{lower}, {upper}]")]
    GuessOutOfBounds {
        /// The rejected guess.
        guess: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// Accuracy, step or iteration settings are unusable.
    #[error("Invalid solver tolerance: {reason}")]
    InvalidTolerance {
        /// Description of the problem.
        reason: String,
    },

    /// Brent's method exhausted its iteration budget.
    #[error("Brent iteration did not converge after {iterations} iterations (residual: {residual:e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Objective value at the last midpoint.
        residual: f64,
    },

    /// Neither bound has an objective value of opposite sign to the guess.
    #[error(
        "Root not bracketed: f(guess) = {f_guess:e}, f(lower) = {f_lower:e}, f(upper) = {f_upper:e}"
    )]
    RootNotBracketed {
        /// Objective at the (last) guess.
        f_guess: f64,
        /// Objective at the lower bound.
        f_lower: f64,
        /// Objective at the upper bound.
        f_upper: f64,
    },

    /// A bracket against a bound was found but its midpoint did not converge.
    #[error("Bracket midpoint {midpoint} did not converge (residual: {residual:e})")]
    BracketNotResolved {
        /// The evaluated midpoint.
        midpoint: f64,
        /// Objective value at the midpoint.
        residual: f64,
    },
}

impl MathError {
    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid tolerance error.
    #[must_use]
    pub fn invalid_tolerance(reason: impl Into<String>) -> Self {
        Self::InvalidTolerance {
            reason: reason.into(),
        }
    }

    /// True when the error comes from the configuration or the guess rather
    /// than from the objective function.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBounds { .. } | Self::GuessOutOfBounds { .. } | Self::InvalidTolerance { .. }
        )
    }
}
