//! Hybrid root finder used for hazard-rate calibration.
//!
//! [`find_root`] runs three phases over a shared set of sample points:
//!
//! 1. **Secant** ([`secant`]) starting from the guess and one step away from it
//! 2. **Brent** ([`brent`]) once the secant phase has found a sign change
//! 3. **Bounds** ([`bounds`]) when the secant phase leaves the search interval
//!    or runs out of iterations without a bracket
//!
//! All numeric policy lives in an immutable [`SolverConfig`].

pub mod bounds;
pub mod brent;
mod hybrid;
pub mod secant;

pub use hybrid::find_root;
pub use secant::SecantOutcome;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default lower bound of the search interval.
pub const DEFAULT_LOWER_BOUND: f64 = 0.0;

/// Default upper bound of the search interval.
pub const DEFAULT_UPPER_BOUND: f64 = 1e10;

/// Default absolute accuracy on `x` and on the objective.
pub const DEFAULT_ACCURACY: f64 = 1e-10;

/// Default iteration cap for each of the secant and Brent phases.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default distance between the guess and the second sample point.
pub const DEFAULT_INITIAL_STEP: f64 = 0.0005;

/// Numeric policy for [`find_root`].
///
/// The defaults match the ISDA standard model and should not be changed when
/// numerical parity with other ISDA implementations matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lower bound of the search interval.
    pub lower_bound: f64,
    /// Upper bound of the search interval.
    pub upper_bound: f64,
    /// Absolute accuracy on the root.
    pub x_accuracy: f64,
    /// Absolute accuracy on the objective value.
    pub f_accuracy: f64,
    /// Iteration cap per phase.
    pub max_iterations: u32,
    /// Initial step from the guess. Zero means 1% of the bound span.
    pub initial_step: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            x_accuracy: DEFAULT_ACCURACY,
            f_accuracy: DEFAULT_ACCURACY,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_step: DEFAULT_INITIAL_STEP,
        }
    }
}

impl SolverConfig {
    /// Sets the search interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the accuracy on `x`.
    #[must_use]
    pub fn with_x_accuracy(mut self, accuracy: f64) -> Self {
        self.x_accuracy = accuracy;
        self
    }

    /// Sets the accuracy on the objective value.
    #[must_use]
    pub fn with_f_accuracy(mut self, accuracy: f64) -> Self {
        self.f_accuracy = accuracy;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the initial step.
    #[must_use]
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    /// Width of the search interval.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// The configured step, or 1% of the span when it is zero.
    #[must_use]
    pub fn effective_initial_step(&self) -> f64 {
        if self.initial_step == 0.0 {
            0.01 * self.span()
        } else {
            self.initial_step
        }
    }

    /// True when `x` lies inside the closed search interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower_bound && x <= self.upper_bound
    }

    /// Checks the configuration without evaluating anything.
    pub fn validate(&self) -> MathResult<()> {
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(MathError::invalid_tolerance("search bounds must be finite"));
        }
        if self.lower_bound >= self.upper_bound {
            return Err(MathError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        if !(self.x_accuracy > 0.0) || !(self.f_accuracy > 0.0) {
            return Err(MathError::invalid_tolerance(format!(
                "accuracies must be positive (x: {}, f: {})",
                self.x_accuracy, self.f_accuracy
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_tolerance("max_iterations must be at least 1"));
        }
        if !(self.initial_step >= 0.0) || !self.initial_step.is_finite() {
            return Err(MathError::invalid_tolerance(format!(
                "initial_step must be finite and non-negative, got {}",
                self.initial_step
            )));
        }
        Ok(())
    }

    /// Converged if the value is exactly zero, or small and close to `anchor`.
    #[inline]
    pub(crate) fn accepts(&self, x: f64, fx: f64, anchor: f64) -> bool {
        fx == 0.0 || (fx.abs() <= self.f_accuracy && (x - anchor).abs() <= self.x_accuracy)
    }
}

/// Phase of [`find_root`] that produced the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootMethod {
    /// The guess itself.
    InitialGuess,
    /// The second sample point.
    InitialStep,
    /// A secant iterate.
    Secant,
    /// A Brent iterate or midpoint.
    Brent,
    /// The lower search bound.
    LowerBound,
    /// The upper search bound.
    UpperBound,
    /// Midpoint of a bracket formed against a bound.
    BoundMidpoint,
}

/// Root returned by [`find_root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// The root.
    pub root: f64,
    /// Objective value at the root.
    pub residual: f64,
    /// Number of objective evaluations performed.
    pub evaluations: u32,
    /// Phase that produced the root.
    pub method: RootMethod,
}

/// The three `(x, f(x))` samples carried across phases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SamplePoints {
    /// First sample.
    pub x0: f64,
    /// Objective at `x0`.
    pub f0: f64,
    /// Second sample.
    pub x1: f64,
    /// Objective at `x1`.
    pub f1: f64,
    /// Third sample.
    pub x2: f64,
    /// Objective at `x2`.
    pub f2: f64,
}

impl SamplePoints {
    pub(crate) fn swap_01(&mut self) {
        std::mem::swap(&mut self.x0, &mut self.x1);
        std::mem::swap(&mut self.f0, &mut self.f1);
    }

    pub(crate) fn swap_02(&mut self) {
        std::mem::swap(&mut self.x0, &mut self.x2);
        std::mem::swap(&mut self.f0, &mut self.f2);
    }

    pub(crate) fn swap_12(&mut self) {
        std::mem::swap(&mut self.x1, &mut self.x2);
        std::mem::swap(&mut self.f1, &mut self.f2);
    }
}

/// Objective wrapper counting evaluations.
pub(crate) struct Evaluator<F> {
    objective: F,
    count: u32,
}

impl<F> Evaluator<F> {
    pub(crate) fn new(objective: F) -> Self {
        Self { objective, count: 0 }
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn eval<E>(&mut self, x: f64) -> Result<f64, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        self.count += 1;
        let fx = (self.objective)(x)?;
        trace!("objective #{}: f({x:e}) = {fx:e}", self.count);
        Ok(fx)
    }
}
