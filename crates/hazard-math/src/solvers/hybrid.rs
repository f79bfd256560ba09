//! Entry point of the hybrid root finder.

use log::debug;

use super::bounds::bound_fallback;
use super::brent::brent;
use super::secant::{secant, SecantOutcome};
use super::{Evaluator, RootMethod, RootSolution, SamplePoints, SolverConfig};
use crate::error::MathError;

/// Finds a root of `objective` starting from `guess`.
///
/// The objective may fail; its error type only needs to absorb [`MathError`].
///
/// # Arguments
///
/// * `objective` - Function whose root is sought
/// * `guess` - Starting point, must lie inside the configured bounds
/// * `config` - Bounds, accuracies, iteration cap and initial step
///
/// # Errors
///
/// Configuration problems (inverted bounds, guess outside the bounds) are
/// reported before the objective is evaluated. Afterwards the search fails
/// with [`MathError::ConvergenceFailed`] when Brent's method runs out of
/// iterations, or with [`MathError::RootNotBracketed`] /
/// [`MathError::BracketNotResolved`] when the bound fallback cannot finish.
///
/// # Example
///
/// ```rust
/// use hazard_math::prelude::*;
///
/// let solution = find_root(|x| Ok::<_, MathError>(x - 0.02), 0.01, &SolverConfig::default()).unwrap();
/// assert!((solution.root - 0.02).abs() < 1e-10);
/// ```
pub fn find_root<F, E>(objective: F, guess: f64, config: &SolverConfig) -> Result<RootSolution, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    config.validate()?;
    let lo = config.lower_bound;
    let hi = config.upper_bound;
    if !config.contains(guess) {
        return Err(MathError::GuessOutOfBounds {
            guess,
            lower: lo,
            upper: hi,
        }
        .into());
    }

    let mut eval = Evaluator::new(objective);
    let finish = |eval: &Evaluator<F>, root: f64, residual: f64, method: RootMethod| RootSolution {
        root,
        residual,
        evaluations: eval.count(),
        method,
    };

    let x0 = guess;
    let f0 = eval.eval(x0)?;
    let x_acc = config.x_accuracy;
    if f0 == 0.0
        || (f0.abs() <= config.f_accuracy && ((lo - x0).abs() <= x_acc || (hi - x0).abs() <= x_acc))
    {
        return Ok(finish(&eval, x0, f0, RootMethod::InitialGuess));
    }

    let x2 = second_point(x0, config);
    let f2 = eval.eval(x2)?;
    if config.accepts(x2, f2, x0) {
        return Ok(finish(&eval, x2, f2, RootMethod::InitialStep));
    }

    let start = SamplePoints {
        x0,
        f0,
        x2,
        f2,
        ..SamplePoints::default()
    };

    match secant(&mut eval, start, config)? {
        SecantOutcome::Converged { root, residual } => {
            debug!("secant converged to {root:e} after {} evaluations", eval.count());
            Ok(finish(&eval, root, residual, RootMethod::Secant))
        }
        SecantOutcome::Bracketed(bracket) => {
            let (root, residual) = brent(&mut eval, bracket, config)?;
            debug!("brent converged to {root:e} after {} evaluations", eval.count());
            Ok(finish(&eval, root, residual, RootMethod::Brent))
        }
        SecantOutcome::NotBracketed(points) => {
            debug!("secant found no bracket, trying bounds [{lo:e}, {hi:e}]");
            let (root, residual, method) = bound_fallback(&mut eval, points, config)?;
            Ok(finish(&eval, root, residual, method))
        }
    }
}

/// Second sample point: one step above the guess, or below it when that
/// leaves the interval. Clamped into the bounds and pushed 1% of the span
/// away from the guess if clamping lands on it.
fn second_point(x0: f64, config: &SolverConfig) -> f64 {
    let lo = config.lower_bound;
    let hi = config.upper_bound;
    let step = config.effective_initial_step();

    let mut x2 = x0 + step;
    if x2 < lo || x2 > hi {
        x2 = (x0 - step).clamp(lo, hi);
        if x2 == x0 {
            x2 = if x2 == lo {
                lo + 0.01 * config.span()
            } else {
                hi - 0.01 * config.span()
            };
        }
    }
    x2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;

    fn solve(f: impl Fn(f64) -> f64, guess: f64, config: &SolverConfig) -> Result<RootSolution, MathError> {
        find_root(|x| Ok(f(x)), guess, config)
    }

    #[test]
    fn test_second_point() {
        let config = SolverConfig::default();
        assert_eq!(second_point(0.01, &config), 0.01 + 0.0005);

        let config = SolverConfig::default().with_bounds(0.0, 1.0);
        assert_eq!(second_point(1.0, &config), 1.0 - 0.0005);

        // Both directions leave [0, 1e-4]: clamp collapses onto the guess.
        let config = SolverConfig::default().with_bounds(0.0, 1e-4);
        assert_eq!(second_point(0.0, &config), 0.01 * 1e-4);
    }

    #[test]
    fn test_exact_guess_returns_immediately() {
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            Ok::<_, MathError>(x - 0.25)
        };
        let solution = find_root(f, 0.25, &SolverConfig::default()).unwrap();
        assert_eq!(solution.root, 0.25);
        assert_eq!(solution.method, RootMethod::InitialGuess);
        assert_eq!(solution.evaluations, 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_near_zero_at_bound_returns_guess() {
        let solution = solve(|x| x + 5e-11, 0.0, &SolverConfig::default()).unwrap();
        assert_eq!(solution.root, 0.0);
        assert_eq!(solution.method, RootMethod::InitialGuess);
    }

    #[test]
    fn test_inverted_bounds_never_evaluate() {
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            Ok::<_, MathError>(x)
        };
        let config = SolverConfig::default().with_bounds(10.0, 1.0);
        let result = find_root(f, 5.0, &config);
        assert!(matches!(result, Err(MathError::InvalidBounds { .. })));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_guess_below_bounds_rejected() {
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            Ok::<_, MathError>(x)
        };
        let result = find_root(f, -1.0, &SolverConfig::default());
        match result {
            Err(err @ MathError::GuessOutOfBounds { .. }) => assert!(err.is_configuration_error()),
            other => panic!("expected guess error, got {other:?}"),
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_linear_root() {
        let solution = solve(|x| 2.0 * (x - 0.3), 0.1, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(solution.root, 0.3, epsilon = 1e-10);
        assert!(solution.residual.abs() <= 1e-10);
    }

    #[test]
    fn test_cubic_root() {
        let solution = solve(|x| x * x * x - 0.001, 0.5, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(solution.root, 0.1, epsilon = 1e-9);
        assert!(solution.residual.abs() <= 1e-10);
    }

    #[test]
    fn test_root_at_lower_bound_via_fallback() {
        let solution = solve(f64::sqrt, 0.25, &SolverConfig::default()).unwrap();
        assert_eq!(solution.root, 0.0);
        assert_eq!(solution.method, RootMethod::LowerBound);
    }

    #[test]
    fn test_unsolvable_objective() {
        let result = solve(|x| 1.0 + x, 0.5, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::RootNotBracketed { .. })));
    }

    #[test]
    fn test_objective_error_propagates() {
        #[derive(Debug)]
        enum PricingError {
            Math(MathError),
            Failed,
        }
        impl From<MathError> for PricingError {
            fn from(err: MathError) -> Self {
                Self::Math(err)
            }
        }

        let result = find_root(
            |x| if x > 0.1 { Err(PricingError::Failed) } else { Ok(x - 0.3) },
            0.05,
            &SolverConfig::default(),
        );
        assert!(matches!(result, Err(PricingError::Failed)));

        let result = find_root(|x| Ok::<_, PricingError>(x), 0.05, &SolverConfig::default().with_bounds(1.0, 0.0));
        assert!(matches!(result, Err(PricingError::Math(MathError::InvalidBounds { .. }))));
    }
}
