//! Brent phase of the hybrid root finder.
//!
//! Inverse quadratic interpolation with a bisection fallback, as used by the
//! ISDA standard model. Every iteration also evaluates the bracket midpoint,
//! so each iteration costs up to two objective evaluations.

use log::debug;

use super::{Evaluator, SamplePoints, SolverConfig};
use crate::error::MathError;

/// Refines a bracket produced by the secant phase.
///
/// `bracket.x0` and `bracket.x1` must straddle the root, or `x1` and `x2`
/// must, in which case the first iteration swaps them into place. Returns the
/// root with its objective value.
pub(crate) fn brent<F, E>(
    eval: &mut Evaluator<F>,
    bracket: SamplePoints,
    config: &SolverConfig,
) -> Result<(f64, f64), E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let (mut x1, mut x2, mut x3) = (bracket.x0, bracket.x1, bracket.x2);
    let (mut f1, mut f2, mut f3) = (bracket.f0, bracket.f1, bracket.f2);

    for _ in 0..config.max_iterations {
        // Keep x1 and x2 on opposite sides of the root.
        if f2 * f1 > 0.0 {
            std::mem::swap(&mut x1, &mut x3);
            std::mem::swap(&mut f1, &mut f3);
        }

        let f21 = f2 - f1;
        let f32 = f3 - f2;
        let f31 = f3 - f1;
        let x21 = x2 - x1;
        let x31 = x3 - x1;
        let ratio = x31 / x21;

        if f3 * f31 < ratio * f2 * f21 || f21 == 0.0 || f31 == 0.0 || f32 == 0.0 {
            x3 = x2;
            f3 = f2;
        } else {
            let xm = x1 - (f1 / f21) * x21 + ((f1 * f2) / (f31 * f32)) * x31
                - ((f1 * f2) / (f21 * f32)) * x21;
            let fm = eval.eval(xm)?;
            if config.accepts(xm, fm, x1) {
                return Ok((xm, fm));
            }
            if fm * f1 < 0.0 {
                x3 = xm;
                f3 = fm;
            } else {
                x1 = xm;
                f1 = fm;
                x3 = x2;
                f3 = f2;
            }
        }

        x2 = 0.5 * (x1 + x3);
        f2 = eval.eval(x2)?;
        if config.accepts(x2, f2, x1) {
            return Ok((x2, f2));
        }
    }

    debug!("brent exhausted {} iterations at x = {x2:e}", config.max_iterations);
    Err(MathError::convergence_failed(config.max_iterations, f2).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn bracket(f: impl Fn(f64) -> f64, x0: f64, x1: f64, x2: f64) -> SamplePoints {
        SamplePoints {
            x0,
            f0: f(x0),
            x1,
            f1: f(x1),
            x2,
            f2: f(x2),
        }
    }

    #[test]
    fn test_cubic_root() {
        let f = |x: f64| x * x * x - 0.001;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let (root, _) = brent(&mut eval, bracket(f, 0.05, 0.3, 0.5), &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(root, 0.1, epsilon = 1e-9);
        assert!(f(root).abs() <= 1e-10);
    }

    #[test]
    fn test_exponential_root() {
        let f = |x: f64| (-x).exp() - 0.5;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let (root, _) = brent(&mut eval, bracket(f, 0.1, 1.0, 2.0), &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::LN_2, epsilon = 1e-9);
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let f = |x: f64| x * x * x - 0.001;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let config = SolverConfig::default().with_max_iterations(1);
        let result = brent(&mut eval, bracket(f, 0.05, 0.3, 0.5), &config);
        assert!(matches!(result, Err(MathError::ConvergenceFailed { iterations: 1, .. })));
        // One interpolation step plus one midpoint.
        assert_eq!(eval.count(), 2);
    }
}
