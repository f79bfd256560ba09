//! Bound fallback of the hybrid root finder.

use log::debug;

use super::{Evaluator, RootMethod, SamplePoints, SolverConfig};
use crate::error::MathError;

/// Last resort when the secant phase found neither a root nor a bracket.
///
/// Evaluates the lower bound, then the upper bound if the lower one does not
/// bracket against `x0`. A bound whose value is zero (or within accuracy near
/// `x0`) is returned directly. Otherwise the bracket midpoint is evaluated
/// once and must converge.
pub(crate) fn bound_fallback<F, E>(
    eval: &mut Evaluator<F>,
    mut p: SamplePoints,
    config: &SolverConfig,
) -> Result<(f64, f64, RootMethod), E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let lo = config.lower_bound;
    let hi = config.upper_bound;

    let f_lo = eval.eval(lo)?;
    if config.accepts(lo, f_lo, p.x0) {
        return Ok((lo, f_lo, RootMethod::LowerBound));
    }

    if p.f0 * f_lo < 0.0 {
        p.x2 = p.x0;
        p.f2 = p.f0;
        p.x0 = lo;
        p.f0 = f_lo;
    } else {
        let f_hi = eval.eval(hi)?;
        if config.accepts(hi, f_hi, p.x0) {
            return Ok((hi, f_hi, RootMethod::UpperBound));
        }
        if p.f0 * f_hi < 0.0 {
            p.x2 = hi;
            p.f2 = f_hi;
        } else {
            debug!("no sign change against either bound from x = {:e}", p.x0);
            return Err(MathError::RootNotBracketed {
                f_guess: p.f0,
                f_lower: f_lo,
                f_upper: f_hi,
            }
            .into());
        }
    }

    p.x1 = 0.5 * (p.x0 + p.x2);
    p.f1 = eval.eval(p.x1)?;
    if config.accepts(p.x1, p.f1, p.x0) {
        return Ok((p.x1, p.f1, RootMethod::BoundMidpoint));
    }

    Err(MathError::BracketNotResolved {
        midpoint: p.x1,
        residual: p.f1,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(f: impl Fn(f64) -> f64, x0: f64) -> SamplePoints {
        SamplePoints {
            x0,
            f0: f(x0),
            ..SamplePoints::default()
        }
    }

    #[test]
    fn test_root_at_lower_bound() {
        let f = |x: f64| x.sqrt();
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let (root, _, method) = bound_fallback(&mut eval, points(f, 0.25), &SolverConfig::default()).unwrap();
        assert_eq!(root, 0.0);
        assert_eq!(method, RootMethod::LowerBound);
        assert_eq!(eval.count(), 1);
    }

    #[test]
    fn test_root_at_upper_bound() {
        let config = SolverConfig::default().with_bounds(0.0, 2.0);
        let f = |x: f64| 2.0 - x;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let (root, _, method) = bound_fallback(&mut eval, points(f, 1.0), &config).unwrap();
        assert_eq!(root, 2.0);
        assert_eq!(method, RootMethod::UpperBound);
    }

    #[test]
    fn test_unresolved_midpoint_fails() {
        let f = |x: f64| x.sqrt() - 0.1;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let result = bound_fallback(&mut eval, points(f, 0.25), &SolverConfig::default());
        match result {
            Err(MathError::BracketNotResolved { midpoint, .. }) => assert_eq!(midpoint, 0.125),
            other => panic!("expected unresolved bracket, got {other:?}"),
        }
        assert_eq!(eval.count(), 2);
    }

    #[test]
    fn test_no_sign_change_fails() {
        let f = |x: f64| 1.0 + x;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let result = bound_fallback(&mut eval, points(f, 0.5), &SolverConfig::default());
        assert!(matches!(result, Err(MathError::RootNotBracketed { .. })));
        assert_eq!(eval.count(), 2);
    }

    #[test]
    fn test_midpoint_converges_on_tiny_interval() {
        // Root exactly at the midpoint of [0, 2e-10].
        let config = SolverConfig::default().with_bounds(0.0, 2e-10);
        let f = |x: f64| x - 1e-10;
        let mut eval = Evaluator::new(|x: f64| Ok::<_, MathError>(f(x)));
        let (root, _, method) = bound_fallback(&mut eval, points(f, 2e-10), &config).unwrap();
        assert_eq!(method, RootMethod::BoundMidpoint);
        assert_eq!(root, 1e-10);
    }
}
