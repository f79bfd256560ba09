//! Curve types.
//!
//! - [`HazardRateCurve`]: piecewise-constant default intensity
//! - [`DiscountCurve`]: discount factor lookup, with [`FlatDiscountCurve`]
//!   and [`ZeroRateDiscountCurve`]

mod discount;
mod hazard;

pub use discount::{DiscountCurve, FlatDiscountCurve, ZeroRateDiscountCurve};
pub use hazard::HazardRateCurve;

use crate::error::{CurveError, CurveResult};

/// Checks that `values` are finite and strictly increasing.
pub(crate) fn check_strictly_increasing(values: &[f64]) -> CurveResult<()> {
    if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::invalid_curve(format!(
            "time at index {bad} is not finite"
        )));
    }
    for (i, pair) in values.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CurveError::non_monotonic(i + 1, pair[0], pair[1]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_strictly_increasing() {
        assert!(check_strictly_increasing(&[0.0, 0.5, 1.0]).is_ok());
        assert!(check_strictly_increasing(&[]).is_ok());
        assert_eq!(
            check_strictly_increasing(&[0.0, 1.0, 1.0]),
            Err(CurveError::non_monotonic(2, 1.0, 1.0))
        );
        assert!(check_strictly_increasing(&[0.0, f64::NAN]).is_err());
    }
}
