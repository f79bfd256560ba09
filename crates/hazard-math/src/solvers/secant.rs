//! Secant phase of the hybrid root finder.

use log::debug;

use super::{Evaluator, SamplePoints, SolverConfig};

/// Result of the secant phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecantOutcome {
    /// A secant iterate converged.
    Converged {
        /// The converged iterate.
        root: f64,
        /// Objective value at `root`.
        residual: f64,
    },
    /// The samples straddle a root and are ordered for Brent's method.
    Bracketed(SamplePoints),
    /// An iterate left the search interval, or the iterations ran out while
    /// every sample kept the same sign.
    NotBracketed(SamplePoints),
}

/// Runs up to `max_iterations` secant steps from `(x0, f0)` and `(x2, f2)`.
///
/// Before each step the samples are swapped so that `|f0| <= |f2|`. When
/// `|f0 - f2|` is within the objective accuracy the denominator is replaced
/// by `±f_accuracy`, keeping the sign of the step.
pub(crate) fn secant<F, E>(
    eval: &mut Evaluator<F>,
    mut p: SamplePoints,
    config: &SolverConfig,
) -> Result<SecantOutcome, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let facc = config.f_accuracy;

    for iteration in 0..config.max_iterations {
        if p.f0.abs() > p.f2.abs() {
            p.swap_02();
        }

        let dx = if (p.f0 - p.f2).abs() <= facc {
            if p.f0 - p.f2 > 0.0 {
                -p.f0 * (p.x0 - p.x2) / facc
            } else {
                p.f0 * (p.x0 - p.x2) / facc
            }
        } else {
            (p.x2 - p.x0) * p.f0 / (p.f0 - p.f2)
        };

        p.x1 = p.x0 + dx;
        if !config.contains(p.x1) {
            debug!("secant iterate {:e} left bounds after {iteration} steps", p.x1);
            return Ok(SecantOutcome::NotBracketed(p));
        }

        p.f1 = eval.eval(p.x1)?;
        if config.accepts(p.x1, p.f1, p.x0) {
            return Ok(SecantOutcome::Converged {
                root: p.x1,
                residual: p.f1,
            });
        }

        let all_negative = p.f0 < 0.0 && p.f1 < 0.0 && p.f2 < 0.0;
        let all_positive = p.f0 > 0.0 && p.f1 > 0.0 && p.f2 > 0.0;
        if all_negative || all_positive {
            // Drop the worse of the two old samples.
            if p.f0.abs() > p.f1.abs() {
                p.x2 = p.x0;
                p.f2 = p.f0;
                p.x0 = p.x1;
                p.f0 = p.f1;
            } else {
                p.x2 = p.x1;
                p.f2 = p.f1;
            }
            continue;
        }

        if p.f0 * p.f2 > 0.0 {
            if p.x1 < p.x0 {
                p.swap_01();
            } else {
                p.swap_12();
            }
        }
        debug!("secant bracketed root after {} steps", iteration + 1);
        return Ok(SecantOutcome::Bracketed(p));
    }

    Ok(SecantOutcome::NotBracketed(p))
}
