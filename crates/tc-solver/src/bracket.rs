//! Secant search with a bisection safety net.

use crate::bisection::bisection;
use crate::error::SolverError;
use crate::secant::{SecantConfig, SecantOutcome, secant};
use crate::Root;

/// Try the secant method over `[lower, upper]`; if it does not converge, bisect
/// the same bracket with the same tolerance.
///
/// Errors raised by `f` abort the search in either phase. A bisection failure
/// (no sign change, non-finite residual) is returned as the error.
pub fn secant_or_bisection<F, E>(
    lower: f64,
    upper: f64,
    config: &SecantConfig,
    mut f: F,
) -> Result<Root, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    match secant(lower, upper, config, &mut f)? {
        SecantOutcome::Converged(root) => Ok(root),
        SecantOutcome::NotConverged(failure) => {
            tracing::debug!(?failure, lower, upper, "secant did not converge; bisecting");
            bisection(lower, upper, config.tolerance, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolverResult;
    use std::cell::Cell;

    /// Flat at -1 up to x = 25, then a unit-slope ramp crossing zero at 25.5.
    fn plateau_then_ramp(x: f64) -> f64 {
        if x < 25.0 { -1.0 } else { x - 25.5 }
    }

    #[test]
    fn smooth_function_uses_secant() {
        let config = SecantConfig::with_tolerance(1e-3);
        let root = secant_or_bisection(0.0, 40.0, &config, |x| SolverResult::Ok(x - 3.0)).unwrap();
        assert!((root.x - 3.0).abs() < 1e-3);
        assert_eq!(root.iterations, 1);
    }

    #[test]
    fn flat_region_falls_back_to_bisection() {
        let config = SecantConfig::with_tolerance(1e-3);

        let direct = secant(0.0, 40.0, &config, |x| SolverResult::Ok(plateau_then_ramp(x))).unwrap();
        assert!(matches!(direct, SecantOutcome::NotConverged(_)));

        let root =
            secant_or_bisection(0.0, 40.0, &config, |x| SolverResult::Ok(plateau_then_ramp(x)))
                .unwrap();
        assert!((root.x - 25.5).abs() <= 1e-3);
    }

    #[test]
    fn fallback_reuses_the_same_function() {
        let calls = Cell::new(0_usize);
        let config = SecantConfig::with_tolerance(1e-3);
        let root = secant_or_bisection(0.0, 40.0, &config, |x| {
            calls.set(calls.get() + 1);
            SolverResult::Ok(plateau_then_ramp(x))
        })
        .unwrap();
        assert!((root.x - 25.5).abs() <= 1e-3);
        // secant probes plus at most 2 + 15 bisection evaluations
        assert!(calls.get() > 2 && calls.get() < 40);
    }

    #[test]
    fn bisection_failure_is_fatal() {
        let config = SecantConfig::with_tolerance(1e-3);
        let err = secant_or_bisection(0.0, 40.0, &config, |_| SolverResult::Ok(-1.0)).unwrap_err();
        assert!(matches!(err, SolverError::NoSignChange { .. }));
    }
}
