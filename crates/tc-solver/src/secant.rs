//! Secant method with explicit non-convergence reporting.

use crate::error::SolverError;
use crate::{Root, check_bracket, check_tolerance};

/// Secant solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct SecantConfig {
    /// Residual tolerance, `|f(x)| < tolerance`
    pub tolerance: f64,
    /// Maximum iterations
    pub max_iterations: usize,
    /// Slopes with a magnitude at or below this are treated as flat
    pub min_slope: f64,
}

impl Default for SecantConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 100,
            min_slope: 1e-12,
        }
    }
}

impl SecantConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

/// Why the secant iteration gave up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecantFailure {
    /// Two successive estimates had (nearly) equal residuals.
    FlatSlope { at: f64 },
    /// The next estimate or its residual was NaN or infinite.
    NonFinite { at: f64 },
    /// `max_iterations` reached without meeting the tolerance.
    IterationLimit { last: f64, iterations: usize },
}

/// Result of a secant search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecantOutcome {
    Converged(Root),
    NotConverged(SecantFailure),
}

impl SecantOutcome {
    pub fn root(&self) -> Option<Root> {
        match self {
            Self::Converged(root) => Some(*root),
            Self::NotConverged(_) => None,
        }
    }
}

/// Find a root of `f` with the secant method, starting from the two bracket ends.
///
/// The iteration is not confined to the bracket. A non-converging search is an
/// `Ok(SecantOutcome::NotConverged(..))`; only invalid arguments and errors
/// raised by `f` are returned as `Err`.
pub fn secant<F, E>(
    lower: f64,
    upper: f64,
    config: &SecantConfig,
    mut f: F,
) -> Result<SecantOutcome, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    check_tolerance(config.tolerance)?;
    check_bracket(lower, upper)?;
    let eps = config.tolerance;

    let mut a = lower;
    let mut b = upper;

    let mut fa = f(a)?;
    if fa.abs() <= eps {
        return Ok(SecantOutcome::Converged(Root { x: a, iterations: 0 }));
    }
    let mut fb = f(b)?;
    if fb.abs() <= eps {
        return Ok(SecantOutcome::Converged(Root { x: b, iterations: 0 }));
    }
    if !fa.is_finite() || !fb.is_finite() {
        return Ok(SecantOutcome::NotConverged(SecantFailure::NonFinite {
            at: if fa.is_finite() { b } else { a },
        }));
    }

    for iteration in 1..=config.max_iterations {
        let slope = (fb - fa) / (b - a);
        if !slope.is_finite() {
            return Ok(SecantOutcome::NotConverged(SecantFailure::NonFinite { at: b }));
        }
        if slope.abs() <= config.min_slope {
            return Ok(SecantOutcome::NotConverged(SecantFailure::FlatSlope { at: b }));
        }

        let c = b - fb / slope;
        if !c.is_finite() {
            return Ok(SecantOutcome::NotConverged(SecantFailure::NonFinite { at: b }));
        }
        let fc = f(c)?;
        if !fc.is_finite() {
            return Ok(SecantOutcome::NotConverged(SecantFailure::NonFinite { at: c }));
        }
        if fc.abs() < eps {
            tracing::trace!(root = c, iteration, "secant converged");
            return Ok(SecantOutcome::Converged(Root {
                x: c,
                iterations: iteration,
            }));
        }

        a = b;
        b = c;
        fa = fb;
        fb = fc;
    }

    Ok(SecantOutcome::NotConverged(SecantFailure::IterationLimit {
        last: b,
        iterations: config.max_iterations,
    }))
}
