//! Scalar Newton iteration with a fixed finite-difference step.

use crate::Root;
use crate::error::SolverError;

/// Newton solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Forward-difference step used for the derivative
    pub step: f64,
    /// Convergence test on the update, `|x_new - x_old| <= tolerance`
    pub tolerance: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            step: 1e-4,
            tolerance: 1e-2,
            max_iterations: 100,
        }
    }
}

/// Solve `f(x) = 0` from `x0` with Newton's method.
///
/// The derivative is the forward difference `(f(x + step) - f(x)) / step`.
/// Convergence is judged on the size of the update, not on the residual.
pub fn newton_fixed_step<F, E>(x0: f64, config: &NewtonConfig, mut f: F) -> Result<Root, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    if !(config.step.is_finite() && config.step > 0.0) {
        return Err(SolverError::InvalidArg {
            what: "newton step must be positive and finite",
        }
        .into());
    }
    if !(config.tolerance.is_finite() && config.tolerance > 0.0) {
        return Err(SolverError::InvalidArg {
            what: "tolerance must be positive and finite",
        }
        .into());
    }

    let mut x_old = x0;
    for iteration in 1..=config.max_iterations {
        let err1 = f(x_old)?;
        let err2 = f(x_old + config.step)?;

        let x = x_old - config.step * err1 / (err2 - err1);
        if !x.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("newton update is not finite at x = {x_old}"),
            }
            .into());
        }

        let dx = x - x_old;
        x_old = x;
        if dx.abs() <= config.tolerance {
            return Ok(Root { x, iterations: iteration });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: "newton",
        iterations: config.max_iterations,
    }
    .into())
}
