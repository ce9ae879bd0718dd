//! Scalar root finding for the comfort engine.
//!
//! This crate provides the one-dimensional solvers used by the comfort models:
//! a secant method that reports non-convergence as an explicit outcome, a
//! bisection method with a guaranteed iteration bound, the secant-then-bisection
//! combinator built from the two, and a Newton iteration with a fixed
//! finite-difference step.
//!
//! Every solver is generic over the error type of the evaluated function, so an
//! error raised while evaluating `f` reaches the caller unchanged.

pub mod bisection;
pub mod bracket;
pub mod error;
pub mod newton;
pub mod secant;

pub use bisection::bisection;
pub use bracket::secant_or_bisection;
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, newton_fixed_step};
pub use secant::{SecantConfig, SecantFailure, SecantOutcome, secant};

/// A located root and the number of function-driven iterations spent on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: f64,
    pub iterations: usize,
}

pub(crate) fn check_tolerance(tolerance: f64) -> SolverResult<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidArg {
            what: "tolerance must be positive and finite",
        })
    }
}

pub(crate) fn check_bracket(lower: f64, upper: f64) -> SolverResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(SolverError::InvalidArg {
            what: "bracket bounds must be finite",
        });
    }
    if lower >= upper {
        return Err(SolverError::InvalidArg {
            what: "bracket lower bound must be below upper bound",
        });
    }
    Ok(())
}
