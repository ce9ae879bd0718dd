//! Error types for root-finding operations.

use tc_core::error::TcError;
use thiserror::Error;

/// Errors that can occur while solving scalar equations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No sign change over bracket [{lower}, {upper}]")]
    NoSignChange { lower: f64, upper: f64 },

    #[error("Convergence failed: {what} (after {iterations} iterations)")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for TcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidArg { what } => TcError::InvalidArg { what },
            SolverError::NoSignChange { .. } => TcError::InvalidArg {
                what: "bracket without sign change",
            },
            SolverError::ConvergenceFailed { what, .. } => TcError::Convergence { what },
            SolverError::Numeric { what: _ } => TcError::Invariant { what: "numeric" },
        }
    }
}
