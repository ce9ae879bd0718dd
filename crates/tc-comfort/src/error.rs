//! Comfort engine errors.

use tc_core::TcError;
use tc_solver::SolverError;
use thiserror::Error;

/// Result type for comfort evaluations.
pub type EvalResult<T> = Result<T, ComfortError>;

/// Errors that can occur while evaluating a comfort index.
///
/// Every variant is fatal for the evaluation that raised it. The engine never
/// substitutes a placeholder value for a failed iteration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComfortError {
    /// A heat-balance iteration exceeded its cap.
    #[error("Convergence failed: {what} (after {iterations} iterations)")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },

    /// The cooling-effect search failed in both the secant and bisection phase.
    #[error("Root search failed: {0}")]
    Solver(#[from] SolverError),

    /// An index came out NaN or infinite.
    #[error("Numeric error: {0}")]
    Numeric(#[from] TcError),
}

impl From<ComfortError> for TcError {
    fn from(err: ComfortError) -> Self {
        match err {
            ComfortError::ConvergenceFailed { what, .. } => TcError::Convergence { what },
            ComfortError::Solver(e) => e.into(),
            ComfortError::Numeric(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComfortError::ConvergenceFailed {
            what: "clothing surface temperature",
            iterations: 151,
        };
        assert!(err.to_string().contains("clothing surface temperature"));
        assert!(err.to_string().contains("151"));
    }

    #[test]
    fn error_to_tc_error() {
        let err = ComfortError::Solver(SolverError::NoSignChange {
            lower: 0.0,
            upper: 40.0,
        });
        let tc: TcError = err.into();
        assert!(matches!(tc, TcError::InvalidArg { .. }));
    }
}
