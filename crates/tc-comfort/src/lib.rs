//! tc-comfort: thermal comfort indices for thermocomfort.
//!
//! Provides:
//! - Fanger PMV/PPD (ISO 7730, ASHRAE 55)
//! - Pierce two-node Standard Effective Temperature
//! - PMV at elevated air speed through the SET cooling effect
//! - Comfort assessment against PPD and humidity-ratio bounds
//! - Parallel batch evaluation
//!
//! # Example
//!
//! ```
//! use tc_comfort::{ComfortInputs, ComfortParameters, evaluate};
//!
//! let inputs = ComfortInputs::new(26.0, 26.0, 0.75, 80.0, 1.1, 0.5);
//! let result = evaluate(&inputs, &ComfortParameters::default()).unwrap();
//! assert!(result.cooling_effect > 0.0);
//! assert!(result.pmv < 0.0);
//! ```

pub mod assess;
pub mod batch;
pub mod elevated;
pub mod error;
pub mod pmv;
pub mod psychrometrics;
pub mod set;
pub mod types;

// Re-exports for ergonomics
pub use assess::{ComfortAssessment, DiscomfortReason, assess};
pub use batch::{BatchFailure, BatchResult, evaluate_batch};
pub use elevated::evaluate;
pub use error::{ComfortError, EvalResult};
pub use pmv::{comfort_pmv, comfort_pmv_for, find_ppd};
pub use psychrometrics::{humidity_ratio, saturated_vapor_pressure, saturated_vapor_pressure_kpa};
pub use set::{ThermoregulatoryState, pierce_set, pierce_set_for, simulate_exposure};
pub use types::{ComfortInputs, ComfortParameters, ComfortResult, PmvPpd};
