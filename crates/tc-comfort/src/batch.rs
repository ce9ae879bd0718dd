//! Parallel evaluation over many scenarios.

use crate::assess::{ComfortAssessment, assess};
use crate::elevated::evaluate;
use crate::error::ComfortError;
use crate::types::{ComfortInputs, ComfortParameters, ComfortResult};
use rayon::prelude::*;

/// A failed element of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub index: usize,
    pub error: ComfortError,
}

/// Results of a batch, index-aligned with the inputs.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// One entry per input; `None` where the evaluation failed
    pub results: Vec<Option<ComfortResult>>,
    /// Comfort verdicts for the successful entries
    pub assessments: Vec<Option<ComfortAssessment>>,
    /// Failed entries in input order
    pub failures: Vec<BatchFailure>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// PMV per input, NaN where the evaluation failed.
    pub fn pmv(&self) -> Vec<f64> {
        self.series(|r| r.pmv)
    }

    /// PPD per input, NaN where the evaluation failed.
    pub fn ppd(&self) -> Vec<f64> {
        self.series(|r| r.ppd)
    }

    /// SET per input, NaN where the evaluation failed.
    pub fn set(&self) -> Vec<f64> {
        self.series(|r| r.set)
    }

    pub fn adjusted_air_temperature(&self) -> Vec<f64> {
        self.series(|r| r.adjusted_air_temperature)
    }

    pub fn cooling_effect(&self) -> Vec<f64> {
        self.series(|r| r.cooling_effect)
    }

    fn series(&self, field: impl Fn(&ComfortResult) -> f64) -> Vec<f64> {
        self.results
            .iter()
            .map(|r| r.as_ref().map_or(f64::NAN, &field))
            .collect()
    }
}

/// Evaluate every scenario in parallel, preserving input order.
///
/// A failing element does not stop the others; it is recorded in
/// [`BatchResult::failures`].
pub fn evaluate_batch(inputs: &[ComfortInputs], parameters: &ComfortParameters) -> BatchResult {
    tracing::info!(count = inputs.len(), "evaluating comfort batch");

    let outcomes: Vec<Result<ComfortResult, ComfortError>> =
        inputs.par_iter().map(|input| evaluate(input, parameters)).collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut assessments = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for (index, (outcome, input)) in outcomes.into_iter().zip(inputs).enumerate() {
        match outcome {
            Ok(result) => {
                assessments.push(Some(assess(input, &result, parameters)));
                results.push(Some(result));
            }
            Err(error) => {
                tracing::warn!(index, %error, "comfort evaluation failed");
                results.push(None);
                assessments.push(None);
                failures.push(BatchFailure { index, error });
            }
        }
    }

    let num_failed = failures.len();
    BatchResult {
        num_successful: results.len() - num_failed,
        num_failed,
        results,
        assessments,
        failures,
    }
}
