//! Run execution service.

use std::path::Path;
use std::time::Instant;
use tc_comfort::{
    BatchResult, ComfortAssessment, ComfortInputs, ComfortParameters, ComfortResult, assess,
    evaluate, evaluate_batch,
};

use crate::align::{AlignedInputs, InputColumns, InputKind, align};
use crate::error::AppResult;
use crate::job_service::{self, JobFile};

/// Request to evaluate a set of input columns.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    pub columns: &'a InputColumns,
    pub parameters: &'a ComfortParameters,
}

impl<'a> RunRequest<'a> {
    pub fn from_job(job: &'a JobFile) -> Self {
        Self {
            columns: &job.columns,
            parameters: &job.parameters,
        }
    }
}

/// Wall-clock timing of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub align_time_s: f64,
    pub evaluate_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub aligned: AlignedInputs,
    pub parameters: ComfortParameters,
    pub batch: BatchResult,
    pub timing: RunTimingSummary,
}

/// Align the request's columns and evaluate every row.
///
/// Alignment errors fail the run. Evaluation failures are per row and are
/// reported in [`BatchResult::failures`].
pub fn run(request: &RunRequest) -> AppResult<RunResponse> {
    job_service::validate_parameters(request.parameters)?;
    let started = Instant::now();
    let aligned = align(request.columns)?;
    let align_time_s = started.elapsed().as_secs_f64();

    let evaluate_started = Instant::now();
    let batch = evaluate_batch(&aligned.rows, request.parameters);
    let evaluate_time_s = evaluate_started.elapsed().as_secs_f64();

    tracing::info!(
        rows = aligned.len(),
        failed = batch.num_failed,
        evaluate_time_s,
        "run finished"
    );

    Ok(RunResponse {
        aligned,
        parameters: *request.parameters,
        batch,
        timing: RunTimingSummary {
            align_time_s,
            evaluate_time_s,
            total_time_s: started.elapsed().as_secs_f64(),
        },
    })
}

/// Load a job file and run it.
pub fn run_job_file(path: &Path) -> AppResult<RunResponse> {
    let job = job_service::load_job(path)?;
    run(&RunRequest::from_job(&job))
}

/// Result for a single scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResponse {
    pub inputs: ComfortInputs,
    pub result: ComfortResult,
    pub assessment: ComfortAssessment,
}

/// Validate and evaluate one scenario.
///
/// Unlike [`run`], an evaluation failure is returned as an error.
pub fn evaluate_point(
    inputs: &ComfortInputs,
    parameters: &ComfortParameters,
) -> AppResult<PointResponse> {
    job_service::validate_parameters(parameters)?;
    let columns = InputColumns::default()
        .with(InputKind::AirTemperature, [inputs.air_temperature])
        .with(InputKind::RadiantTemperature, [inputs.radiant_temperature])
        .with(InputKind::AirSpeed, [inputs.air_speed])
        .with(InputKind::RelativeHumidity, [inputs.relative_humidity])
        .with(InputKind::MetabolicRate, [inputs.metabolic_rate])
        .with(InputKind::ClothingInsulation, [inputs.clothing_insulation])
        .with(InputKind::ExternalWork, [inputs.external_work]);
    align(&columns)?;

    let result = evaluate(inputs, parameters)?;
    Ok(PointResponse {
        inputs: *inputs,
        result,
        assessment: assess(inputs, &result, parameters),
    })
}
