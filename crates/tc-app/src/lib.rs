//! Shared application service layer for thermocomfort.
//!
//! This crate sits between the comfort engine and its front-ends. It turns
//! loosely typed input columns into validated rows, loads and saves job files,
//! runs batches and extracts labelled output series.

pub mod align;
pub mod error;
pub mod job_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use align::{AlignedInputs, HEADER_LEN, InputColumns, InputKind, RawValue, SeriesHeader, align};
pub use error::{AppError, AppResult};
pub use job_service::{
    JobFile, JobFormat, load_job, parse_job, save_job, validate_job, validate_parameters,
};
pub use query::{
    OutputKind, OutputSeries, RunSummary, extract_series, get_run_summary, write_csv,
};
pub use run_service::{
    PointResponse, RunRequest, RunResponse, RunTimingSummary, evaluate_point, run, run_job_file,
};
