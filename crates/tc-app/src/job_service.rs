//! Job file loading, saving and validation.
//!
//! A job file is YAML or JSON, chosen by extension:
//!
//! ```yaml
//! name: office
//! parameters:
//!   ppd_comfort_threshold: 10.0
//!   still_air_threshold: 0.1
//! columns:
//!   air_temperature: [22.0, 24.0, 26.0]
//!   air_speed: [0.1]
//!   relative_humidity: [50.0]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tc_comfort::ComfortParameters;

use crate::align::InputColumns;
use crate::error::{AppError, AppResult};

/// A batch of comfort scenarios with the model settings to evaluate them under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: ComfortParameters,
    #[serde(default)]
    pub columns: InputColumns,
}

/// On-disk encoding of a job file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Yaml,
    Json,
}

impl JobFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load and validate a job file.
pub fn load_job(path: &Path) -> AppResult<JobFile> {
    let format = JobFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::JobFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let job = parse_job(&content, format)?;
    validate_job(&job)?;
    tracing::info!(path = %path.display(), "loaded job file");
    Ok(job)
}

/// Parse job text in the given format without touching the filesystem.
pub fn parse_job(content: &str, format: JobFormat) -> AppResult<JobFile> {
    let job = match format {
        JobFormat::Yaml => serde_yaml::from_str(content)?,
        JobFormat::Json => serde_json::from_str(content)?,
    };
    Ok(job)
}

/// Validate and save a job file.
pub fn save_job(path: &Path, job: &JobFile) -> AppResult<()> {
    validate_job(job)?;
    let content = match JobFormat::from_path(path)? {
        JobFormat::Yaml => serde_yaml::to_string(job)?,
        JobFormat::Json => serde_json::to_string_pretty(job)?,
    };

    std::fs::write(path, content).map_err(|e| AppError::JobFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Check the model settings. Column contents are checked during alignment.
pub fn validate_job(job: &JobFile) -> AppResult<()> {
    validate_parameters(&job.parameters)
}

/// Check comfort parameters however they were supplied.
pub fn validate_parameters(p: &ComfortParameters) -> AppResult<()> {
    if !(p.ppd_comfort_threshold.is_finite() && p.ppd_comfort_threshold > 0.0) {
        return Err(AppError::Validation(format!(
            "ppd_comfort_threshold must be positive, got {}",
            p.ppd_comfort_threshold
        )));
    }
    if !(p.still_air_threshold.is_finite() && p.still_air_threshold >= 0.0) {
        return Err(AppError::Validation(format!(
            "still_air_threshold must be non-negative, got {}",
            p.still_air_threshold
        )));
    }
    if !(p.humidity_ratio_lower < p.humidity_ratio_upper) {
        return Err(AppError::Validation(format!(
            "humidity_ratio_lower ({}) must be below humidity_ratio_upper ({})",
            p.humidity_ratio_lower, p.humidity_ratio_upper
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::RawValue;

    #[test]
    fn format_from_extension() {
        assert_eq!(JobFormat::from_path(Path::new("a/job.yaml")).unwrap(), JobFormat::Yaml);
        assert_eq!(JobFormat::from_path(Path::new("job.YML")).unwrap(), JobFormat::Yaml);
        assert_eq!(JobFormat::from_path(Path::new("job.json")).unwrap(), JobFormat::Json);
        assert!(matches!(
            JobFormat::from_path(Path::new("job.csv")),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn yaml_mixes_numbers_and_text() {
        let yaml = r#"
columns:
  air_temperature: [22, "23.5", 25.0]
  metabolic_rate: [1.2]
"#;
        let job = parse_job(yaml, JobFormat::Yaml).unwrap();
        assert_eq!(job.parameters, ComfortParameters::default());
        assert_eq!(job.columns.air_temperature.len(), 3);
        assert_eq!(job.columns.air_temperature[0].to_number(), Some(22.0));
        assert_eq!(job.columns.air_temperature[1], RawValue::Text("23.5".into()));
        assert!(job.columns.air_speed.is_empty());
    }

    #[test]
    fn json_partial_parameters() {
        let json = r#"{"parameters": {"still_air_threshold": 0.15}, "columns": {}}"#;
        let job = parse_job(json, JobFormat::Json).unwrap();
        assert_eq!(job.parameters.still_air_threshold, 0.15);
        assert_eq!(job.parameters.ppd_comfort_threshold, 10.0);
    }

    #[test]
    fn malformed_yaml_is_a_job_error() {
        let err = parse_job("columns: [", JobFormat::Yaml).unwrap_err();
        assert!(matches!(err, AppError::Job(_)));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut job = JobFile::default();
        job.parameters.humidity_ratio_lower = 0.05;
        assert!(matches!(validate_job(&job), Err(AppError::Validation(_))));

        let mut job = JobFile::default();
        job.parameters.still_air_threshold = -0.1;
        assert!(validate_job(&job).is_err());

        assert!(validate_job(&JobFile::default()).is_ok());
    }
}
