//! Query helpers for extracting output series from runs.

use serde::Serialize;
use std::io::Write;

use crate::align::{RawValue, SeriesHeader};
use crate::error::AppResult;
use crate::run_service::RunResponse;

/// An output quantity of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutputKind {
    Pmv,
    Ppd,
    Set,
    AdjustedAirTemperature,
    CoolingEffect,
    Comfortable,
    DiscomfortReason,
}

impl OutputKind {
    pub const ALL: [OutputKind; 7] = [
        OutputKind::Pmv,
        OutputKind::Ppd,
        OutputKind::Set,
        OutputKind::AdjustedAirTemperature,
        OutputKind::CoolingEffect,
        OutputKind::Comfortable,
        OutputKind::DiscomfortReason,
    ];

    /// Short column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pmv => "pmv",
            Self::Ppd => "ppd",
            Self::Set => "set",
            Self::AdjustedAirTemperature => "ta_adj",
            Self::CoolingEffect => "cooling_effect",
            Self::Comfortable => "comfortable",
            Self::DiscomfortReason => "discomfort_reason",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Data type and units written into output headers.
    pub fn header_labels(self) -> (&'static str, &'static str) {
        match self {
            Self::Pmv => ("Predicted Mean Vote", "PMV"),
            Self::Ppd => ("Percentage of People Dissatisfied", "%"),
            Self::Set => ("Standard Effective Temperature", "C"),
            Self::AdjustedAirTemperature => ("Adjusted Air Temperature", "C"),
            Self::CoolingEffect => ("Cooling Effect", "C"),
            Self::Comfortable => ("Comfortable Or Not", "0 = uncomfortable, 1 = comfortable"),
            Self::DiscomfortReason => (
                "Reason For Discomfort",
                "-2 = too dry, -1 = too cold, 0 = comfortable, 1 = too hot, 2 = too humid",
            ),
        }
    }
}

/// One output quantity over every row of a run. Failed rows are NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSeries {
    pub kind: OutputKind,
    pub header: Option<SeriesHeader>,
    pub values: Vec<f64>,
}

impl OutputSeries {
    /// Header entries (when present) followed by the values, the layout the
    /// input columns accept.
    pub fn to_raw(&self) -> Vec<RawValue> {
        let mut raw = Vec::with_capacity(self.values.len() + 7);
        if let Some(header) = &self.header {
            raw.extend(header.entries().into_iter().map(RawValue::from));
        }
        raw.extend(self.values.iter().copied().map(RawValue::from));
        raw
    }
}

/// Extract one output quantity, relabelling the run's input header if any.
pub fn extract_series(response: &RunResponse, kind: OutputKind) -> OutputSeries {
    let batch = &response.batch;
    let values = match kind {
        OutputKind::Pmv => batch.pmv(),
        OutputKind::Ppd => batch.ppd(),
        OutputKind::Set => batch.set(),
        OutputKind::AdjustedAirTemperature => batch.adjusted_air_temperature(),
        OutputKind::CoolingEffect => batch.cooling_effect(),
        OutputKind::Comfortable => batch
            .assessments
            .iter()
            .map(|a| a.map_or(f64::NAN, |a| if a.comfortable { 1.0 } else { 0.0 }))
            .collect(),
        OutputKind::DiscomfortReason => batch
            .assessments
            .iter()
            .map(|a| a.map_or(f64::NAN, |a| f64::from(a.reason.code())))
            .collect(),
    };

    let (data_type, units) = kind.header_labels();
    OutputSeries {
        kind,
        header: response
            .aligned
            .header
            .as_ref()
            .map(|h| h.relabel(data_type, units)),
        values,
    }
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub row_count: usize,
    pub successful: usize,
    pub failed: usize,
    pub comfortable: usize,
    /// Share of successful rows that are comfortable (%)
    pub percent_comfortable: f64,
}

pub fn get_run_summary(response: &RunResponse) -> RunSummary {
    let batch = &response.batch;
    let comfortable = batch
        .assessments
        .iter()
        .flatten()
        .filter(|a| a.comfortable)
        .count();
    let percent_comfortable = if batch.num_successful == 0 {
        0.0
    } else {
        100.0 * comfortable as f64 / batch.num_successful as f64
    };

    RunSummary {
        row_count: batch.len(),
        successful: batch.num_successful,
        failed: batch.num_failed,
        comfortable,
        percent_comfortable,
    }
}

/// Write inputs and outputs as CSV, one line per row. Failed rows have empty
/// output cells.
pub fn write_csv<W: Write>(response: &RunResponse, mut out: W) -> AppResult<()> {
    let outputs: Vec<OutputSeries> = OutputKind::ALL
        .iter()
        .map(|&kind| extract_series(response, kind))
        .collect();

    let mut columns = vec!["ta", "tr", "vel", "rh", "met", "clo", "wme"];
    columns.extend(outputs.iter().map(|s| s.kind.name()));
    writeln!(out, "{}", columns.join(","))?;

    for (i, row) in response.aligned.rows.iter().enumerate() {
        let mut cells: Vec<String> = [
            row.air_temperature,
            row.radiant_temperature,
            row.air_speed,
            row.relative_humidity,
            row.metabolic_rate,
            row.clothing_insulation,
            row.external_work,
        ]
        .iter()
        .map(|v| v.to_string())
        .collect();
        cells.extend(outputs.iter().map(|s| {
            let v = s.values[i];
            if v.is_nan() {
                String::new()
            } else {
                format!("{v:.4}")
            }
        }));
        writeln!(out, "{}", cells.join(","))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{InputColumns, InputKind};
    use crate::run_service::{RunRequest, run};
    use tc_comfort::ComfortParameters;

    fn office_run(columns: InputColumns) -> RunResponse {
        let params = ComfortParameters::default();
        run(&RunRequest {
            columns: &columns,
            parameters: &params,
        })
        .unwrap()
    }

    #[test]
    fn names_round_trip() {
        for kind in OutputKind::ALL {
            assert_eq!(OutputKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(OutputKind::from_name("nope"), None);
    }

    #[test]
    fn series_without_header() {
        let response = office_run(
            InputColumns::default().with(InputKind::AirTemperature, [22.0, 25.0]),
        );
        let pmv = extract_series(&response, OutputKind::Pmv);
        assert!(pmv.header.is_none());
        assert_eq!(pmv.values.len(), 2);
        assert!(pmv.values[0] < pmv.values[1]);
        assert_eq!(pmv.to_raw().len(), 2);
    }

    #[test]
    fn header_is_relabelled_on_outputs() {
        let mut air: Vec<RawValue> = [
            "key", "Sydney", "Dry Bulb Temperature", "C", "Hourly", "(1, 1, 1)", "(1, 1, 2)",
        ]
        .into_iter()
        .map(RawValue::from)
        .collect();
        air.extend([RawValue::from(24.0), RawValue::from(26.0)]);
        let response = office_run(InputColumns {
            air_temperature: air,
            ..InputColumns::default()
        });

        let pmv = extract_series(&response, OutputKind::Pmv);
        let header = pmv.header.clone().unwrap();
        assert_eq!(header.data_type, "Predicted Mean Vote");
        assert_eq!(header.units, "PMV");
        assert_eq!(header.location, "Sydney");

        let raw = pmv.to_raw();
        assert_eq!(raw.len(), 9);
        assert_eq!(raw[2], RawValue::from("Predicted Mean Vote"));
        assert_eq!(raw[7], RawValue::Number(pmv.values[0]));
    }

    #[test]
    fn reason_codes_and_summary() {
        // cold, comfortable, hot
        let response = office_run(
            InputColumns::default()
                .with(InputKind::AirTemperature, [18.0, 25.0, 32.0])
                .with(InputKind::MetabolicRate, [1.2])
                .with(InputKind::ClothingInsulation, [0.5])
                .with(InputKind::AirSpeed, [0.1]),
        );
        let reasons = extract_series(&response, OutputKind::DiscomfortReason);
        assert_eq!(reasons.values, vec![-1.0, 0.0, 1.0]);
        let comfortable = extract_series(&response, OutputKind::Comfortable);
        assert_eq!(comfortable.values, vec![0.0, 1.0, 0.0]);

        let summary = get_run_summary(&response);
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.comfortable, 1);
        assert!((summary.percent_comfortable - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn csv_has_one_line_per_row() {
        let response = office_run(
            InputColumns::default().with(InputKind::AirTemperature, [22.0, 23.0, 24.0]),
        );
        let mut buf = Vec::new();
        write_csv(&response, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ta,tr,vel,rh,met,clo,wme,pmv,ppd,set"));
        assert_eq!(lines[1].split(',').count(), 14);
    }
}
