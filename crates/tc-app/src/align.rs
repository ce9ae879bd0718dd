//! Alignment of list-valued comfort inputs.
//!
//! Each of the seven input columns may be empty (the default applies), hold a
//! single value (applied to every row) or hold one value per row. All
//! multi-value columns must share a length.
//!
//! A column may start with a seven-entry metadata header,
//! `[key, location, data type, units, frequency, start, end]`. It is
//! recognised when the third entry names the column's data type, e.g.
//! "Dry Bulb Temperature" for either temperature column.

use serde::{Deserialize, Serialize};
use std::fmt;
use tc_comfort::ComfortInputs;

use crate::error::{AppError, AppResult};

/// Number of entries in a metadata header.
pub const HEADER_LEN: usize = 7;

/// A raw column entry as read from a job file or the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric value, parsing text if needed.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// The seven comfort input columns, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    AirTemperature,
    RadiantTemperature,
    AirSpeed,
    RelativeHumidity,
    MetabolicRate,
    ClothingInsulation,
    ExternalWork,
}

impl InputKind {
    pub const ALL: [InputKind; 7] = [
        InputKind::AirTemperature,
        InputKind::RadiantTemperature,
        InputKind::AirSpeed,
        InputKind::RelativeHumidity,
        InputKind::MetabolicRate,
        InputKind::ClothingInsulation,
        InputKind::ExternalWork,
    ];

    /// Human-readable column name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::AirTemperature => "air temperature",
            Self::RadiantTemperature => "radiant temperature",
            Self::AirSpeed => "air speed",
            Self::RelativeHumidity => "relative humidity",
            Self::MetabolicRate => "metabolic rate",
            Self::ClothingInsulation => "clothing insulation",
            Self::ExternalWork => "external work",
        }
    }

    /// Text a header's data-type entry must contain for this column.
    pub fn data_type(self) -> &'static str {
        match self {
            Self::AirTemperature | Self::RadiantTemperature => "Temperature",
            Self::AirSpeed => "Wind Speed",
            Self::RelativeHumidity => "Humidity",
            Self::MetabolicRate => "Metabolic",
            Self::ClothingInsulation => "Clothing",
            Self::ExternalWork => "Work",
        }
    }

    /// Value used for an empty column. The radiant temperature instead
    /// follows the air temperature column.
    pub fn default_value(self) -> f64 {
        let d = ComfortInputs::default();
        match self {
            Self::AirTemperature => d.air_temperature,
            Self::RadiantTemperature => d.radiant_temperature,
            Self::AirSpeed => d.air_speed,
            Self::RelativeHumidity => d.relative_humidity,
            Self::MetabolicRate => d.metabolic_rate,
            Self::ClothingInsulation => d.clothing_insulation,
            Self::ExternalWork => d.external_work,
        }
    }

    fn check(self, value: f64) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{value} is not a finite number"));
        }
        match self {
            Self::AirSpeed if value < 0.0 => Err(format!("{value} m/s is negative")),
            Self::RelativeHumidity if !(0.0..=100.0).contains(&value) => {
                Err(format!("{value} % is outside [0, 100]"))
            }
            Self::MetabolicRate if value <= 0.0 => Err(format!("{value} met is not positive")),
            Self::ClothingInsulation if value < 0.0 => Err(format!("{value} clo is negative")),
            _ => Ok(()),
        }
    }
}

/// Metadata header carried by a column and copied onto output series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesHeader {
    pub key: String,
    pub location: String,
    pub data_type: String,
    pub units: String,
    pub frequency: String,
    pub start: String,
    pub end: String,
}

impl SeriesHeader {
    /// Header at the start of `column`, if its third entry names `data_type`.
    pub fn detect(column: &[RawValue], data_type: &str) -> Option<Self> {
        match column.get(2) {
            Some(RawValue::Text(t)) if t.contains(data_type) => {}
            _ => return None,
        }
        let entries: Vec<String> = column
            .get(..HEADER_LEN)?
            .iter()
            .map(|v| match v {
                RawValue::Number(n) => n.to_string(),
                RawValue::Text(s) => s.clone(),
            })
            .collect();
        Some(Self::from_entries(&entries))
    }

    fn from_entries(e: &[String]) -> Self {
        Self {
            key: e[0].clone(),
            location: e[1].clone(),
            data_type: e[2].clone(),
            units: e[3].clone(),
            frequency: e[4].clone(),
            start: e[5].clone(),
            end: e[6].clone(),
        }
    }

    pub fn entries(&self) -> [&str; HEADER_LEN] {
        [
            self.key.as_str(),
            self.location.as_str(),
            self.data_type.as_str(),
            self.units.as_str(),
            self.frequency.as_str(),
            self.start.as_str(),
            self.end.as_str(),
        ]
    }

    /// Same header with the data type and units replaced.
    pub fn relabel(&self, data_type: &str, units: &str) -> Self {
        Self {
            data_type: data_type.to_string(),
            units: units.to_string(),
            ..self.clone()
        }
    }
}

/// Raw input columns as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputColumns {
    pub air_temperature: Vec<RawValue>,
    pub radiant_temperature: Vec<RawValue>,
    pub air_speed: Vec<RawValue>,
    pub relative_humidity: Vec<RawValue>,
    pub metabolic_rate: Vec<RawValue>,
    pub clothing_insulation: Vec<RawValue>,
    pub external_work: Vec<RawValue>,
}

impl InputColumns {
    pub fn column(&self, kind: InputKind) -> &[RawValue] {
        match kind {
            InputKind::AirTemperature => &self.air_temperature,
            InputKind::RadiantTemperature => &self.radiant_temperature,
            InputKind::AirSpeed => &self.air_speed,
            InputKind::RelativeHumidity => &self.relative_humidity,
            InputKind::MetabolicRate => &self.metabolic_rate,
            InputKind::ClothingInsulation => &self.clothing_insulation,
            InputKind::ExternalWork => &self.external_work,
        }
    }

    fn column_mut(&mut self, kind: InputKind) -> &mut Vec<RawValue> {
        match kind {
            InputKind::AirTemperature => &mut self.air_temperature,
            InputKind::RadiantTemperature => &mut self.radiant_temperature,
            InputKind::AirSpeed => &mut self.air_speed,
            InputKind::RelativeHumidity => &mut self.relative_humidity,
            InputKind::MetabolicRate => &mut self.metabolic_rate,
            InputKind::ClothingInsulation => &mut self.clothing_insulation,
            InputKind::ExternalWork => &mut self.external_work,
        }
    }

    /// Replace one column.
    pub fn with<I, V>(mut self, kind: InputKind, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue>,
    {
        *self.column_mut(kind) = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Row-wise inputs ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedInputs {
    pub rows: Vec<ComfortInputs>,
    /// First header found, in column order
    pub header: Option<SeriesHeader>,
}

impl AlignedInputs {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct ParsedColumn {
    values: Vec<f64>,
    header: Option<SeriesHeader>,
}

fn parse_column(kind: InputKind, raw: &[RawValue]) -> AppResult<ParsedColumn> {
    let header = SeriesHeader::detect(raw, kind.data_type());
    let body = if header.is_some() {
        &raw[HEADER_LEN..]
    } else {
        raw
    };
    if header.is_some() && body.is_empty() {
        return Err(AppError::InvalidInput {
            column: kind.label(),
            message: "header has no values after it".to_string(),
        });
    }

    let values = body
        .iter()
        .enumerate()
        .map(|(i, entry)| -> AppResult<f64> {
            let value = entry.to_number().ok_or_else(|| AppError::InvalidInput {
                column: kind.label(),
                message: format!("entry {i} ({entry}) is not a number"),
            })?;
            kind.check(value).map_err(|message| AppError::InvalidInput {
                column: kind.label(),
                message: format!("entry {i}: {message}"),
            })?;
            Ok(value)
        })
        .collect::<AppResult<Vec<f64>>>()?;

    Ok(ParsedColumn { values, header })
}

/// Check, default and broadcast the input columns into rows.
pub fn align(columns: &InputColumns) -> AppResult<AlignedInputs> {
    let mut header: Option<SeriesHeader> = None;
    let mut parsed: Vec<Vec<f64>> = Vec::with_capacity(InputKind::ALL.len());

    for kind in InputKind::ALL {
        let column = parse_column(kind, columns.column(kind))?;
        if header.is_none() {
            header = column.header;
        }
        let values = if !column.values.is_empty() {
            column.values
        } else if kind == InputKind::RadiantTemperature {
            parsed[InputKind::AirTemperature as usize].clone()
        } else {
            vec![kind.default_value()]
        };
        parsed.push(values);
    }

    let rows = row_count(&parsed)?;
    let at = |kind: InputKind, i: usize| {
        let values = &parsed[kind as usize];
        if values.len() == 1 { values[0] } else { values[i] }
    };

    let rows: Vec<ComfortInputs> = (0..rows)
        .map(|i| ComfortInputs {
            air_temperature: at(InputKind::AirTemperature, i),
            radiant_temperature: at(InputKind::RadiantTemperature, i),
            air_speed: at(InputKind::AirSpeed, i),
            relative_humidity: at(InputKind::RelativeHumidity, i),
            metabolic_rate: at(InputKind::MetabolicRate, i),
            clothing_insulation: at(InputKind::ClothingInsulation, i),
            external_work: at(InputKind::ExternalWork, i),
        })
        .collect();

    tracing::debug!(rows = rows.len(), has_header = header.is_some(), "inputs aligned");
    Ok(AlignedInputs { rows, header })
}

/// Common length of the multi-value columns, or 1 if every column is single.
fn row_count(parsed: &[Vec<f64>]) -> AppResult<usize> {
    let multi: Vec<(InputKind, usize)> = InputKind::ALL
        .iter()
        .zip(parsed)
        .filter(|(_, values)| values.len() > 1)
        .map(|(kind, values)| (*kind, values.len()))
        .collect();

    let Some(&(_, first)) = multi.first() else {
        return Ok(1);
    };
    if multi.iter().all(|&(_, len)| len == first) {
        return Ok(first);
    }

    let lengths = multi
        .iter()
        .map(|(kind, len)| format!("{} has {len}", kind.label()))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::Alignment(format!(
        "{lengths}; multi-value lists must share a length"
    )))
}
