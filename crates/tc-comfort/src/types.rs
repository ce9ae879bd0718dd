//! Value types flowing in and out of the comfort engine.

use serde::{Deserialize, Serialize};
use tc_core::units::{Ratio, Temperature, Velocity, to_degc, to_mps, to_percent};

/// Environmental and personal conditions for one evaluation.
///
/// Temperatures in °C, air speed in m/s, relative humidity in %, metabolic
/// rate and external work in met, clothing in clo.
///
/// The engine does not range-check these values. Callers are expected to
/// validate before evaluating (see `tc-app`'s alignment layer), keeping
/// humidity in `[0, 100]`, metabolic rate positive and clothing non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortInputs {
    pub air_temperature: f64,
    pub radiant_temperature: f64,
    pub air_speed: f64,
    pub relative_humidity: f64,
    pub metabolic_rate: f64,
    pub clothing_insulation: f64,
    #[serde(default)]
    pub external_work: f64,
}

impl Default for ComfortInputs {
    fn default() -> Self {
        Self {
            air_temperature: 20.0,
            radiant_temperature: 20.0,
            air_speed: 0.0,
            relative_humidity: 50.0,
            metabolic_rate: 1.1,
            clothing_insulation: 0.85,
            external_work: 0.0,
        }
    }
}

impl ComfortInputs {
    /// Inputs with no external work.
    pub fn new(
        air_temperature: f64,
        radiant_temperature: f64,
        air_speed: f64,
        relative_humidity: f64,
        metabolic_rate: f64,
        clothing_insulation: f64,
    ) -> Self {
        Self {
            air_temperature,
            radiant_temperature,
            air_speed,
            relative_humidity,
            metabolic_rate,
            clothing_insulation,
            external_work: 0.0,
        }
    }

    /// Build from unit-aware quantities; met and clo have no SI form.
    pub fn from_quantities(
        air_temperature: Temperature,
        radiant_temperature: Temperature,
        air_speed: Velocity,
        relative_humidity: Ratio,
        metabolic_rate: f64,
        clothing_insulation: f64,
    ) -> Self {
        Self::new(
            to_degc(air_temperature),
            to_degc(radiant_temperature),
            to_mps(air_speed),
            to_percent(relative_humidity),
            metabolic_rate,
            clothing_insulation,
        )
    }

    pub fn with_external_work(mut self, external_work: f64) -> Self {
        self.external_work = external_work;
        self
    }

    /// The equivalent still-air scenario: both temperatures lowered by
    /// `cooling_effect` and the air speed replaced by `still_air_speed`.
    pub fn still_air_equivalent(&self, cooling_effect: f64, still_air_speed: f64) -> Self {
        Self {
            air_temperature: self.air_temperature - cooling_effect,
            radiant_temperature: self.radiant_temperature - cooling_effect,
            air_speed: still_air_speed,
            ..*self
        }
    }
}

/// Comfort-model settings, independent of any particular input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortParameters {
    /// PPD (%) at or above which conditions are uncomfortable.
    pub ppd_comfort_threshold: f64,
    /// Humidity ratio (kg/kg) at or above which conditions are too humid.
    pub humidity_ratio_upper: f64,
    /// Humidity ratio (kg/kg) at or below which conditions are too dry.
    pub humidity_ratio_lower: f64,
    /// Air speed (m/s) above which the cooling-effect adjustment is applied.
    pub still_air_threshold: f64,
}

impl Default for ComfortParameters {
    fn default() -> Self {
        Self {
            ppd_comfort_threshold: 10.0,
            humidity_ratio_upper: 0.03,
            humidity_ratio_lower: 0.0,
            still_air_threshold: 0.1,
        }
    }
}

/// PMV with its PPD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmvPpd {
    pub pmv: f64,
    pub ppd: f64,
}

/// Comfort indices for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortResult {
    /// Predicted mean vote, -3 (cold) to +3 (hot).
    pub pmv: f64,
    /// Predicted percentage dissatisfied (%).
    pub ppd: f64,
    /// Standard effective temperature (°C).
    pub set: f64,
    /// Air temperature of the equivalent still-air scenario (°C).
    pub adjusted_air_temperature: f64,
    /// Temperature offset credited to elevated air speed (°C).
    pub cooling_effect: f64,
}

impl ComfortResult {
    pub fn is_adjusted(&self) -> bool {
        self.cooling_effect != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::units::{degc, mps, percent};

    #[test]
    fn defaults_match_single_value_constructor() {
        let inputs = ComfortInputs::default();
        assert_eq!(inputs.air_temperature, 20.0);
        assert_eq!(inputs.radiant_temperature, inputs.air_temperature);
        assert_eq!(inputs.metabolic_rate, 1.1);
        assert_eq!(inputs.clothing_insulation, 0.85);

        let params = ComfortParameters::default();
        assert_eq!(params.ppd_comfort_threshold, 10.0);
        assert_eq!(params.humidity_ratio_upper, 0.03);
        assert_eq!(params.humidity_ratio_lower, 0.0);
        assert_eq!(params.still_air_threshold, 0.1);
    }

    #[test]
    fn from_quantities_converts_units() {
        let inputs =
            ComfortInputs::from_quantities(degc(24.0), degc(26.0), mps(0.3), percent(45.0), 1.2, 0.6);
        assert!((inputs.air_temperature - 24.0).abs() < 1e-9);
        assert!((inputs.radiant_temperature - 26.0).abs() < 1e-9);
        assert!((inputs.air_speed - 0.3).abs() < 1e-12);
        assert!((inputs.relative_humidity - 45.0).abs() < 1e-9);
    }

    #[test]
    fn still_air_equivalent_shifts_both_temperatures() {
        let inputs = ComfortInputs::new(28.0, 30.0, 0.8, 50.0, 1.1, 0.5).with_external_work(0.1);
        let still = inputs.still_air_equivalent(2.5, 0.1);
        assert_eq!(still.air_temperature, 25.5);
        assert_eq!(still.radiant_temperature, 27.5);
        assert_eq!(still.air_speed, 0.1);
        assert_eq!(still.relative_humidity, 50.0);
        assert_eq!(still.external_work, 0.1);
    }

    #[test]
    fn parameters_fill_missing_fields_from_defaults() {
        let params: ComfortParameters =
            serde_json::from_str(r#"{"still_air_threshold": 0.2}"#).unwrap();
        assert_eq!(params.still_air_threshold, 0.2);
        assert_eq!(params.ppd_comfort_threshold, 10.0);
    }
}
