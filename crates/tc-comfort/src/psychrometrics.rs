//! Moist-air relations needed by the comfort models.

use tc_core::units::comfort::STANDARD_ATMOSPHERE_KPA;
use tc_core::units::{Pressure, Temperature, kpa, to_degc};

/// Ratio of the molar masses of water vapour and dry air.
const EPSILON_WATER_AIR: f64 = 0.621_98;

/// Saturation vapour pressure over water, in torr.
///
/// Antoine-type fit valid for roughly -20 °C to 60 °C.
#[inline]
pub fn saturated_vapor_pressure_torr(temperature_c: f64) -> f64 {
    (18.6686 - 4030.183 / (temperature_c + 235.0)).exp()
}

/// Saturation vapour pressure over water, in kPa (same fit as the torr form).
#[inline]
pub fn saturated_vapor_pressure_kpa(temperature_c: f64) -> f64 {
    (16.6536 - 4030.183 / (temperature_c + 235.0)).exp()
}

/// Unit-aware saturation vapour pressure.
pub fn saturated_vapor_pressure(temperature: Temperature) -> Pressure {
    kpa(saturated_vapor_pressure_kpa(to_degc(temperature)))
}

/// Partial pressure of water vapour (kPa) at a dry-bulb temperature and relative humidity (%).
#[inline]
pub fn vapor_pressure_kpa(air_temperature_c: f64, relative_humidity: f64) -> f64 {
    relative_humidity / 100.0 * saturated_vapor_pressure_kpa(air_temperature_c)
}

/// Humidity ratio in kg water per kg dry air at sea-level pressure.
pub fn humidity_ratio(air_temperature_c: f64, relative_humidity: f64) -> f64 {
    let pw = vapor_pressure_kpa(air_temperature_c, relative_humidity);
    EPSILON_WATER_AIR * pw / (STANDARD_ATMOSPHERE_KPA - pw)
}
