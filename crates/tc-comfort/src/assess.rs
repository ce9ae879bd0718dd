//! Comfort verdicts from evaluated indices.

use crate::psychrometrics::humidity_ratio;
use crate::types::{ComfortInputs, ComfortParameters, ComfortResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dominant cause of discomfort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscomfortReason {
    TooDry,
    TooCold,
    Comfortable,
    TooHot,
    TooHumid,
}

impl DiscomfortReason {
    /// Numeric code: -2 dry, -1 cold, 0 comfortable, 1 hot, 2 humid.
    pub fn code(self) -> i8 {
        match self {
            Self::TooDry => -2,
            Self::TooCold => -1,
            Self::Comfortable => 0,
            Self::TooHot => 1,
            Self::TooHumid => 2,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -2 => Some(Self::TooDry),
            -1 => Some(Self::TooCold),
            0 => Some(Self::Comfortable),
            1 => Some(Self::TooHot),
            2 => Some(Self::TooHumid),
            _ => None,
        }
    }
}

impl fmt::Display for DiscomfortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TooDry => "too dry",
            Self::TooCold => "too cold",
            Self::Comfortable => "comfortable",
            Self::TooHot => "too hot",
            Self::TooHumid => "too humid",
        };
        f.write_str(s)
    }
}

/// Comfort verdict for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortAssessment {
    pub comfortable: bool,
    pub reason: DiscomfortReason,
    /// Humidity ratio of the real scenario (kg/kg).
    pub humidity_ratio: f64,
}

/// Judge `result` against the PPD threshold and humidity-ratio bounds.
///
/// A breached PPD threshold takes precedence over the humidity bounds.
pub fn assess(
    inputs: &ComfortInputs,
    result: &ComfortResult,
    parameters: &ComfortParameters,
) -> ComfortAssessment {
    let hr = humidity_ratio(inputs.air_temperature, inputs.relative_humidity);
    let thermal_ok = result.ppd < parameters.ppd_comfort_threshold;

    let reason = if !thermal_ok {
        if result.pmv > 0.0 {
            DiscomfortReason::TooHot
        } else {
            DiscomfortReason::TooCold
        }
    } else if hr >= parameters.humidity_ratio_upper {
        DiscomfortReason::TooHumid
    } else if hr <= parameters.humidity_ratio_lower {
        DiscomfortReason::TooDry
    } else {
        DiscomfortReason::Comfortable
    };

    ComfortAssessment {
        comfortable: reason == DiscomfortReason::Comfortable,
        reason,
        humidity_ratio: hr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pmv: f64, ppd: f64) -> ComfortResult {
        ComfortResult {
            pmv,
            ppd,
            set: 25.0,
            adjusted_air_temperature: 25.0,
            cooling_effect: 0.0,
        }
    }

    #[test]
    fn codes_round_trip() {
        for code in -2..=2 {
            let reason = DiscomfortReason::from_code(code).unwrap();
            assert_eq!(reason.code(), code);
        }
        assert_eq!(DiscomfortReason::from_code(3), None);
    }

    #[test]
    fn comfortable_room() {
        let inputs = ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 1.2, 0.5);
        let a = assess(&inputs, &result(0.08, 5.2), &ComfortParameters::default());
        assert!(a.comfortable);
        assert_eq!(a.reason, DiscomfortReason::Comfortable);
        assert!((a.humidity_ratio - 0.0099).abs() < 0.0003);
    }

    #[test]
    fn thermal_reason_follows_pmv_sign() {
        let inputs = ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 1.2, 0.5);
        let params = ComfortParameters::default();
        assert_eq!(assess(&inputs, &result(1.2, 35.0), &params).reason, DiscomfortReason::TooHot);
        assert_eq!(assess(&inputs, &result(-0.8, 18.0), &params).reason, DiscomfortReason::TooCold);
    }

    #[test]
    fn threshold_is_exclusive() {
        let inputs = ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 1.2, 0.5);
        let a = assess(&inputs, &result(-0.5, 10.0), &ComfortParameters::default());
        assert!(!a.comfortable);
        assert_eq!(a.reason, DiscomfortReason::TooCold);
    }

    #[test]
    fn thermal_discomfort_outranks_humidity() {
        // 35 °C at 95 % is well above the humid bound
        let inputs = ComfortInputs::new(35.0, 35.0, 0.1, 95.0, 1.2, 0.5);
        let a = assess(&inputs, &result(2.5, 93.0), &ComfortParameters::default());
        assert!(a.humidity_ratio > 0.03);
        assert_eq!(a.reason, DiscomfortReason::TooHot);
    }

    #[test]
    fn humidity_bounds() {
        let params = ComfortParameters::default();
        let humid = ComfortInputs::new(35.0, 35.0, 0.1, 95.0, 1.2, 0.5);
        assert_eq!(assess(&humid, &result(0.0, 5.0), &params).reason, DiscomfortReason::TooHumid);

        let dry = ComfortInputs::new(25.0, 25.0, 0.1, 0.0, 1.2, 0.5);
        assert_eq!(assess(&dry, &result(0.0, 5.0), &params).reason, DiscomfortReason::TooDry);
    }
}
