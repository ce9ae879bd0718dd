//! PMV at elevated air speed via the SET cooling effect.
//!
//! Fanger's model over-predicts the cooling of moving air. Above the still-air
//! threshold the cooling effect `ce` is the temperature drop that gives the
//! same SET in still air as the real scenario gives at its real speed. PMV is
//! then evaluated in that equivalent still-air scenario.

use crate::error::EvalResult;
use crate::pmv::comfort_pmv_for;
use crate::set::pierce_set_for;
use crate::types::{ComfortInputs, ComfortParameters, ComfortResult};
use tc_solver::{SecantConfig, secant_or_bisection};

/// Search bracket for the cooling effect (°C).
pub const COOLING_EFFECT_BRACKET: (f64, f64) = (0.0, 40.0);

/// Residual SET difference (°C) accepted when matching the cooling effect.
pub const COOLING_EFFECT_PRECISION: f64 = 0.001;

/// Evaluate PMV, PPD and SET, adjusting for elevated air speed when needed.
///
/// At or below `parameters.still_air_threshold` this is plain Fanger PMV and
/// Pierce SET with no adjustment.
pub fn evaluate(inputs: &ComfortInputs, parameters: &ComfortParameters) -> EvalResult<ComfortResult> {
    let threshold = parameters.still_air_threshold;
    let set = pierce_set_for(inputs)?;

    if inputs.air_speed <= threshold {
        let calm = comfort_pmv_for(inputs)?;
        return Ok(ComfortResult {
            pmv: calm.pmv,
            ppd: calm.ppd,
            set,
            adjusted_air_temperature: inputs.air_temperature,
            cooling_effect: 0.0,
        });
    }

    let cooling_effect = cooling_effect(inputs, set, threshold)?;
    let still = inputs.still_air_equivalent(cooling_effect, threshold);
    let adjusted = comfort_pmv_for(&still)?;

    Ok(ComfortResult {
        pmv: adjusted.pmv,
        ppd: adjusted.ppd,
        set,
        adjusted_air_temperature: still.air_temperature,
        cooling_effect,
    })
}

/// Temperature drop (°C) at which still air reproduces `set`.
fn cooling_effect(inputs: &ComfortInputs, set: f64, still_air_speed: f64) -> EvalResult<f64> {
    let (lower, upper) = COOLING_EFFECT_BRACKET;
    let config = SecantConfig::with_tolerance(COOLING_EFFECT_PRECISION);

    let root = secant_or_bisection(lower, upper, &config, |ce| -> EvalResult<f64> {
        Ok(set - pierce_set_for(&inputs.still_air_equivalent(ce, still_air_speed))?)
    })?;

    tracing::debug!(
        cooling_effect = root.x,
        iterations = root.iterations,
        air_speed = inputs.air_speed,
        "cooling effect found"
    );
    Ok(root.x)
}
