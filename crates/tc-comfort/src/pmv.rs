//! Fanger's Predicted Mean Vote.
//!
//! Heat balance of a clothed body in steady state (ISO 7730 / ASHRAE 55
//! formulation). The clothing surface temperature is found by a damped fixed
//! point; the resulting thermal load is mapped to the seven-point sensation
//! scale by Fanger's empirical coefficient.
//!
//! Fanger's equation is only valid in near-still air. Use
//! [`crate::elevated::evaluate`] for air speeds above the still-air threshold.

use crate::error::{ComfortError, EvalResult};
use crate::psychrometrics::saturated_vapor_pressure_kpa;
use crate::types::{ComfortInputs, PmvPpd};
use tc_core::ensure_finite;
use tc_core::units::comfort::{MET_W_PER_M2_FANGER, clo_to_m2k_per_w};

/// Convergence test on successive `tcl / 100` estimates.
const TCL_TOLERANCE: f64 = 0.000_15;

/// Iteration cap for the clothing surface temperature.
pub const MAX_TCL_ITERATIONS: usize = 150;

/// PPD (%) for a given PMV.
pub fn find_ppd(pmv: f64) -> f64 {
    100.0 - 95.0 * (-0.03353 * pmv.powi(4) - 0.2179 * pmv.powi(2)).exp()
}

/// Fanger PMV and PPD.
///
/// * `ta` air temperature (°C)
/// * `tr` mean radiant temperature (°C)
/// * `vel` relative air speed (m/s)
/// * `rh` relative humidity (%)
/// * `met` metabolic rate (met)
/// * `clo` clothing insulation (clo)
/// * `wme` external work (met)
pub fn comfort_pmv(
    ta: f64,
    tr: f64,
    vel: f64,
    rh: f64,
    met: f64,
    clo: f64,
    wme: f64,
) -> EvalResult<PmvPpd> {
    // water vapour pressure, Pa
    let pa = rh * 10.0 * saturated_vapor_pressure_kpa(ta);

    let icl = clo_to_m2k_per_w(clo);
    let m = met * MET_W_PER_M2_FANGER;
    let w = wme * MET_W_PER_M2_FANGER;
    // internal heat production
    let mw = m - w;
    let fcl = if icl <= 0.078 {
        1.0 + 1.29 * icl
    } else {
        1.05 + 0.645 * icl
    };

    // forced convection
    let hcf = 12.1 * vel.sqrt();
    let taa = ta + 273.0;
    let tra = tr + 273.0;
    let tcla = taa + (35.5 - ta) / (3.5 * icl + 0.1);

    let p1 = icl * fcl;
    let p2 = p1 * 3.96;
    let p3 = p1 * 100.0;
    let p4 = p1 * taa;
    let p5 = (308.7 - 0.028 * mw) + p2 * (tra / 100.0).powi(4);

    let mut xn = tcla / 100.0;
    let mut xf = tcla / 50.0;
    let mut hc = hcf;
    let mut iterations = 0;

    while (xn - xf).abs() > TCL_TOLERANCE {
        xf = (xf + xn) / 2.0;
        // natural convection
        let hcn = 2.38 * (100.0 * xf - taa).abs().powf(0.25);
        hc = if hcf > hcn { hcf } else { hcn };
        xn = (p5 + p4 * hc - p2 * xf.powi(4)) / (100.0 + p3 * hc);

        iterations += 1;
        if iterations > MAX_TCL_ITERATIONS {
            return Err(ComfortError::ConvergenceFailed {
                what: "clothing surface temperature (PMV)",
                iterations,
            });
        }
    }
    tracing::trace!(iterations, "PMV clothing temperature converged");

    let tcl = 100.0 * xn - 273.0;

    // skin diffusion
    let hl1 = 3.05 * 0.001 * (5733.0 - 6.99 * mw - pa);
    // sweating
    let hl2 = if mw > MET_W_PER_M2_FANGER {
        0.42 * (mw - MET_W_PER_M2_FANGER)
    } else {
        0.0
    };
    // latent respiration
    let hl3 = 1.7 * 0.00001 * m * (5867.0 - pa);
    // dry respiration
    let hl4 = 0.0014 * m * (34.0 - ta);
    // radiation
    let hl5 = 3.96 * fcl * (xn.powi(4) - (tra / 100.0).powi(4));
    // convection
    let hl6 = fcl * hc * (tcl - ta);

    let ts = 0.303 * (-0.036 * m).exp() + 0.028;
    let pmv = ensure_finite(ts * (mw - hl1 - hl2 - hl3 - hl4 - hl5 - hl6), "pmv")?;

    Ok(PmvPpd {
        pmv,
        ppd: find_ppd(pmv),
    })
}

/// [`comfort_pmv`] over an input record, at its own air speed.
pub fn comfort_pmv_for(inputs: &ComfortInputs) -> EvalResult<PmvPpd> {
    comfort_pmv(
        inputs.air_temperature,
        inputs.radiant_temperature,
        inputs.air_speed,
        inputs.relative_humidity,
        inputs.metabolic_rate,
        inputs.clothing_insulation,
        inputs.external_work,
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ppd_bounds(pmv in -4.0_f64..4.0) {
            let ppd = find_ppd(pmv);
            prop_assert!((5.0..=100.0).contains(&ppd));
        }

        #[test]
        fn more_clothing_feels_warmer(
            ta in 16.0_f64..32.0,
            rh in 20.0_f64..80.0,
            met in 0.8_f64..2.0,
            clo in 0.0_f64..2.0,
            extra in 0.01_f64..0.5,
        ) {
            let thin = comfort_pmv(ta, ta, 0.1, rh, met, clo, 0.0).unwrap();
            let thick = comfort_pmv(ta, ta, 0.1, rh, met, clo + extra, 0.0).unwrap();
            prop_assert!(thick.pmv > thin.pmv);
        }
    }
}
