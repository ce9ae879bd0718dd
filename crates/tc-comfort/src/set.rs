//! Pierce two-node Standard Effective Temperature.
//!
//! The body is modelled as a core and a skin shell exchanging heat through
//! conduction and skin blood flow, with sweating, vasomotor and shivering
//! control driven by deviations from neutral setpoints. The model is
//! integrated explicitly in one-minute steps for an hour of exposure, then
//! the SET is the temperature of the ASHRAE standard environment (50 %RH,
//! still air, clothing standardised for the activity) that gives the same skin
//! heat loss at the same skin temperature and wettedness.
//!
//! Gagge, Fobelets and Berglund (1986), as used by the CBE Thermal Comfort Tool.

use crate::error::{ComfortError, EvalResult};
use crate::psychrometrics::saturated_vapor_pressure_torr;
use crate::types::ComfortInputs;
use tc_core::{ensure_finite, positive_part};
use tc_core::units::comfort::{
    CLO_M2K_PER_W, MET_W_PER_M2_SET, STANDARD_ATMOSPHERE_KPA, kpa_to_atm,
};
use tc_solver::{NewtonConfig, SolverError, newton_fixed_step};

const BODY_WEIGHT_KG: f64 = 69.9;
const BODY_SURFACE_AREA_M2: f64 = 1.8258;
/// Stefan-Boltzmann constant, W/(m²K⁴)
const SBC: f64 = 0.000_000_056_697;
/// Sweat, vasodilation and vasoconstriction gains.
const CSW: f64 = 170.0;
const CDIL: f64 = 120.0;
const CSTR: f64 = 0.5;
/// Clothing area factor per clo for the standard environment.
const KCLO: f64 = 0.25;

const TEMP_SKIN_NEUTRAL: f64 = 33.7;
const TEMP_CORE_NEUTRAL: f64 = 36.49;
/// Mean body setpoint. Equal to the core setpoint in the published model.
const TEMP_BODY_NEUTRAL: f64 = 36.49;
const SKIN_BLOOD_FLOW_NEUTRAL: f64 = 6.3;

const MIN_AIR_SPEED: f64 = 0.1;
/// Simulated exposure, in one-minute steps.
pub const EXPOSURE_MINUTES: usize = 60;

const TCL_TOLERANCE: f64 = 0.01;
const MAX_TCL_ITERATIONS: usize = 100;

/// Skin and core state of the two-node model.
///
/// Lives for one evaluation only; every call to [`pierce_set`] starts from the
/// neutral state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoregulatoryState {
    /// °C
    pub skin_temperature: f64,
    /// °C
    pub core_temperature: f64,
    /// L/(m²h)
    pub skin_blood_flow: f64,
    /// W/m², resting plus shivering
    pub metabolic_heat_production: f64,
    /// Fraction of the skin that is wet, 0..1
    pub skin_wettedness: f64,
    /// Fraction of body mass in the skin node
    pub alpha: f64,
    /// Total evaporative heat loss from the skin, W/m²
    pub skin_evaporation: f64,
}

impl ThermoregulatoryState {
    fn neutral(met: f64) -> Self {
        Self {
            skin_temperature: TEMP_SKIN_NEUTRAL,
            core_temperature: TEMP_CORE_NEUTRAL,
            skin_blood_flow: SKIN_BLOOD_FLOW_NEUTRAL,
            metabolic_heat_production: met * MET_W_PER_M2_SET,
            skin_wettedness: 0.0,
            alpha: 0.1,
            // Seeded with 0.1 * met rather than a heat flux.
            skin_evaporation: 0.1 * met,
        }
    }
}

/// Fixed properties of the real environment and the subject.
struct Exposure {
    ta: f64,
    tr: f64,
    vapor_pressure: f64,
    met: f64,
    wme: f64,
    rcl: f64,
    facl: f64,
    lewis: f64,
    icl: f64,
    wcrit: f64,
    chc: f64,
}

impl Exposure {
    fn new(inputs: &ComfortInputs) -> Self {
        let ta = inputs.air_temperature;
        let clo = inputs.clothing_insulation;
        let air_speed = inputs.air_speed.max(MIN_AIR_SPEED);
        let pressure_atm = kpa_to_atm(STANDARD_ATMOSPHERE_KPA);

        let (wcrit, icl) = if clo <= 0.0 {
            (0.38 * air_speed.powf(-0.29), 1.0)
        } else {
            (0.59 * air_speed.powf(-0.08), 0.45)
        };

        let chc_natural = 3.0 * pressure_atm.powf(0.53);
        let chc_forced = 8.600_001 * (air_speed * pressure_atm).powf(0.53);

        Self {
            ta,
            tr: inputs.radiant_temperature,
            vapor_pressure: inputs.relative_humidity * saturated_vapor_pressure_torr(ta) / 100.0,
            met: inputs.metabolic_rate,
            wme: inputs.external_work,
            rcl: CLO_M2K_PER_W * clo,
            // increase in body surface area due to clothing
            facl: 1.0 + 0.15 * clo,
            // Lewis relation is 2.2 at sea level
            lewis: 2.2 / pressure_atm,
            icl,
            wcrit,
            chc: chc_natural.max(chc_forced),
        }
    }
}

/// Dry heat exchange between clothing and surroundings.
#[derive(Debug, Clone, Copy)]
struct ClothingExchange {
    chr: f64,
    ctc: f64,
    /// resistance of the air layer to dry heat transfer
    ra: f64,
    /// operative temperature
    top: f64,
    tcl: f64,
}

impl ClothingExchange {
    fn initial(env: &Exposure, skin_temperature: f64) -> Self {
        let chr = 4.7;
        let ctc = chr + env.chc;
        let ra = 1.0 / (env.facl * ctc);
        let top = (chr * env.tr + env.chc * env.ta) / ctc;
        let tcl = top + (skin_temperature - top) / (ctc * (ra + env.rcl));
        Self {
            chr,
            ctc,
            ra,
            top,
            tcl,
        }
    }

    /// Solve H(Tsk - To) = CTC(Tcl - To) for Tcl and CHR, H = 1/(Ra + Rcl).
    ///
    /// At least one pass is made from the initial estimate.
    fn refine(mut self, env: &Exposure, skin_temperature: f64) -> EvalResult<Self> {
        for iteration in 1..=MAX_TCL_ITERATIONS {
            let tcl_old = self.tcl;
            self.chr = 4.0 * SBC * ((self.tcl + env.tr) / 2.0 + 273.15).powi(3) * 0.72;
            self.ctc = self.chr + env.chc;
            self.ra = 1.0 / (env.facl * self.ctc);
            self.top = (self.chr * env.tr + env.chc * env.ta) / self.ctc;
            self.tcl = (self.ra * skin_temperature + env.rcl * self.top) / (self.ra + env.rcl);

            if (self.tcl - tcl_old).abs() <= TCL_TOLERANCE {
                tracing::trace!(iteration, tcl = self.tcl, "SET clothing temperature converged");
                return Ok(self);
            }
        }
        Err(ComfortError::ConvergenceFailed {
            what: "clothing surface temperature (SET)",
            iterations: MAX_TCL_ITERATIONS,
        })
    }
}

/// Advance the two-node model by one minute, returning the dry heat loss from
/// the skin over that minute.
fn step(state: &mut ThermoregulatoryState, env: &Exposure, clothing: &ClothingExchange) -> f64 {
    let s = state;
    let m = s.metabolic_heat_production;

    let dry = (s.skin_temperature - clothing.top) / (clothing.ra + env.rcl);
    let hfcs = (s.core_temperature - s.skin_temperature) * (5.28 + 1.163 * s.skin_blood_flow);
    let eres = 0.0023 * m * (44.0 - env.vapor_pressure);
    let cres = 0.0014 * m * (34.0 - env.ta);
    let scr = m - hfcs - eres - cres - env.wme;
    let ssk = hfcs - dry - s.skin_evaporation;

    let tcsk = 0.97 * s.alpha * BODY_WEIGHT_KG;
    let tccr = 0.97 * (1.0 - s.alpha) * BODY_WEIGHT_KG;
    // °C per minute
    let dtsk = ssk * BODY_SURFACE_AREA_M2 / (tcsk * 60.0);
    let dtcr = scr * BODY_SURFACE_AREA_M2 / (tccr * 60.0);
    s.skin_temperature += dtsk;
    s.core_temperature += dtcr;
    let tb = s.alpha * s.skin_temperature + (1.0 - s.alpha) * s.core_temperature;

    let sksig = s.skin_temperature - TEMP_SKIN_NEUTRAL;
    let warms = positive_part(sksig);
    let colds = positive_part(-sksig);
    let crsig = s.core_temperature - TEMP_CORE_NEUTRAL;
    let warmc = positive_part(crsig);
    let coldc = positive_part(-crsig);
    let warmb = positive_part(tb - TEMP_BODY_NEUTRAL);

    s.skin_blood_flow =
        ((SKIN_BLOOD_FLOW_NEUTRAL + CDIL * warmc) / (1.0 + CSTR * colds)).clamp(0.5, 90.0);

    let regsw = (CSW * warmb * (warms / 10.7).exp()).min(500.0);
    let mut ersw = 0.68 * regsw;
    // evaporative resistance of the air layer and of the clothing
    let rea = 1.0 / (env.lewis * env.facl * env.chc);
    let recl = env.rcl / (env.lewis * env.icl);
    let emax = (saturated_vapor_pressure_torr(s.skin_temperature) - env.vapor_pressure)
        / (rea + recl);

    let mut prsw = ersw / emax;
    let mut pwet = 0.06 + 0.94 * prsw;
    let mut edif = pwet * emax - ersw;
    if pwet > env.wcrit {
        pwet = env.wcrit;
        prsw = env.wcrit / 0.94;
        ersw = prsw * emax;
        edif = 0.06 * (1.0 - prsw) * emax;
    }
    if emax < 0.0 {
        edif = 0.0;
        ersw = 0.0;
        pwet = env.wcrit;
    }
    s.skin_evaporation = ersw + edif;
    s.skin_wettedness = pwet;

    let mshiv = 19.4 * colds * coldc;
    s.metabolic_heat_production = env.met * MET_W_PER_M2_SET + mshiv;
    s.alpha = 0.041_773_7 + 0.745_183_3 / (s.skin_blood_flow + 0.585_417);

    dry
}

/// Run the one-hour exposure and return the final thermoregulatory state.
pub fn simulate_exposure(inputs: &ComfortInputs) -> EvalResult<ThermoregulatoryState> {
    let env = Exposure::new(inputs);
    let (state, _, _) = run_exposure(&env)?;
    Ok(state)
}

fn run_exposure(env: &Exposure) -> EvalResult<(ThermoregulatoryState, ClothingExchange, f64)> {
    let mut state = ThermoregulatoryState::neutral(env.met);

    // Refined in the first minute only, then held for the rest of the exposure.
    let clothing =
        ClothingExchange::initial(env, state.skin_temperature).refine(env, state.skin_temperature)?;

    let mut dry = step(&mut state, env, &clothing);
    for _ in 1..EXPOSURE_MINUTES {
        dry = step(&mut state, env, &clothing);
    }
    Ok((state, clothing, dry))
}

/// Standard Effective Temperature (°C).
///
/// Arguments as for [`crate::pmv::comfort_pmv`]. Air speeds below 0.1 m/s are
/// treated as 0.1 m/s.
pub fn pierce_set(
    ta: f64,
    tr: f64,
    vel: f64,
    rh: f64,
    met: f64,
    clo: f64,
    wme: f64,
) -> EvalResult<f64> {
    let inputs = ComfortInputs {
        air_temperature: ta,
        radiant_temperature: tr,
        air_speed: vel,
        relative_humidity: rh,
        metabolic_rate: met,
        clothing_insulation: clo,
        external_work: wme,
    };
    pierce_set_for(&inputs)
}

/// [`pierce_set`] over an input record.
pub fn pierce_set_for(inputs: &ComfortInputs) -> EvalResult<f64> {
    let env = Exposure::new(inputs);
    let (state, clothing, dry) = run_exposure(&env)?;
    standard_effective_temperature(&env, &state, &clothing, dry)
}

fn standard_effective_temperature(
    env: &Exposure,
    state: &ThermoregulatoryState,
    clothing: &ClothingExchange,
    dry: f64,
) -> EvalResult<f64> {
    let met = env.met;
    let tsk = state.skin_temperature;
    // total heat loss from skin
    let hsk = dry + state.skin_evaporation;
    let w = state.skin_wettedness;
    let pssk = saturated_vapor_pressure_torr(tsk);

    // ASHRAE standard environment
    let chrs = clothing.chr;
    let chcs = if met < 0.85 {
        3.0
    } else {
        (5.66 * (met - 0.85).powf(0.39)).max(3.0)
    };
    let ctcs = chcs + chrs;
    let rclos = 1.52 / ((met - env.wme / MET_W_PER_M2_SET) + 0.6944) - 0.1835;
    let rcls = CLO_M2K_PER_W * rclos;
    let facls = 1.0 + KCLO * rclos;
    let fcls = 1.0 / (1.0 + 0.155 * facls * ctcs * rclos);
    let ims = 0.45;
    let icls = ims * chcs / ctcs * (1.0 - fcls) / (chcs / ctcs - fcls * ims);
    let ras = 1.0 / (facls * ctcs);
    let reas = 1.0 / (env.lewis * facls * chcs);
    let recls = rcls / (env.lewis * icls);
    let hd_s = 1.0 / (ras + rcls);
    let he_s = 1.0 / (reas + recls);

    let residual = |x: f64| -> Result<f64, SolverError> {
        Ok(hsk - hd_s * (tsk - x) - w * he_s * (pssk - 0.5 * saturated_vapor_pressure_torr(x)))
    };

    // lower bound for SET
    let x0 = tsk - hsk / hd_s;
    let root = newton_fixed_step(x0, &NewtonConfig::default(), residual)
        .map_err(standard_environment_error)?;
    tracing::trace!(set = root.x, iterations = root.iterations, "SET solved");

    Ok(ensure_finite(root.x, "set")?)
}

/// An exhausted Newton cap is a SET convergence failure; anything else is a
/// solver error.
fn standard_environment_error(err: SolverError) -> ComfortError {
    match err {
        SolverError::ConvergenceFailed { iterations, .. } => ComfortError::ConvergenceFailed {
            what: "standard effective temperature",
            iterations,
        },
        other => ComfortError::Solver(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mild_office_conditions() {
        let set = pierce_set(25.0, 25.0, 0.1, 50.0, 1.2, 0.5, 0.0).unwrap();
        assert!((set - 25.2347).abs() < 0.01, "set = {set}");
    }

    #[test]
    fn ashrae_55_example() {
        let set = pierce_set(22.0, 22.0, 0.1, 60.0, 1.2, 0.5, 0.0).unwrap();
        assert!((set - 22.2875).abs() < 0.01, "set = {set}");
    }

    #[test]
    fn nude_subject_feels_cooler() {
        let set = pierce_set(25.0, 25.0, 0.1, 50.0, 1.2, 0.0, 0.0).unwrap();
        assert!((set - 20.9231).abs() < 0.01, "set = {set}");
    }

    #[test]
    fn external_work_lowers_set() {
        let set = pierce_set(25.0, 25.0, 0.1, 50.0, 1.0, 0.5, 0.2).unwrap();
        assert!((set - 24.0011).abs() < 0.01, "set = {set}");
    }

    #[test]
    fn extreme_cold_and_heat() {
        let cold = pierce_set(-10.0, -10.0, 0.1, 50.0, 1.0, 1.0, 0.0).unwrap();
        assert!((cold + 3.9972).abs() < 0.01, "set = {cold}");
        let hot = pierce_set(40.0, 40.0, 0.1, 50.0, 1.0, 0.3, 0.0).unwrap();
        assert!((hot - 39.0012).abs() < 0.01, "set = {hot}");
    }

    #[test]
    fn calm_air_is_floored() {
        let still = pierce_set(24.0, 24.0, 0.0, 50.0, 1.1, 0.6, 0.0).unwrap();
        let floor = pierce_set(24.0, 24.0, 0.1, 50.0, 1.1, 0.6, 0.0).unwrap();
        assert_eq!(still, floor);
    }

    #[test]
    fn evaluations_are_independent() {
        let first = pierce_set(30.0, 30.0, 0.5, 60.0, 1.3, 0.5, 0.0).unwrap();
        let _other = pierce_set(10.0, 12.0, 0.2, 30.0, 1.0, 1.2, 0.0).unwrap();
        let again = pierce_set(30.0, 30.0, 0.5, 60.0, 1.3, 0.5, 0.0).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn warm_exposure_raises_skin_temperature_and_sweat() {
        let inputs = ComfortInputs::new(34.0, 34.0, 0.1, 50.0, 1.5, 0.5);
        let state = simulate_exposure(&inputs).unwrap();
        assert!(state.skin_temperature > TEMP_SKIN_NEUTRAL);
        assert!(state.skin_wettedness > 0.06);
        assert!((0.5..=90.0).contains(&state.skin_blood_flow));
    }

    #[test]
    fn cold_exposure_triggers_shivering() {
        let inputs = ComfortInputs::new(5.0, 5.0, 0.5, 50.0, 1.0, 0.5);
        let state = simulate_exposure(&inputs).unwrap();
        assert!(state.skin_temperature < TEMP_SKIN_NEUTRAL);
        assert!(state.metabolic_heat_production > MET_W_PER_M2_SET);
        assert!(state.skin_blood_flow >= 0.5);
    }

    #[test]
    fn exhausted_newton_cap_is_a_set_convergence_failure() {
        let config = NewtonConfig {
            max_iterations: 1,
            ..NewtonConfig::default()
        };
        // one update from 0 lands on 5, too far to count as converged
        let err = newton_fixed_step(0.0, &config, |x| Ok(x - 5.0))
            .map_err(standard_environment_error)
            .unwrap_err();
        assert_eq!(
            err,
            ComfortError::ConvergenceFailed {
                what: "standard effective temperature",
                iterations: 1,
            }
        );

        let invalid = NewtonConfig {
            step: 0.0,
            ..NewtonConfig::default()
        };
        let err = newton_fixed_step(0.0, &invalid, |x| Ok(x - 5.0))
            .map_err(standard_environment_error)
            .unwrap_err();
        assert!(matches!(err, ComfortError::Solver(SolverError::InvalidArg { .. })));
    }
}
