//! Behaviour of the elevated air speed adjustment.

use proptest::prelude::*;
use tc_comfort::{ComfortInputs, ComfortParameters, comfort_pmv, evaluate, pierce_set_for};

#[test]
fn calm_branch_invariants() {
    let params = ComfortParameters::default();
    for vel in [0.0, 0.05, 0.1] {
        let inputs = ComfortInputs::new(24.0, 26.0, vel, 45.0, 1.1, 0.7);
        let r = evaluate(&inputs, &params).unwrap();
        assert_eq!(r.cooling_effect, 0.0);
        assert_eq!(r.adjusted_air_temperature, inputs.air_temperature);
    }
}

#[test]
fn natural_convection_dominated_speed_has_no_cooling_effect() {
    // Below ~0.13 m/s natural convection sets the SET heat transfer, so the
    // still-air bracket end already matches.
    let inputs = ComfortInputs::new(28.0, 28.0, 0.12, 50.0, 1.1, 0.5);
    let r = evaluate(&inputs, &ComfortParameters::default()).unwrap();
    assert_eq!(r.cooling_effect, 0.0);
    let still = comfort_pmv(28.0, 28.0, 0.1, 50.0, 1.1, 0.5, 0.0).unwrap();
    assert_eq!(r.pmv, still.pmv);
}

#[test]
fn gentle_breeze_gives_small_cooling_effect() {
    let inputs = ComfortInputs::new(28.0, 28.0, 0.2, 50.0, 1.1, 0.5);
    let r = evaluate(&inputs, &ComfortParameters::default()).unwrap();
    assert!(r.cooling_effect > 0.5 && r.cooling_effect < 1.0, "ce = {}", r.cooling_effect);
}

#[test]
fn faster_air_cools_more() {
    let params = ComfortParameters::default();
    let mut last = 0.0;
    for vel in [0.3, 0.6, 1.0, 1.5] {
        let inputs = ComfortInputs::new(28.0, 28.0, vel, 50.0, 1.1, 0.5);
        let r = evaluate(&inputs, &params).unwrap();
        assert!(r.cooling_effect > last, "ce at {vel} m/s = {}", r.cooling_effect);
        last = r.cooling_effect;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn still_air_equivalent_reproduces_set(
        ta in 20.0_f64..32.0,
        rh in 20.0_f64..80.0,
        vel in 0.15_f64..2.0,
        met in 1.0_f64..1.6,
        clo in 0.3_f64..1.2,
    ) {
        let params = ComfortParameters::default();
        let inputs = ComfortInputs::new(ta, ta, vel, rh, met, clo);
        let r = evaluate(&inputs, &params).unwrap();

        let still = inputs.still_air_equivalent(r.cooling_effect, params.still_air_threshold);
        let still_set = pierce_set_for(&still).unwrap();
        prop_assert!((still_set - r.set).abs() < 0.001);
    }

    #[test]
    fn adjusted_pmv_is_cooler_than_calm_pmv(
        ta in 20.0_f64..32.0,
        rh in 20.0_f64..80.0,
        vel in 0.15_f64..2.0,
        met in 1.0_f64..1.6,
        clo in 0.3_f64..1.2,
    ) {
        let params = ComfortParameters::default();
        let inputs = ComfortInputs::new(ta, ta, vel, rh, met, clo);
        let adjusted = evaluate(&inputs, &params).unwrap();
        let calm = comfort_pmv(ta, ta, params.still_air_threshold, rh, met, clo, 0.0).unwrap();
        prop_assert!(adjusted.pmv < calm.pmv);
        prop_assert!(adjusted.cooling_effect > 0.0);
    }
}
