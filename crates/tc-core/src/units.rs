// tc-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn percent(v: f64) -> Ratio {
    use uom::si::ratio::percent;
    Ratio::new::<percent>(v)
}

#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn to_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

#[inline]
pub fn to_mps(v: Velocity) -> f64 {
    use uom::si::velocity::meter_per_second;
    v.get::<meter_per_second>()
}

#[inline]
pub fn to_percent(r: Ratio) -> f64 {
    use uom::si::ratio::percent;
    r.get::<percent>()
}

/// Conversions for the non-SI units of the comfort literature (clo, met, atm).
///
/// uom has no clo or met, and the comfort equations are fitted to these exact
/// factors, so they are kept as plain constants.
pub mod comfort {
    /// Thermal resistance of 1 clo in m²K/W.
    pub const CLO_M2K_PER_W: f64 = 0.155;

    /// 1 met in W/m² as used by Fanger's PMV equation.
    pub const MET_W_PER_M2_FANGER: f64 = 58.15;

    /// 1 met in W/m² as used by the two-node SET model.
    pub const MET_W_PER_M2_SET: f64 = 58.2;

    const ATM_PER_KPA: f64 = 0.009_869;

    /// Standard sea-level atmosphere.
    pub const STANDARD_ATMOSPHERE_KPA: f64 = 101.325;

    #[inline]
    pub fn clo_to_m2k_per_w(clo: f64) -> f64 {
        clo * CLO_M2K_PER_W
    }

    #[inline]
    pub fn kpa_to_atm(kpa: f64) -> f64 {
        kpa * ATM_PER_KPA
    }
}

#[cfg(test)]
mod tests {
    use super::comfort::*;
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = degc(25.0);
        let _p = kpa(101.325);
        let _v = mps(0.1);
        let _rh = percent(50.0);
    }

    #[test]
    fn getters_invert_constructors() {
        assert!((to_degc(degc(21.5)) - 21.5).abs() < 1e-9);
        assert!((to_kpa(kpa(3.17)) - 3.17).abs() < 1e-12);
        assert!((to_mps(mps(0.8)) - 0.8).abs() < 1e-12);
        assert!((to_percent(percent(45.0)) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn clo_in_si() {
        assert!((clo_to_m2k_per_w(1.0) - 0.155).abs() < 1e-12);
        assert!((clo_to_m2k_per_w(0.5) - 0.0775).abs() < 1e-12);
    }

    #[test]
    fn sea_level_in_atmospheres() {
        let atm = kpa_to_atm(STANDARD_ATMOSPHERE_KPA);
        assert!((atm - 1.0).abs() < 1e-3);
    }
}
