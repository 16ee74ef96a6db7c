//! Closed-form moist-air relations (ASHRAE Fundamentals 2017, ch. 1).
//!
//! All temperatures are in °C, pressures in Pa, humidity ratios in kg water
//! per kg dry air and enthalpies in J per kg dry air.

use crate::error::{AirError, AirResult};
use crate::saturation::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C, ln_saturation_pressure};
use pf_core::constants::ZERO_CELSIUS_K;
use pf_core::{ensure_finite, ensure_positive};
use pf_solver::{Bracket, BracketConfig, SolverError, newton_bisect};

/// Ratio of the molar masses of water vapor and dry air.
pub const MOLAR_MASS_RATIO: f64 = 0.621_945;

/// Specific heat of dry air [J/(kg·K)].
pub const CP_DRY_AIR: f64 = 1_006.0;

/// Specific heat of water vapor [J/(kg·K)].
pub const CP_VAPOR: f64 = 1_860.0;

/// Latent heat of vaporization at 0 °C [J/kg].
pub const LATENT_HEAT_0C: f64 = 2_501_000.0;

/// Gas constant of dry air [J/(kg·K)].
pub const R_DRY_AIR: f64 = 287.042;

const VOLUME_VAPOR_FACTOR: f64 = 1.607_858;

/// Dew-point inversion stops on a Newton step below this [°C].
const DEW_POINT_X_TOL: f64 = 1e-4;
const DEW_POINT_MAX_ITERATIONS: usize = 50;

fn ensure_non_negative(v: f64, what: &'static str) -> AirResult<f64> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(AirError::domain(what, v, "must not be negative"));
    }
    Ok(v)
}

pub(crate) fn humidity_ratio_from_vapor_pressure_unchecked(pv: f64, p: f64) -> f64 {
    MOLAR_MASS_RATIO * pv / (p - pv)
}

pub(crate) fn vapor_pressure_from_humidity_ratio_unchecked(w: f64, p: f64) -> f64 {
    p * w / (MOLAR_MASS_RATIO + w)
}

pub(crate) fn enthalpy_unchecked(dry_bulb_c: f64, w: f64) -> f64 {
    CP_DRY_AIR * dry_bulb_c + w * (LATENT_HEAT_0C + CP_VAPOR * dry_bulb_c)
}

/// Humidity ratio for a partial vapor pressure `pv` at total pressure `p`.
pub fn humidity_ratio_from_vapor_pressure(pv: f64, p: f64) -> AirResult<f64> {
    let p = ensure_positive(p, "pressure")?;
    let pv = ensure_non_negative(pv, "vapor pressure")?;
    if pv >= p {
        return Err(AirError::domain(
            "vapor pressure",
            pv,
            format!("must be below the total pressure {p} Pa"),
        ));
    }
    Ok(humidity_ratio_from_vapor_pressure_unchecked(pv, p))
}

/// Partial vapor pressure for humidity ratio `w` at total pressure `p`.
pub fn vapor_pressure_from_humidity_ratio(w: f64, p: f64) -> AirResult<f64> {
    let p = ensure_positive(p, "pressure")?;
    let w = ensure_non_negative(w, "humidity ratio")?;
    Ok(vapor_pressure_from_humidity_ratio_unchecked(w, p))
}

/// `pv = rh · pws`, with `rh` in [0, 1].
pub fn vapor_pressure_from_relative_humidity(rh: f64, pws: f64) -> AirResult<f64> {
    let pws = ensure_positive(pws, "saturation vapor pressure")?;
    let rh = ensure_finite(rh, "relative humidity")?;
    if !(0.0..=1.0).contains(&rh) {
        return Err(AirError::domain("relative humidity", rh, "must lie in [0, 1]"));
    }
    Ok(rh * pws)
}

/// `rh = pv / pws`. Values above 1 are returned as-is for the caller to judge.
pub fn relative_humidity_from_vapor_pressure(pv: f64, pws: f64) -> AirResult<f64> {
    let pws = ensure_positive(pws, "saturation vapor pressure")?;
    let pv = ensure_non_negative(pv, "vapor pressure")?;
    Ok(pv / pws)
}

/// Moist-air specific enthalpy [J/kg dry air].
pub fn enthalpy(dry_bulb_c: f64, w: f64) -> AirResult<f64> {
    let t = ensure_finite(dry_bulb_c, "dry-bulb temperature")?;
    let w = ensure_non_negative(w, "humidity ratio")?;
    Ok(enthalpy_unchecked(t, w))
}

/// Humidity ratio that gives enthalpy `h` at `dry_bulb_c`.
pub fn humidity_ratio_from_enthalpy(h: f64, dry_bulb_c: f64) -> AirResult<f64> {
    let h = ensure_finite(h, "enthalpy")?;
    let t = ensure_finite(dry_bulb_c, "dry-bulb temperature")?;
    let denom = LATENT_HEAT_0C + CP_VAPOR * t;
    if denom <= 0.0 {
        return Err(AirError::domain("dry-bulb temperature", t, "too low for enthalpy inversion"));
    }
    let w = (h - CP_DRY_AIR * t) / denom;
    if w < 0.0 {
        return Err(AirError::domain(
            "enthalpy",
            h,
            format!("below the dry-air enthalpy {:.1} J/kg at {t} °C", CP_DRY_AIR * t),
        ));
    }
    Ok(w)
}

/// Moist-air specific volume [m³/kg dry air].
pub fn specific_volume(dry_bulb_c: f64, w: f64, p: f64) -> AirResult<f64> {
    let p = ensure_positive(p, "pressure")?;
    let t = ensure_finite(dry_bulb_c, "dry-bulb temperature")?;
    let w = ensure_non_negative(w, "humidity ratio")?;
    Ok(R_DRY_AIR * (t + ZERO_CELSIUS_K) * (1.0 + VOLUME_VAPOR_FACTOR * w) / p)
}

/// Temperature at which `pv` is the saturation pressure.
///
/// Newton iteration on `ln pws(T) - ln pv` within the correlation range,
/// seeded with a Magnus estimate.
pub fn dew_point(pv: f64) -> AirResult<f64> {
    let pv = ensure_finite(pv, "vapor pressure")?;
    if pv <= 0.0 {
        return Err(AirError::domain(
            "vapor pressure",
            pv,
            "dew point is undefined for dry air",
        ));
    }
    let ln_pv = pv.ln();

    let gamma = (pv / 611.2).ln();
    let x0 = 243.12 * gamma / (17.62 - gamma);

    let bracket = Bracket::new(MIN_TEMPERATURE_C, MAX_TEMPERATURE_C)
        .map_err(|e| AirError::from_solver("dew-point temperature", e))?;
    let config = BracketConfig {
        max_iterations: DEW_POINT_MAX_ITERATIONS,
        f_tol: 1e-10,
        x_tol: DEW_POINT_X_TOL,
    };
    let root = newton_bisect(
        |t| Ok::<_, SolverError>(ln_saturation_pressure(t).0 - ln_pv),
        |t| Ok(ln_saturation_pressure(t).1),
        bracket,
        x0,
        &config,
    )
    .map_err(|e| AirError::from_solver("dew-point temperature", e))?;
    Ok(root.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saturation::saturation_vapor_pressure;

    #[test]
    fn humidity_ratio_and_vapor_pressure_invert() {
        let p = 101_325.0;
        let w = humidity_ratio_from_vapor_pressure(1_500.0, p).unwrap();
        let pv = vapor_pressure_from_humidity_ratio(w, p).unwrap();
        assert!((pv - 1_500.0).abs() < 1e-9);
    }

    #[test]
    fn vapor_pressure_at_total_pressure_is_rejected() {
        assert!(matches!(
            humidity_ratio_from_vapor_pressure(101_325.0, 101_325.0),
            Err(AirError::Domain { what: "vapor pressure", .. })
        ));
        assert!(humidity_ratio_from_vapor_pressure(-1.0, 101_325.0).is_err());
    }

    #[test]
    fn enthalpy_of_reference_state() {
        // 25 °C, W = 0.01 -> 25.15 + 0.01*(2501 + 46.5) kJ/kg
        let h = enthalpy(25.0, 0.01).unwrap();
        assert!((h - 50_625.0).abs() < 1e-6);
        let w = humidity_ratio_from_enthalpy(h, 25.0).unwrap();
        assert!((w - 0.01).abs() < 1e-12);
    }

    #[test]
    fn enthalpy_below_dry_air_is_rejected() {
        assert!(matches!(
            humidity_ratio_from_enthalpy(10_000.0, 25.0),
            Err(AirError::Domain { what: "enthalpy", .. })
        ));
    }

    #[test]
    fn specific_volume_of_dry_air() {
        let v = specific_volume(0.0, 0.0, 101_325.0).unwrap();
        assert!((v - 0.773_8).abs() < 1e-3);
    }

    #[test]
    fn relative_humidity_range() {
        assert!(vapor_pressure_from_relative_humidity(1.2, 3_000.0).is_err());
        let pv = vapor_pressure_from_relative_humidity(0.5, 3_000.0).unwrap();
        assert_eq!(relative_humidity_from_vapor_pressure(pv, 3_000.0).unwrap(), 0.5);
    }

    #[test]
    fn dew_point_inverts_saturation_pressure() {
        for t in [-60.0, -10.0, -0.5, 0.5, 12.0, 25.0, 90.0, 150.0] {
            let pws = saturation_vapor_pressure(t).unwrap();
            let dp = dew_point(pws).unwrap();
            assert!((dp - t).abs() < 1e-4, "t = {t}, dp = {dp}");
        }
    }

    #[test]
    fn dew_point_of_dry_air_is_undefined() {
        assert!(matches!(dew_point(0.0), Err(AirError::Domain { .. })));
    }

    #[test]
    fn dew_point_beyond_correlation_is_rejected() {
        // Above pws(200 °C) ~ 1.55 MPa
        assert!(matches!(dew_point(5.0e6), Err(AirError::Domain { .. })));
    }
}
