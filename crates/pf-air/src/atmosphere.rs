//! Standard-atmosphere pressure at altitude.

use crate::error::{AirError, AirResult};
use pf_core::constants::STANDARD_PRESSURE_PA;
use pf_core::units::{Length, Pressure, pa};
use uom::si::length::meter;

const LAPSE_FACTOR_PER_M: f64 = 2.255_77e-5;
const EXPONENT: f64 = 5.255_9;

/// Clamp bounds as fractions of sea-level pressure.
const MIN_FRACTION: f64 = 0.1;
const MAX_FRACTION: f64 = 1.1;

/// Barometric pressure [Pa] at `altitude_m` above sea level
/// (ASHRAE Fundamentals 2017, ch. 1, eq. 3).
///
/// The result is kept within 10 % to 110 % of sea-level pressure so very
/// high or deep altitudes still give a usable pressure.
pub fn pressure_from_altitude(altitude_m: f64) -> AirResult<f64> {
    if !altitude_m.is_finite() {
        return Err(AirError::domain("altitude", altitude_m, "must be finite"));
    }
    let base = (1.0 - LAPSE_FACTOR_PER_M * altitude_m).max(0.0);
    let p = STANDARD_PRESSURE_PA * base.powf(EXPONENT);
    Ok(p.clamp(
        MIN_FRACTION * STANDARD_PRESSURE_PA,
        MAX_FRACTION * STANDARD_PRESSURE_PA,
    ))
}

/// [`pressure_from_altitude`] on uom quantities.
pub fn pressure_at(altitude: Length) -> AirResult<Pressure> {
    Ok(pa(pressure_from_altitude(altitude.get::<meter>())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::m;
    use uom::si::pressure::kilopascal;

    #[test]
    fn sea_level_is_standard() {
        assert_eq!(pressure_from_altitude(0.0).unwrap(), STANDARD_PRESSURE_PA);
    }

    #[test]
    fn matches_ashrae_table() {
        // ASHRAE table 1: 1500 m -> 84.556 kPa, 3000 m -> 70.109 kPa
        let p = pressure_at(m(1_500.0)).unwrap().get::<kilopascal>();
        assert!((p - 84.556).abs() < 0.05, "p = {p}");
        let p = pressure_from_altitude(3_000.0).unwrap() / 1e3;
        assert!((p - 70.109).abs() < 0.05, "p = {p}");
    }

    #[test]
    fn extreme_altitudes_are_clamped() {
        assert_eq!(
            pressure_from_altitude(60_000.0).unwrap(),
            0.1 * STANDARD_PRESSURE_PA
        );
        assert_eq!(
            pressure_from_altitude(-5_000.0).unwrap(),
            1.1 * STANDARD_PRESSURE_PA
        );
    }

    #[test]
    fn non_finite_altitude_is_rejected() {
        assert!(matches!(
            pressure_from_altitude(f64::NAN),
            Err(AirError::Domain { what: "altitude", .. })
        ));
    }
}
