//! Saturation vapor pressure and saturation humidity ratio.
//!
//! Hyland–Wexler correlation as tabulated in ASHRAE Fundamentals (2017),
//! chapter 1, eq. 5 (over ice, −100 °C to 0 °C) and eq. 6 (over liquid water,
//! 0 °C to 200 °C). Temperatures are in °C at the API boundary.

use crate::equations::MOLAR_MASS_RATIO;
use crate::error::{AirError, AirResult};
use pf_core::constants::ZERO_CELSIUS_K;
use pf_core::{ensure_finite, ensure_positive};

/// Lowest temperature covered by the correlation [°C].
pub const MIN_TEMPERATURE_C: f64 = -100.0;

/// Highest temperature covered by the correlation [°C].
pub const MAX_TEMPERATURE_C: f64 = 200.0;

/// Eq. 5, C1..C7.
const ICE: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843_0e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024_0e-13,
    4.163_501_9,
];

/// Eq. 6, C8..C13.
const WATER: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

fn ensure_in_range(t_c: f64, what: &'static str) -> AirResult<f64> {
    let t_c = ensure_finite(t_c, what)?;
    if !(MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&t_c) {
        return Err(AirError::domain(
            what,
            t_c,
            format!(
                "outside the saturation correlation range [{MIN_TEMPERATURE_C}, {MAX_TEMPERATURE_C}] °C"
            ),
        ));
    }
    Ok(t_c)
}

/// `ln(pws)` and its temperature derivative at `t_c` (no range check).
pub(crate) fn ln_saturation_pressure(t_c: f64) -> (f64, f64) {
    let t = t_c + ZERO_CELSIUS_K;
    if t_c < 0.0 {
        let [c1, c2, c3, c4, c5, c6, c7] = ICE;
        let ln_p = c1 / t + c2 + t * (c3 + t * (c4 + t * (c5 + t * c6))) + c7 * t.ln();
        let d_ln_p = -c1 / (t * t) + c3 + t * (2.0 * c4 + t * (3.0 * c5 + t * 4.0 * c6)) + c7 / t;
        (ln_p, d_ln_p)
    } else {
        let [c8, c9, c10, c11, c12, c13] = WATER;
        let ln_p = c8 / t + c9 + t * (c10 + t * (c11 + t * c12)) + c13 * t.ln();
        let d_ln_p = -c8 / (t * t) + c10 + t * (2.0 * c11 + t * 3.0 * c12) + c13 / t;
        (ln_p, d_ln_p)
    }
}

/// Saturation vapor pressure [Pa] at `dry_bulb_c` [°C].
pub fn saturation_vapor_pressure(dry_bulb_c: f64) -> AirResult<f64> {
    let t_c = ensure_in_range(dry_bulb_c, "temperature")?;
    Ok(ln_saturation_pressure(t_c).0.exp())
}

/// Saturation humidity ratio [kg/kg] at `dry_bulb_c` [°C] and `pressure_pa`.
///
/// Fails when the total pressure does not exceed the saturation pressure,
/// i.e. at or above the boiling point for that pressure.
pub fn saturation_humidity_ratio(dry_bulb_c: f64, pressure_pa: f64) -> AirResult<f64> {
    let p = ensure_positive(pressure_pa, "pressure")?;
    let pws = saturation_vapor_pressure(dry_bulb_c)?;
    if p <= pws {
        return Err(AirError::domain(
            "pressure",
            p,
            format!("must exceed the saturation pressure {pws:.3} Pa at {dry_bulb_c} °C"),
        ));
    }
    Ok(MOLAR_MASS_RATIO * pws / (p - pws))
}
