//! Psychrometric wet-bulb relation and its inversion.

use crate::equations::{dew_point, vapor_pressure_from_humidity_ratio};
use crate::error::{AirError, AirResult};
use crate::saturation::{MIN_TEMPERATURE_C, saturation_humidity_ratio};
use crate::search::Search;
use pf_core::{ensure_finite, ensure_positive};
use pf_solver::{Bracket, BracketConfig, bisect};

/// Stopping rules for the wet-bulb search: residual in kg/kg, step in °C.
pub(crate) const WET_BULB_CONFIG: BracketConfig = BracketConfig {
    max_iterations: 100,
    f_tol: 1e-9,
    x_tol: 1e-6,
};

/// Extra room below the dew point so round-off cannot hide the sign change.
const LOWER_MARGIN_C: f64 = 0.01;

/// Humidity ratio implied by `wet_bulb_c` given `ws_star = Ws(wet_bulb_c)`.
///
/// ASHRAE Fundamentals 2017, ch. 1, eq. 33 (water) and eq. 35 (ice). May be
/// negative when the depression is too large for any real state.
pub(crate) fn humidity_ratio_from_wet_bulb_unchecked(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    ws_star: f64,
) -> f64 {
    let (t, tw) = (dry_bulb_c, wet_bulb_c);
    if tw >= 0.0 {
        ((2_501.0 - 2.326 * tw) * ws_star - 1.006 * (t - tw)) / (2_501.0 + 1.86 * t - 4.186 * tw)
    } else {
        ((2_830.0 - 0.24 * tw) * ws_star - 1.006 * (t - tw)) / (2_830.0 + 1.86 * t - 2.1 * tw)
    }
}

/// Humidity ratio [kg/kg] of air at `dry_bulb_c` whose wet bulb is `wet_bulb_c`.
pub fn humidity_ratio_from_wet_bulb(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    pressure_pa: f64,
) -> AirResult<f64> {
    let t = ensure_finite(dry_bulb_c, "dry-bulb temperature")?;
    let tw = ensure_finite(wet_bulb_c, "wet-bulb temperature")?;
    if tw > t {
        return Err(AirError::domain(
            "wet-bulb temperature",
            tw,
            format!("must not exceed the dry-bulb temperature {t} °C"),
        ));
    }
    let ws_star = saturation_humidity_ratio(tw, pressure_pa)?;
    let w = humidity_ratio_from_wet_bulb_unchecked(t, tw, ws_star);
    if w < 0.0 {
        return Err(AirError::domain(
            "wet-bulb temperature",
            tw,
            format!("depression below {t} °C is too large for any humidity"),
        ));
    }
    Ok(w)
}

/// Wet-bulb temperature [°C] for air at `dry_bulb_c` holding `w` kg/kg.
pub fn wet_bulb_temperature(dry_bulb_c: f64, w: f64, pressure_pa: f64) -> AirResult<f64> {
    let p = ensure_positive(pressure_pa, "pressure")?;
    let pv = vapor_pressure_from_humidity_ratio(w, p)?;
    let dew = dew_point(pv)?;
    solve_wet_bulb(dry_bulb_c, w, p, dew)
}

/// Bisect the wet-bulb relation on `[dew_point_c, dry_bulb_c]`.
pub(crate) fn solve_wet_bulb(
    dry_bulb_c: f64,
    w: f64,
    pressure_pa: f64,
    dew_point_c: f64,
) -> AirResult<f64> {
    let lower = dew_point_c.min(dry_bulb_c);
    let bracket = Bracket::new((lower - LOWER_MARGIN_C).max(MIN_TEMPERATURE_C), dry_bulb_c)
        .map_err(|e| AirError::from_solver("wet-bulb temperature", e))?;

    let root = bisect(
        |tw| -> Result<f64, Search> {
            let ws_star = saturation_humidity_ratio(tw, pressure_pa)?;
            Ok(humidity_ratio_from_wet_bulb_unchecked(dry_bulb_c, tw, ws_star) - w)
        },
        bracket,
        &WET_BULB_CONFIG,
    )
    .map_err(|e| e.into_air("wet-bulb temperature"))?;

    Ok(root.x.clamp(lower, dry_bulb_c))
}
