//! Input-pair dispatch: two known properties plus pressure to a full state.

use crate::equations::{
    dew_point, enthalpy, enthalpy_unchecked, humidity_ratio_from_enthalpy,
    humidity_ratio_from_vapor_pressure, specific_volume, vapor_pressure_from_humidity_ratio,
    vapor_pressure_from_humidity_ratio_unchecked,
};
use crate::error::{AirError, AirResult};
use crate::input::InputKind;
use crate::saturation::{
    MAX_TEMPERATURE_C, saturation_humidity_ratio, saturation_vapor_pressure,
};
use crate::search::Search;
use crate::state::{MoistAirState, RH_TOL, TEMP_TOL};
use crate::wet_bulb::{
    humidity_ratio_from_wet_bulb, humidity_ratio_from_wet_bulb_unchecked, solve_wet_bulb,
};
use pf_core::{ensure_finite, ensure_positive};
use pf_solver::{Bracket, BracketConfig, bisect};

/// Width of the dry-bulb search above a known wet bulb [°C].
const DRY_BULB_SEARCH_SPAN_C: f64 = 100.0;

/// A validated pair of inputs, normalised so the temperature anchor comes first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputPair {
    DryBulbRelativeHumidity { dry_bulb_c: f64, rh: f64 },
    DryBulbDewPoint { dry_bulb_c: f64, dew_point_c: f64 },
    DryBulbHumidityRatio { dry_bulb_c: f64, w: f64 },
    DryBulbEnthalpy { dry_bulb_c: f64, h: f64 },
    DryBulbWetBulb { dry_bulb_c: f64, wet_bulb_c: f64 },
    WetBulbRelativeHumidity { wet_bulb_c: f64, rh: f64 },
    WetBulbDewPoint { wet_bulb_c: f64, dew_point_c: f64 },
    WetBulbHumidityRatio { wet_bulb_c: f64, w: f64 },
    WetBulbEnthalpy { wet_bulb_c: f64, h: f64 },
}

impl InputPair {
    /// Classify two inputs given in either order.
    ///
    /// Fails with [`AirError::UnsupportedInputPair`] when the kinds repeat or
    /// neither is a dry- or wet-bulb temperature.
    pub fn new(kind_a: InputKind, a: f64, kind_b: InputKind, b: f64) -> AirResult<Self> {
        use InputKind::*;
        let unsupported = AirError::UnsupportedInputPair {
            first: kind_a,
            second: kind_b,
        };
        if kind_a == kind_b {
            return Err(unsupported);
        }

        let (anchor, anchor_value, other, other_value) = match (kind_a, kind_b) {
            (DryBulb, _) => (DryBulb, a, kind_b, b),
            (_, DryBulb) => (DryBulb, b, kind_a, a),
            (WetBulb, _) => (WetBulb, a, kind_b, b),
            (_, WetBulb) => (WetBulb, b, kind_a, a),
            _ => return Err(unsupported),
        };

        let pair = match (anchor, other) {
            (DryBulb, RelativeHumidity) => Self::DryBulbRelativeHumidity {
                dry_bulb_c: anchor_value,
                rh: other_value,
            },
            (DryBulb, DewPoint) => Self::DryBulbDewPoint {
                dry_bulb_c: anchor_value,
                dew_point_c: other_value,
            },
            (DryBulb, HumidityRatio) => Self::DryBulbHumidityRatio {
                dry_bulb_c: anchor_value,
                w: other_value,
            },
            (DryBulb, Enthalpy) => Self::DryBulbEnthalpy {
                dry_bulb_c: anchor_value,
                h: other_value,
            },
            (DryBulb, WetBulb) => Self::DryBulbWetBulb {
                dry_bulb_c: anchor_value,
                wet_bulb_c: other_value,
            },
            (WetBulb, RelativeHumidity) => Self::WetBulbRelativeHumidity {
                wet_bulb_c: anchor_value,
                rh: other_value,
            },
            (WetBulb, DewPoint) => Self::WetBulbDewPoint {
                wet_bulb_c: anchor_value,
                dew_point_c: other_value,
            },
            (WetBulb, HumidityRatio) => Self::WetBulbHumidityRatio {
                wet_bulb_c: anchor_value,
                w: other_value,
            },
            (WetBulb, Enthalpy) => Self::WetBulbEnthalpy {
                wet_bulb_c: anchor_value,
                h: other_value,
            },
            _ => return Err(unsupported),
        };
        Ok(pair)
    }

    /// The two kinds, anchor first.
    pub fn kinds(&self) -> (InputKind, InputKind) {
        use InputKind::*;
        match self {
            Self::DryBulbRelativeHumidity { .. } => (DryBulb, RelativeHumidity),
            Self::DryBulbDewPoint { .. } => (DryBulb, DewPoint),
            Self::DryBulbHumidityRatio { .. } => (DryBulb, HumidityRatio),
            Self::DryBulbEnthalpy { .. } => (DryBulb, Enthalpy),
            Self::DryBulbWetBulb { .. } => (DryBulb, WetBulb),
            Self::WetBulbRelativeHumidity { .. } => (WetBulb, RelativeHumidity),
            Self::WetBulbDewPoint { .. } => (WetBulb, DewPoint),
            Self::WetBulbHumidityRatio { .. } => (WetBulb, HumidityRatio),
            Self::WetBulbEnthalpy { .. } => (WetBulb, Enthalpy),
        }
    }
}

/// Resolve the full state of moist air at `pressure_pa` from two properties.
///
/// Temperatures are °C, relative humidity a fraction, humidity ratio kg/kg
/// and enthalpy J/kg dry air. The order of the two inputs does not matter.
pub fn resolve(
    pressure_pa: f64,
    kind_a: InputKind,
    value_a: f64,
    kind_b: InputKind,
    value_b: f64,
) -> AirResult<MoistAirState> {
    let pair = InputPair::new(kind_a, value_a, kind_b, value_b)?;
    resolve_pair(pressure_pa, pair)
}

/// Resolve an already classified pair.
pub fn resolve_pair(pressure_pa: f64, pair: InputPair) -> AirResult<MoistAirState> {
    let p = ensure_positive(pressure_pa, "pressure")?;
    match pair {
        InputPair::DryBulbRelativeHumidity { dry_bulb_c, rh } => {
            let t = dry_bulb(dry_bulb_c)?;
            let rh = relative_humidity(rh)?;
            let pws = saturation_vapor_pressure(t)?;
            let w = humidity_ratio_from_vapor_pressure(rh * pws, p)?;
            complete(p, t, w, (InputKind::RelativeHumidity, rh), None, None)
        }
        InputPair::DryBulbDewPoint {
            dry_bulb_c,
            dew_point_c,
        } => {
            let t = dry_bulb(dry_bulb_c)?;
            let dew = not_above(dew_point_c, "dew-point temperature", t, "dry-bulb")?;
            let w = saturation_humidity_ratio(dew, p)?;
            complete(p, t, w, (InputKind::DewPoint, dew), None, Some(dew))
        }
        InputPair::DryBulbHumidityRatio { dry_bulb_c, w } => {
            let t = dry_bulb(dry_bulb_c)?;
            let w = humidity_ratio(w)?;
            complete(p, t, w, (InputKind::HumidityRatio, w), None, None)
        }
        InputPair::DryBulbEnthalpy { dry_bulb_c, h } => {
            let t = dry_bulb(dry_bulb_c)?;
            let w = humidity_ratio_from_enthalpy(h, t)?;
            complete(p, t, w, (InputKind::Enthalpy, h), None, None)
        }
        InputPair::DryBulbWetBulb {
            dry_bulb_c,
            wet_bulb_c,
        } => {
            let t = dry_bulb(dry_bulb_c)?;
            let tw = not_above(wet_bulb_c, "wet-bulb temperature", t, "dry-bulb")?;
            let w = humidity_ratio_from_wet_bulb(t, tw, p)?;
            complete(p, t, w, (InputKind::WetBulb, tw), Some(tw), None)
        }
        InputPair::WetBulbRelativeHumidity { wet_bulb_c, rh } => {
            let tw = ensure_finite(wet_bulb_c, "wet-bulb temperature")?;
            let rh = relative_humidity(rh)?;
            let t = search_dry_bulb(p, tw, 1e-9, |t, w| {
                let pv = vapor_pressure_from_humidity_ratio_unchecked(w, p);
                Ok(pv / saturation_vapor_pressure(t)? - rh)
            })?;
            complete_from_wet_bulb(p, t, tw, (InputKind::RelativeHumidity, rh), None)
        }
        InputPair::WetBulbDewPoint {
            wet_bulb_c,
            dew_point_c,
        } => {
            let tw = ensure_finite(wet_bulb_c, "wet-bulb temperature")?;
            let dew = not_above(dew_point_c, "dew-point temperature", tw, "wet-bulb")?;
            let w_dew = saturation_humidity_ratio(dew, p)?;
            let t = search_dry_bulb(p, tw, 1e-10, |_, w| Ok(w - w_dew))?;
            complete_from_wet_bulb(p, t, tw, (InputKind::DewPoint, dew), Some(dew))
        }
        InputPair::WetBulbHumidityRatio { wet_bulb_c, w } => {
            let tw = ensure_finite(wet_bulb_c, "wet-bulb temperature")?;
            let target = humidity_ratio(w)?;
            let t = search_dry_bulb(p, tw, 1e-10, |_, w| Ok(w - target))?;
            complete_from_wet_bulb(p, t, tw, (InputKind::HumidityRatio, target), None)
        }
        InputPair::WetBulbEnthalpy { wet_bulb_c, h } => {
            let tw = ensure_finite(wet_bulb_c, "wet-bulb temperature")?;
            let h = ensure_finite(h, "enthalpy")?;
            // Above freezing, enthalpy along a wet-bulb line varies as
            // 4186·t*·W and carries no information at t* = 0.
            if (0.0..TEMP_TOL).contains(&tw) {
                return Err(AirError::domain(
                    "wet-bulb temperature",
                    tw,
                    "enthalpy does not vary along the 0 °C wet-bulb line",
                ));
            }
            let t = search_dry_bulb(p, tw, 1e-6, |t, w| Ok(enthalpy_unchecked(t, w) - h))?;
            complete_from_wet_bulb(p, t, tw, (InputKind::Enthalpy, h), None)
        }
    }
}

fn dry_bulb(t: f64) -> AirResult<f64> {
    Ok(ensure_finite(t, "dry-bulb temperature")?)
}

fn humidity_ratio(w: f64) -> AirResult<f64> {
    let w = ensure_finite(w, "humidity ratio")?;
    if w < 0.0 {
        return Err(AirError::domain("humidity ratio", w, "must not be negative"));
    }
    Ok(w)
}

/// Relative humidity in [0, 1], capping values a hair above saturation.
fn relative_humidity(rh: f64) -> AirResult<f64> {
    let rh = ensure_finite(rh, "relative humidity")?;
    if !(0.0..=1.0 + RH_TOL).contains(&rh) {
        return Err(AirError::domain("relative humidity", rh, "must lie in [0, 1]"));
    }
    Ok(rh.min(1.0))
}

/// `value` must not exceed `limit`; overshoot within tolerance is clamped.
fn not_above(
    value: f64,
    what: &'static str,
    limit: f64,
    limit_name: &'static str,
) -> AirResult<f64> {
    let value = ensure_finite(value, what)?;
    if value > limit + TEMP_TOL {
        return Err(AirError::domain(
            what,
            value,
            format!("must not exceed the {limit_name} temperature {limit} °C"),
        ));
    }
    Ok(value.min(limit))
}

/// Find the dry bulb on the `wet_bulb_c` line where `residual(t, W(t))`
/// vanishes; `W(t)` follows the wet-bulb relation and may dip below zero near
/// the hot end of the interval.
fn search_dry_bulb<R>(p: f64, wet_bulb_c: f64, f_tol: f64, residual: R) -> AirResult<f64>
where
    R: Fn(f64, f64) -> AirResult<f64>,
{
    let ws_star = saturation_humidity_ratio(wet_bulb_c, p)?;
    let hi = (wet_bulb_c + DRY_BULB_SEARCH_SPAN_C).min(MAX_TEMPERATURE_C);
    let bracket = Bracket::new(wet_bulb_c, hi)
        .map_err(|e| AirError::from_solver("dry-bulb temperature", e))?;
    let config = BracketConfig {
        max_iterations: 100,
        f_tol,
        x_tol: 1e-6,
    };
    let root = bisect(
        |t| -> Result<f64, Search> {
            let w = humidity_ratio_from_wet_bulb_unchecked(t, wet_bulb_c, ws_star);
            Ok(residual(t, w)?)
        },
        bracket,
        &config,
    )
    .map_err(|e| e.into_air("dry-bulb temperature"))?;
    Ok(root.x)
}

fn complete_from_wet_bulb(
    p: f64,
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    moisture: (InputKind, f64),
    known_dew: Option<f64>,
) -> AirResult<MoistAirState> {
    let w = humidity_ratio_from_wet_bulb(dry_bulb_c, wet_bulb_c, p)?;
    complete(p, dry_bulb_c, w, moisture, Some(wet_bulb_c), known_dew)
}

/// Derive every remaining property from dry bulb and humidity ratio.
///
/// Temperatures the caller supplied are kept verbatim rather than re-derived.
/// `moisture` is the caller's input that fixed `w`; supersaturation is
/// reported against it.
fn complete(
    p: f64,
    dry_bulb_c: f64,
    w: f64,
    moisture: (InputKind, f64),
    known_wet_bulb: Option<f64>,
    known_dew: Option<f64>,
) -> AirResult<MoistAirState> {
    // Also rejects dry bulbs at or above the boiling point for `p`.
    saturation_humidity_ratio(dry_bulb_c, p)?;
    let pws = saturation_vapor_pressure(dry_bulb_c)?;
    let pv = vapor_pressure_from_humidity_ratio(w, p)?;

    let rh = pv / pws;
    if rh > 1.0 + RH_TOL {
        let (kind, value) = moisture;
        return Err(AirError::domain(
            kind.label(),
            value,
            format!(
                "implies humidity ratio {w} above saturation at {dry_bulb_c} °C \
                 (relative humidity {rh:.6})"
            ),
        ));
    }
    let rh = rh.min(1.0);
    let pv = pv.min(pws);

    let dew = match known_dew {
        Some(dew) => dew,
        None => dew_point(pv)?.min(dry_bulb_c),
    };
    let wet_bulb = match known_wet_bulb {
        Some(tw) => tw,
        None => solve_wet_bulb(dry_bulb_c, w, p, dew)?,
    };
    let dew = if dew > wet_bulb && dew <= wet_bulb + TEMP_TOL {
        wet_bulb
    } else {
        dew
    };

    let state = MoistAirState {
        pressure_pa: p,
        dry_bulb_c,
        wet_bulb_c: wet_bulb,
        dew_point_c: dew,
        humidity_ratio: w,
        relative_humidity: rh,
        enthalpy: enthalpy(dry_bulb_c, w)?,
        specific_volume: specific_volume(dry_bulb_c, w, p)?,
        vapor_pressure_pa: pv,
        saturation_vapor_pressure_pa: pws,
    };
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use InputKind::*;

    const P: f64 = 101_325.0;

    #[test]
    fn pair_order_is_normalised() {
        let a = InputPair::new(RelativeHumidity, 0.5, DryBulb, 25.0).unwrap();
        let b = InputPair::new(DryBulb, 25.0, RelativeHumidity, 0.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kinds(), (DryBulb, RelativeHumidity));

        let c = InputPair::new(DryBulb, 25.0, WetBulb, 18.0).unwrap();
        assert_eq!(c.kinds(), (DryBulb, WetBulb));
    }

    #[test]
    fn repeated_or_unanchored_kinds_are_rejected() {
        for (a, b) in [
            (DryBulb, DryBulb),
            (WetBulb, WetBulb),
            (RelativeHumidity, HumidityRatio),
            (DewPoint, Enthalpy),
        ] {
            assert!(matches!(
                InputPair::new(a, 1.0, b, 1.0),
                Err(AirError::UnsupportedInputPair { .. })
            ));
        }
    }

    #[test]
    fn dew_point_above_dry_bulb_is_rejected() {
        let err = resolve(P, DryBulb, 20.0, DewPoint, 22.0).unwrap_err();
        assert!(matches!(err, AirError::Domain { what: "dew-point temperature", .. }));
    }

    #[test]
    fn slight_overshoot_is_clamped() {
        let s = resolve(P, DryBulb, 20.0, WetBulb, 20.0005).unwrap();
        assert_eq!(s.wet_bulb_c(), 20.0);
        assert!(s.is_saturated());
    }

    #[test]
    fn humidity_ratio_beyond_saturation_is_rejected() {
        let err = resolve(P, DryBulb, 20.0, HumidityRatio, 0.05).unwrap_err();
        assert!(matches!(err, AirError::Domain { what: "humidity ratio", .. }));
    }

    #[test]
    fn boiling_air_is_rejected() {
        assert!(matches!(
            resolve(P, DryBulb, 120.0, RelativeHumidity, 0.1),
            Err(AirError::Domain { .. })
        ));
    }

    #[test]
    fn wet_bulb_with_enthalpy_at_freezing_is_rejected() {
        assert!(matches!(
            resolve(P, WetBulb, 0.0, Enthalpy, 9_000.0),
            Err(AirError::Domain { what: "wet-bulb temperature", .. })
        ));
    }

    #[test]
    fn wet_bulb_pairs_recover_dry_bulb() {
        let reference = resolve(P, DryBulb, 30.0, RelativeHumidity, 0.4).unwrap();
        let tw = reference.wet_bulb_c();
        for (kind, value) in [
            (RelativeHumidity, reference.relative_humidity()),
            (DewPoint, reference.dew_point_c()),
            (HumidityRatio, reference.humidity_ratio()),
            (Enthalpy, reference.enthalpy_j_per_kg()),
        ] {
            let s = resolve(P, WetBulb, tw, kind, value).unwrap();
            assert!(
                (s.dry_bulb_c() - 30.0).abs() < 0.05,
                "{kind}: dry bulb {}",
                s.dry_bulb_c()
            );
        }
    }

    #[test]
    fn non_positive_pressure_is_rejected() {
        assert!(matches!(
            resolve(0.0, DryBulb, 25.0, RelativeHumidity, 0.5),
            Err(AirError::Domain { what: "pressure", .. })
        ));
    }
}
