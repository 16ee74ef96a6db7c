//! Numeric series for a psychrometric chart.
//!
//! Every curve is a list of `(dry bulb °C, humidity ratio kg/kg)` points.
//! Curves are independent and are computed in parallel. Nothing here draws.

use crate::equations::{enthalpy, humidity_ratio_from_enthalpy, humidity_ratio_from_vapor_pressure};
use crate::error::{AirError, AirResult};
use crate::saturation::{
    MAX_TEMPERATURE_C, MIN_TEMPERATURE_C, saturation_humidity_ratio, saturation_vapor_pressure,
};
use crate::wet_bulb::humidity_ratio_from_wet_bulb;
use pf_core::ensure_positive;
use rayon::prelude::*;
use std::fmt;

/// Chart extent and line spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub pressure_pa: f64,
    pub dry_bulb_min_c: f64,
    pub dry_bulb_max_c: f64,
    /// Dry-bulb samples per curve
    pub points: usize,
    /// Relative humidities drawn below saturation
    pub rh_levels: Vec<f64>,
    /// Spacing of constant-enthalpy lines [J/kg]
    pub enthalpy_step: f64,
    /// Spacing of constant-wet-bulb lines [°C]
    pub wet_bulb_step: f64,
}

impl ChartSpec {
    pub fn new(pressure_pa: f64, dry_bulb_min_c: f64, dry_bulb_max_c: f64) -> Self {
        Self {
            pressure_pa,
            dry_bulb_min_c,
            dry_bulb_max_c,
            points: 50,
            rh_levels: vec![0.2, 0.4, 0.6, 0.8],
            enthalpy_step: 10_000.0,
            wet_bulb_step: 5.0,
        }
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    fn validate(&self) -> AirResult<()> {
        ensure_positive(self.pressure_pa, "pressure")?;
        let (lo, hi) = (self.dry_bulb_min_c, self.dry_bulb_max_c);
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(AirError::domain("dry-bulb temperature", lo, "chart range must be increasing"));
        }
        if lo < MIN_TEMPERATURE_C || hi > MAX_TEMPERATURE_C {
            return Err(AirError::domain(
                "dry-bulb temperature",
                if lo < MIN_TEMPERATURE_C { lo } else { hi },
                "chart range outside the saturation correlation",
            ));
        }
        if self.points < 2 {
            return Err(AirError::domain("points", self.points as f64, "need at least 2"));
        }
        for &rh in &self.rh_levels {
            if !(rh > 0.0 && rh < 1.0) {
                return Err(AirError::domain("relative humidity", rh, "chart levels lie in (0, 1)"));
            }
        }
        ensure_positive(self.enthalpy_step, "enthalpy step")?;
        ensure_positive(self.wet_bulb_step, "wet-bulb step")?;
        Ok(())
    }

    fn grid(&self) -> Vec<f64> {
        let last = (self.points - 1) as f64;
        let span = self.dry_bulb_max_c - self.dry_bulb_min_c;
        (0..self.points)
            .map(|i| self.dry_bulb_min_c + span * i as f64 / last)
            .collect()
    }
}

/// What a curve holds constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveKind {
    Saturation,
    RelativeHumidity(f64),
    /// J/kg dry air
    Enthalpy(f64),
    /// °C
    WetBulb(f64),
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saturation => write!(f, "saturation"),
            Self::RelativeHumidity(rh) => write!(f, "rh={:.0}%", rh * 100.0),
            Self::Enthalpy(h) => write!(f, "h={:.0}kJ/kg", h / 1e3),
            Self::WetBulb(t) => write!(f, "wb={t:.1}C"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartCurve {
    pub kind: CurveKind,
    /// `(dry bulb °C, humidity ratio kg/kg)`
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub spec: ChartSpec,
    pub curves: Vec<ChartCurve>,
}

impl ChartData {
    pub fn curve(&self, kind: CurveKind) -> Option<&ChartCurve> {
        self.curves.iter().find(|c| c.kind == kind)
    }

    pub fn saturation(&self) -> Option<&ChartCurve> {
        self.curve(CurveKind::Saturation)
    }
}

/// Multiples of `step` within `[lo, hi]`.
fn levels(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Humidity ratio on `kind` at `t`, or `None` where the curve leaves the
/// chart (above saturation, below dry air, past boiling).
fn sample(kind: CurveKind, t: f64, p: f64) -> Option<f64> {
    let ws = saturation_humidity_ratio(t, p).ok()?;
    let w = match kind {
        CurveKind::Saturation => ws,
        CurveKind::RelativeHumidity(rh) => {
            let pv = rh * saturation_vapor_pressure(t).ok()?;
            humidity_ratio_from_vapor_pressure(pv, p).ok()?
        }
        CurveKind::Enthalpy(h) => humidity_ratio_from_enthalpy(h, t).ok()?,
        CurveKind::WetBulb(tw) if tw <= t => humidity_ratio_from_wet_bulb(t, tw, p).ok()?,
        CurveKind::WetBulb(_) => return None,
    };
    // Round-off on the saturation curve itself must not drop the point.
    (w <= ws * (1.0 + 1e-9)).then_some(w.min(ws))
}

/// Compute chart curves over the dry-bulb range of `spec`.
pub fn generate_chart(spec: &ChartSpec) -> AirResult<ChartData> {
    spec.validate()?;
    let p = spec.pressure_pa;
    let grid = spec.grid();

    let mut kinds = vec![CurveKind::Saturation];
    kinds.extend(spec.rh_levels.iter().map(|&rh| CurveKind::RelativeHumidity(rh)));

    // Enthalpy lines span dry air at the cold end to the hottest point that
    // is still below saturation.
    let w_top = grid
        .iter()
        .rev()
        .find_map(|&t| saturation_humidity_ratio(t, p).ok().map(|w| (t, w)));
    let Some((t_top, w_top)) = w_top else {
        return Err(AirError::domain(
            "pressure",
            p,
            "chart range lies entirely above the boiling point",
        ));
    };
    let h_lo = enthalpy(spec.dry_bulb_min_c, 0.0)?;
    let h_hi = enthalpy(t_top, w_top)?;
    kinds.extend(
        levels(h_lo, h_hi, spec.enthalpy_step)
            .into_iter()
            .map(CurveKind::Enthalpy),
    );
    kinds.extend(
        levels(spec.dry_bulb_min_c, t_top, spec.wet_bulb_step)
            .into_iter()
            .map(CurveKind::WetBulb),
    );

    let curves: Vec<ChartCurve> = kinds
        .into_par_iter()
        .map(|kind| ChartCurve {
            kind,
            points: grid
                .iter()
                .filter_map(|&t| sample(kind, t, p).map(|w| (t, w)))
                .collect(),
        })
        .filter(|curve| curve.points.len() >= 2)
        .collect();

    Ok(ChartData {
        spec: spec.clone(),
        curves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartData {
        generate_chart(&ChartSpec::new(101_325.0, 0.0, 50.0).with_points(26)).unwrap()
    }

    #[test]
    fn saturation_curve_rises() {
        let data = chart();
        let sat = data.saturation().unwrap();
        assert_eq!(sat.points.len(), 26);
        assert!(sat.points.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn rh_curves_sit_below_saturation() {
        let data = chart();
        let sat = data.saturation().unwrap();
        let half = data.curve(CurveKind::RelativeHumidity(0.4)).unwrap();
        for (a, b) in half.points.iter().zip(&sat.points) {
            assert_eq!(a.0, b.0);
            assert!(a.1 < b.1);
        }
    }

    #[test]
    fn enthalpy_lines_slope_down() {
        let data = chart();
        let line = data.curve(CurveKind::Enthalpy(50_000.0)).unwrap();
        assert!(line.points.windows(2).all(|w| w[0].1 > w[1].1));
        assert!(line.points.len() >= 2);
    }

    #[test]
    fn wet_bulb_lines_start_on_saturation() {
        let data = chart();
        let line = data.curve(CurveKind::WetBulb(20.0)).unwrap();
        let (t0, w0) = line.points[0];
        assert_eq!(t0, 20.0);
        let ws = saturation_humidity_ratio(20.0, 101_325.0).unwrap();
        assert!((w0 - ws).abs() < 1e-12);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(generate_chart(&ChartSpec::new(101_325.0, 40.0, 10.0)).is_err());
    }

    #[test]
    fn range_above_boiling_is_clipped() {
        let data = generate_chart(&ChartSpec::new(101_325.0, 50.0, 150.0).with_points(11)).unwrap();
        let sat = data.saturation().unwrap();
        assert!(sat.points.iter().all(|&(t, _)| t < 100.0));
    }
}
