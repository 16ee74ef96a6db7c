//! Resolved moist-air state.

use crate::equations::{enthalpy_unchecked, humidity_ratio_from_vapor_pressure_unchecked};
use crate::error::{AirError, AirResult};
use pf_core::units::{Pressure, TempInterval, Temperature, celsius, pa};
use pf_core::{Tolerances, le_within, nearly_equal};

/// Specific enthalpy [J/kg dry air].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific volume [m³/kg dry air].
pub type SpecVolume = f64;

/// Slack allowed on temperature orderings [°C].
pub(crate) const TEMP_TOL: f64 = 1e-3;

/// Slack allowed on relative humidity above saturation.
pub(crate) const RH_TOL: f64 = 1e-6;

/// Complete thermodynamic description of a parcel of moist air.
///
/// Built only by the resolver, which checks every invariant before handing
/// it out; fields are therefore read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistAirState {
    pub(crate) pressure_pa: f64,
    pub(crate) dry_bulb_c: f64,
    pub(crate) wet_bulb_c: f64,
    pub(crate) dew_point_c: f64,
    pub(crate) humidity_ratio: f64,
    pub(crate) relative_humidity: f64,
    pub(crate) enthalpy: SpecEnthalpy,
    pub(crate) specific_volume: SpecVolume,
    pub(crate) vapor_pressure_pa: f64,
    pub(crate) saturation_vapor_pressure_pa: f64,
}

impl MoistAirState {
    pub fn pressure_pa(&self) -> f64 {
        self.pressure_pa
    }

    pub fn dry_bulb_c(&self) -> f64 {
        self.dry_bulb_c
    }

    pub fn wet_bulb_c(&self) -> f64 {
        self.wet_bulb_c
    }

    pub fn dew_point_c(&self) -> f64 {
        self.dew_point_c
    }

    /// kg water per kg dry air.
    pub fn humidity_ratio(&self) -> f64 {
        self.humidity_ratio
    }

    /// Fraction in [0, 1].
    pub fn relative_humidity(&self) -> f64 {
        self.relative_humidity
    }

    pub fn enthalpy_j_per_kg(&self) -> SpecEnthalpy {
        self.enthalpy
    }

    pub fn specific_volume_m3_per_kg(&self) -> SpecVolume {
        self.specific_volume
    }

    pub fn vapor_pressure_pa(&self) -> f64 {
        self.vapor_pressure_pa
    }

    pub fn saturation_vapor_pressure_pa(&self) -> f64 {
        self.saturation_vapor_pressure_pa
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn dry_bulb(&self) -> Temperature {
        celsius(self.dry_bulb_c)
    }

    pub fn wet_bulb(&self) -> Temperature {
        celsius(self.wet_bulb_c)
    }

    pub fn dew_point(&self) -> Temperature {
        celsius(self.dew_point_c)
    }

    pub fn wet_bulb_depression(&self) -> TempInterval {
        use uom::si::temperature_interval::degree_celsius;
        TempInterval::new::<degree_celsius>(self.dry_bulb_c - self.wet_bulb_c)
    }

    /// Relative humidity at 1 within tolerance.
    pub fn is_saturated(&self) -> bool {
        self.relative_humidity >= 1.0 - RH_TOL
    }

    /// Value of one of the resolver input properties.
    pub fn get(&self, kind: crate::InputKind) -> f64 {
        use crate::InputKind::*;
        match kind {
            DryBulb => self.dry_bulb_c,
            WetBulb => self.wet_bulb_c,
            RelativeHumidity => self.relative_humidity,
            DewPoint => self.dew_point_c,
            HumidityRatio => self.humidity_ratio,
            Enthalpy => self.enthalpy,
        }
    }

    /// Check every state invariant, returning the first one that fails.
    pub(crate) fn validate(&self) -> AirResult<()> {
        let fields = [
            ("pressure", self.pressure_pa),
            ("dry-bulb temperature", self.dry_bulb_c),
            ("wet-bulb temperature", self.wet_bulb_c),
            ("dew-point temperature", self.dew_point_c),
            ("humidity ratio", self.humidity_ratio),
            ("relative humidity", self.relative_humidity),
            ("enthalpy", self.enthalpy),
            ("specific volume", self.specific_volume),
            ("vapor pressure", self.vapor_pressure_pa),
            ("saturation vapor pressure", self.saturation_vapor_pressure_pa),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(inconsistent(format!("{name} is not finite ({value})")));
            }
        }

        let temp = Tolerances::absolute(TEMP_TOL);
        if !le_within(self.dew_point_c, self.wet_bulb_c, temp) {
            return Err(inconsistent(format!(
                "dew point {} °C above wet bulb {} °C",
                self.dew_point_c, self.wet_bulb_c
            )));
        }
        if !le_within(self.wet_bulb_c, self.dry_bulb_c, temp) {
            return Err(inconsistent(format!(
                "wet bulb {} °C above dry bulb {} °C",
                self.wet_bulb_c, self.dry_bulb_c
            )));
        }
        if !(0.0..=1.0).contains(&self.relative_humidity) {
            return Err(inconsistent(format!(
                "relative humidity {} outside [0, 1]",
                self.relative_humidity
            )));
        }
        if self.humidity_ratio < 0.0 || self.vapor_pressure_pa < 0.0 {
            return Err(inconsistent("negative moisture content".to_string()));
        }
        if self.vapor_pressure_pa > self.saturation_vapor_pressure_pa
            || self.saturation_vapor_pressure_pa >= self.pressure_pa
        {
            return Err(inconsistent(format!(
                "pressures out of order: pv {} Pa, pws {} Pa, p {} Pa",
                self.vapor_pressure_pa, self.saturation_vapor_pressure_pa, self.pressure_pa
            )));
        }

        let rel = Tolerances {
            abs: 1e-12,
            rel: 1e-5,
        };
        let w = humidity_ratio_from_vapor_pressure_unchecked(self.vapor_pressure_pa, self.pressure_pa);
        if !nearly_equal(w, self.humidity_ratio, rel) {
            return Err(inconsistent(format!(
                "humidity ratio {} disagrees with vapor pressure (expected {w})",
                self.humidity_ratio
            )));
        }
        let h = enthalpy_unchecked(self.dry_bulb_c, self.humidity_ratio);
        if !nearly_equal(h, self.enthalpy, Tolerances::absolute(1e-6)) {
            return Err(inconsistent(format!(
                "enthalpy {} disagrees with dry bulb and humidity ratio (expected {h})",
                self.enthalpy
            )));
        }
        Ok(())
    }
}

fn inconsistent(what: String) -> AirError {
    AirError::InternalConsistency { what }
}
