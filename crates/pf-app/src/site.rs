//! Site selection: where the air is determines its total pressure.

use crate::error::{AppError, AppResult};
use pf_air::{Quantity, parse_quantity, pressure_from_altitude};
use pf_core::constants::STANDARD_PRESSURE_PA;
use pf_project::SiteDef;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Site {
    /// Sea-level standard atmosphere
    #[default]
    Standard,
    /// Explicit absolute pressure [Pa]
    Pressure(f64),
    /// Standard atmosphere at an altitude [m]
    Altitude(f64),
}

impl Site {
    /// Build a site from optional command-line text; at most one may be given.
    pub fn from_text(pressure: Option<&str>, altitude: Option<&str>) -> AppResult<Self> {
        match (pressure, altitude) {
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "give either a pressure or an altitude, not both".to_string(),
            )),
            (Some(text), None) => Ok(Self::Pressure(parse_quantity(text, Quantity::Pressure)?)),
            (None, Some(text)) => Ok(Self::Altitude(parse_quantity(text, Quantity::Altitude)?)),
            (None, None) => Ok(Self::Standard),
        }
    }

    /// Total pressure [Pa].
    pub fn pressure_pa(&self) -> AppResult<f64> {
        match *self {
            Self::Standard => Ok(STANDARD_PRESSURE_PA),
            Self::Pressure(p) => Ok(p),
            Self::Altitude(z) => Ok(pressure_from_altitude(z)?),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard atmosphere"),
            Self::Pressure(p) => write!(f, "{:.3} kPa", p / 1e3),
            Self::Altitude(z) => write!(f, "{z:.0} m altitude"),
        }
    }
}

impl From<&SiteDef> for Site {
    fn from(def: &SiteDef) -> Self {
        match *def {
            SiteDef::Standard => Self::Standard,
            SiteDef::Pressure { pressure_pa } => Self::Pressure(pressure_pa),
            SiteDef::Altitude { altitude_m } => Self::Altitude(altitude_m),
        }
    }
}

impl From<Site> for SiteDef {
    fn from(site: Site) -> Self {
        match site {
            Site::Standard => SiteDef::Standard,
            Site::Pressure(pressure_pa) => SiteDef::Pressure { pressure_pa },
            Site::Altitude(altitude_m) => SiteDef::Altitude { altitude_m },
        }
    }
}
