//! Input kinds accepted by the resolver.

use crate::units::Quantity;
use std::fmt;
use std::str::FromStr;

/// One of the six state properties a caller may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Dry-bulb temperature [°C]
    DryBulb,
    /// Wet-bulb temperature [°C]
    WetBulb,
    /// Relative humidity [0-1]
    RelativeHumidity,
    /// Dew-point temperature [°C]
    DewPoint,
    /// Humidity ratio [kg water / kg dry air]
    HumidityRatio,
    /// Moist-air enthalpy [J / kg dry air]
    Enthalpy,
}

impl InputKind {
    pub const ALL: [InputKind; 6] = [
        Self::DryBulb,
        Self::WetBulb,
        Self::RelativeHumidity,
        Self::DewPoint,
        Self::HumidityRatio,
        Self::Enthalpy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::DryBulb => "dry-bulb temperature",
            Self::WetBulb => "wet-bulb temperature",
            Self::RelativeHumidity => "relative humidity",
            Self::DewPoint => "dew-point temperature",
            Self::HumidityRatio => "humidity ratio",
            Self::Enthalpy => "enthalpy",
        }
    }

    /// Short tag used on the command line and in files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::DryBulb => "db",
            Self::WetBulb => "wb",
            Self::RelativeHumidity => "rh",
            Self::DewPoint => "dp",
            Self::HumidityRatio => "w",
            Self::Enthalpy => "h",
        }
    }

    /// Canonical unit the resolver expects.
    pub fn unit(self) -> &'static str {
        match self {
            Self::DryBulb | Self::WetBulb | Self::DewPoint => "°C",
            Self::RelativeHumidity => "-",
            Self::HumidityRatio => "kg/kg",
            Self::Enthalpy => "J/kg",
        }
    }

    /// Quantity family used when parsing text for this input.
    pub fn quantity(self) -> Quantity {
        match self {
            Self::DryBulb | Self::WetBulb | Self::DewPoint => Quantity::Temperature,
            Self::RelativeHumidity => Quantity::RelativeHumidity,
            Self::HumidityRatio => Quantity::HumidityRatio,
            Self::Enthalpy => Quantity::SpecificEnthalpy,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error for an unrecognised input tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown input kind '{0}' (expected one of db, wb, rh, dp, w, h)")]
pub struct ParseInputKindError(pub String);

impl FromStr for InputKind {
    type Err = ParseInputKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "db" | "tdb" | "dry-bulb" | "drybulb" => Ok(Self::DryBulb),
            "wb" | "twb" | "wet-bulb" | "wetbulb" => Ok(Self::WetBulb),
            "rh" | "relative-humidity" => Ok(Self::RelativeHumidity),
            "dp" | "tdp" | "dew-point" | "dewpoint" => Ok(Self::DewPoint),
            "w" | "humidity-ratio" => Ok(Self::HumidityRatio),
            "h" | "enthalpy" => Ok(Self::Enthalpy),
            _ => Err(ParseInputKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in InputKind::ALL {
            assert_eq!(kind.tag().parse::<InputKind>().unwrap(), kind);
        }
    }

    #[test]
    fn long_names_parse() {
        assert_eq!("Dry_Bulb".parse::<InputKind>().unwrap(), InputKind::DryBulb);
        assert_eq!(
            "relative-humidity".parse::<InputKind>().unwrap(),
            InputKind::RelativeHumidity
        );
        assert!("pressure".parse::<InputKind>().is_err());
    }

    #[test]
    fn temperature_kinds_share_quantity() {
        assert_eq!(InputKind::WetBulb.quantity(), Quantity::Temperature);
        assert_eq!(InputKind::DewPoint.quantity(), Quantity::Temperature);
        assert_eq!(InputKind::Enthalpy.quantity(), Quantity::SpecificEnthalpy);
    }
}
