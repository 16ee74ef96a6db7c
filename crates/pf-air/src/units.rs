//! Unit-aware parsing of user-entered values.
//!
//! Text such as `"77 F"`, `"50 %"`, `"14.696 psia"` or `"65 gr/lb"` is parsed
//! into the canonical unit the resolver works in:
//!
//! | quantity           | canonical        |
//! |--------------------|------------------|
//! | temperature        | °C               |
//! | pressure           | Pa (absolute)    |
//! | relative humidity  | fraction 0-1     |
//! | humidity ratio     | kg/kg dry air    |
//! | specific enthalpy  | J/kg dry air     |
//! | altitude           | m                |
//!
//! A bare number is taken to be in the canonical unit.

use pf_core::constants::{STANDARD_PRESSURE_PA, ZERO_CELSIUS_K};
use std::fmt;
use thiserror::Error;

const PSI_TO_PA: f64 = 6_894.757;
const STANDARD_PRESSURE_PSI: f64 = STANDARD_PRESSURE_PA / PSI_TO_PA;
const GRAINS_PER_LB: f64 = 7_000.0;
const BTU_PER_LB_TO_J_PER_KG: f64 = 2_326.0;
/// Inch-pound moist-air enthalpy is zero for dry air at 0 °F, SI at 0 °C.
const CP_DRY_AIR_BTU_PER_LB_F: f64 = 0.240;
const ZERO_CELSIUS_F: f64 = 32.0;
const BTU_PER_LB_DATUM_OFFSET_J_PER_KG: f64 =
    BTU_PER_LB_TO_J_PER_KG * CP_DRY_AIR_BTU_PER_LB_F * ZERO_CELSIUS_F;

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: °C)
    Temperature,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Relative humidity (canonical: fraction)
    RelativeHumidity,
    /// Humidity ratio (canonical: kg/kg)
    HumidityRatio,
    /// Specific enthalpy (canonical: J/kg)
    SpecificEnthalpy,
    /// Altitude above sea level (canonical: m)
    Altitude,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Absolute Pressure"),
            Self::RelativeHumidity => write!(f, "Relative Humidity"),
            Self::HumidityRatio => write!(f, "Humidity Ratio"),
            Self::SpecificEnthalpy => write!(f, "Specific Enthalpy"),
            Self::Altitude => write!(f, "Altitude"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: String },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

/// A value together with the text it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    /// Text as entered (e.g. "77 F")
    pub raw_text: String,
    /// Value in the canonical unit of `quantity`
    pub canonical: f64,
    pub quantity: Quantity,
}

impl UnitValue {
    pub fn from_text(raw_text: impl Into<String>, quantity: Quantity) -> Result<Self, UnitError> {
        let raw_text = raw_text.into();
        let canonical = parse_quantity(&raw_text, quantity)?;
        Ok(Self {
            raw_text,
            canonical,
            quantity,
        })
    }

    pub fn value(&self) -> f64 {
        self.canonical
    }
}

/// Parse `raw_text` as `quantity` and return it in the canonical unit.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();
    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::RelativeHumidity => parse_relative_humidity(trimmed),
        Quantity::HumidityRatio => parse_humidity_ratio(trimmed),
        Quantity::SpecificEnthalpy => parse_specific_enthalpy(trimmed),
        Quantity::Altitude => parse_altitude(trimmed),
    }
}

fn unknown(unit: &str, quantity: Quantity) -> UnitError {
    UnitError::UnknownUnit {
        unit: unit.to_string(),
        quantity,
    }
}

fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let celsius = match unit.to_lowercase().as_str() {
        "" | "c" | "°c" | "degc" | "celsius" => value,
        "k" | "kelvin" => value - ZERO_CELSIUS_K,
        "f" | "°f" | "degf" | "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "r" | "°r" | "rankine" => value * 5.0 / 9.0 - ZERO_CELSIUS_K,
        other => return Err(unknown(other, Quantity::Temperature)),
    };

    if celsius + ZERO_CELSIUS_K <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: celsius,
            reason: "Absolute temperature must be > 0 K".to_string(),
        });
    }
    Ok(celsius)
}

fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let pa = match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => value,
        "hpa" => value * 100.0,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" | "millibar" => value * 100.0,
        "atm" => value * STANDARD_PRESSURE_PA,
        "torr" | "mmhg" => value * 133.322_4,
        "inhg" => value * 3_386.389,
        "psia" => value * PSI_TO_PA,
        // Gauge units reference standard sea-level pressure
        "psig" => (value + STANDARD_PRESSURE_PSI) * PSI_TO_PA,
        "barg" => value * 1e5 + STANDARD_PRESSURE_PA,
        "kpag" => value * 1e3 + STANDARD_PRESSURE_PA,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit: "psi".to_string(),
                reason: "Use 'psia' (absolute) or 'psig' (gauge)".to_string(),
            });
        }
        other => return Err(unknown(other, Quantity::Pressure)),
    };

    if pa <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "Absolute pressure must be positive".to_string(),
        });
    }
    Ok(pa)
}

/// Fraction or percent. Range checks belong to the resolver.
fn parse_relative_humidity(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "-" => Ok(value),
        "%" | "pct" | "percent" => Ok(value / 100.0),
        other => Err(unknown(other, Quantity::RelativeHumidity)),
    }
}

fn parse_humidity_ratio(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "kg/kg" | "lb/lb" => Ok(value),
        "g/kg" => Ok(value / 1e3),
        "gr/lb" | "grains/lb" => Ok(value / GRAINS_PER_LB),
        other => Err(unknown(other, Quantity::HumidityRatio)),
    }
}

fn parse_specific_enthalpy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "j/kg" => Ok(value),
        "kj/kg" => Ok(value * 1e3),
        "btu/lb" | "btu/lbm" => {
            Ok(value * BTU_PER_LB_TO_J_PER_KG - BTU_PER_LB_DATUM_OFFSET_J_PER_KG)
        }
        other => Err(unknown(other, Quantity::SpecificEnthalpy)),
    }
}

fn parse_altitude(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "m" => Ok(value),
        "km" => Ok(value * 1e3),
        "ft" | "feet" => Ok(value * 0.304_8),
        other => Err(unknown(other, Quantity::Altitude)),
    }
}

/// Split `"12.5 kPa"` into `(12.5, "kPa")`. The unit may be empty.
pub fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UnitError::Parse("Empty input".to_string()));
    }

    // Longest numeric prefix, allowing a sign, a decimal point and an exponent.
    let bytes = input.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    let number = &input[..end];
    let value: f64 = number
        .parse()
        .map_err(|_| UnitError::Parse(format!("Could not parse a number from '{input}'")))?;
    if !value.is_finite() {
        return Err(UnitError::Parse(format!("Non-finite value in '{input}'")));
    }
    Ok((value, input[end..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn split_handles_exponents_and_units() {
        assert_eq!(split_value_and_unit("12.5 kPa").unwrap(), (12.5, "kPa"));
        assert_eq!(split_value_and_unit("-3e2Pa").unwrap(), (-300.0, "Pa"));
        assert_eq!(split_value_and_unit("  42  ").unwrap(), (42.0, ""));
        // "e" with no digits belongs to the unit
        assert_eq!(split_value_and_unit("5 e").unwrap(), (5.0, "e"));
        assert!(split_value_and_unit("abc").is_err());
        assert!(split_value_and_unit("").is_err());
    }

    #[test]
    fn temperatures_convert_to_celsius() {
        assert!(approx(parse_quantity("25", Quantity::Temperature).unwrap(), 25.0));
        assert!(approx(parse_quantity("77 F", Quantity::Temperature).unwrap(), 25.0));
        assert!(approx(parse_quantity("298.15 K", Quantity::Temperature).unwrap(), 25.0));
        assert!(approx(parse_quantity("536.67 R", Quantity::Temperature).unwrap(), 25.0));
        assert!(matches!(
            parse_quantity("-300 C", Quantity::Temperature),
            Err(UnitError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pressures_convert_to_pascal() {
        assert!(approx(parse_quantity("101.325 kPa", Quantity::Pressure).unwrap(), 101_325.0));
        assert!(approx(parse_quantity("1 atm", Quantity::Pressure).unwrap(), 101_325.0));
        assert!(approx(parse_quantity("0 psig", Quantity::Pressure).unwrap(), 101_325.0));
        assert!(approx(parse_quantity("1013.25 hPa", Quantity::Pressure).unwrap(), 101_325.0));
        assert!(matches!(
            parse_quantity("14.7 psi", Quantity::Pressure),
            Err(UnitError::AmbiguousUnit { .. })
        ));
        assert!(parse_quantity("0 Pa", Quantity::Pressure).is_err());
    }

    #[test]
    fn humidity_units() {
        assert!(approx(parse_quantity("50%", Quantity::RelativeHumidity).unwrap(), 0.5));
        assert!(approx(parse_quantity("0.5", Quantity::RelativeHumidity).unwrap(), 0.5));
        assert!(approx(parse_quantity("10 g/kg", Quantity::HumidityRatio).unwrap(), 0.01));
        assert!(approx(parse_quantity("70 gr/lb", Quantity::HumidityRatio).unwrap(), 0.01));
    }

    #[test]
    fn enthalpy_and_altitude_units() {
        assert!(approx(parse_quantity("50 kJ/kg", Quantity::SpecificEnthalpy).unwrap(), 50_000.0));
        assert!(approx(parse_quantity("1000 ft", Quantity::Altitude).unwrap(), 304.8));
        assert!(approx(parse_quantity("1.5 km", Quantity::Altitude).unwrap(), 1_500.0));
    }

    #[test]
    fn btu_per_lb_shifts_to_the_zero_celsius_datum() {
        // dry air at 32 F is 7.68 Btu/lb in inch-pound tables and 0 J/kg in SI
        let h = parse_quantity("7.68 Btu/lb", Quantity::SpecificEnthalpy).unwrap();
        assert!(h.abs() < 1e-6);
        let h = parse_quantity("29.3 Btu/lb", Quantity::SpecificEnthalpy).unwrap();
        assert!((h - 50_288.1).abs() < 0.5);
    }

    #[test]
    fn unknown_unit_names_quantity() {
        let err = parse_quantity("3 furlongs", Quantity::Altitude).unwrap_err();
        assert!(err.to_string().contains("Altitude"));
    }

    #[test]
    fn unit_value_keeps_text() {
        let v = UnitValue::from_text("77 F", Quantity::Temperature).unwrap();
        assert_eq!(v.raw_text, "77 F");
        assert!(approx(v.value(), 25.0));
    }
}
