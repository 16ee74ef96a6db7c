//! Resolving states from text entered by the user.

use crate::error::{AppError, AppResult};
use crate::site::Site;
use pf_air::{InputKind, MoistAirState, UnitValue, resolve};

/// One known property as entered, e.g. `rh=50%`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub kind: InputKind,
    pub value: UnitValue,
}

impl TextInput {
    /// Parse `<kind>=<value with unit>`.
    pub fn parse(spec: &str) -> AppResult<Self> {
        let (kind, text) = spec.split_once('=').ok_or_else(|| {
            AppError::InvalidInput(format!("expected <kind>=<value>, got '{spec}'"))
        })?;
        let kind: InputKind = kind.parse()?;
        let value = UnitValue::from_text(text.trim(), kind.quantity())?;
        Ok(Self { kind, value })
    }

    pub fn from_value(kind: InputKind, value: f64) -> Self {
        Self {
            kind,
            value: UnitValue {
                raw_text: value.to_string(),
                canonical: value,
                quantity: kind.quantity(),
            },
        }
    }
}

/// Resolve a state from two known properties at `site`.
pub fn resolve_inputs(site: &Site, first: &TextInput, second: &TextInput) -> AppResult<MoistAirState> {
    let p = site.pressure_pa()?;
    let state = resolve(
        p,
        first.kind,
        first.value.value(),
        second.kind,
        second.value.value(),
    )?;
    Ok(state)
}

/// Parse and resolve in one step.
pub fn resolve_text(site: &Site, first: &str, second: &str) -> AppResult<MoistAirState> {
    resolve_inputs(site, &TextInput::parse(first)?, &TextInput::parse(second)?)
}

/// A display row of a state summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

fn row(label: &'static str, value: String, unit: &'static str) -> SummaryRow {
    SummaryRow { label, value, unit }
}

/// Human-oriented rows for a resolved state.
pub fn summarize(state: &MoistAirState) -> Vec<SummaryRow> {
    vec![
        row("Pressure", format!("{:.3}", state.pressure_pa() / 1e3), "kPa"),
        row("Dry bulb", format!("{:.2}", state.dry_bulb_c()), "°C"),
        row("Wet bulb", format!("{:.2}", state.wet_bulb_c()), "°C"),
        row("Dew point", format!("{:.2}", state.dew_point_c()), "°C"),
        row(
            "Relative humidity",
            format!("{:.1}", state.relative_humidity() * 100.0),
            "%",
        ),
        row(
            "Humidity ratio",
            format!("{:.3}", state.humidity_ratio() * 1e3),
            "g/kg",
        ),
        row(
            "Enthalpy",
            format!("{:.2}", state.enthalpy_j_per_kg() / 1e3),
            "kJ/kg",
        ),
        row(
            "Specific volume",
            format!("{:.4}", state.specific_volume_m3_per_kg()),
            "m³/kg",
        ),
        row(
            "Vapor pressure",
            format!("{:.4}", state.vapor_pressure_pa() / 1e3),
            "kPa",
        ),
        row(
            "Saturation pressure",
            format!("{:.4}", state.saturation_vapor_pressure_pa() / 1e3),
            "kPa",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_and_unit() {
        let input = TextInput::parse("db=77F").unwrap();
        assert_eq!(input.kind, InputKind::DryBulb);
        assert!((input.value.value() - 25.0).abs() < 1e-9);
        assert_eq!(input.value.raw_text, "77F");
    }

    #[test]
    fn missing_equals_is_rejected() {
        assert!(matches!(
            TextInput::parse("db 25"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            TextInput::parse("t=25"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn resolves_with_units() {
        let state = resolve_text(&Site::Standard, "db=77 F", "rh=50%").unwrap();
        assert!((state.humidity_ratio() - 0.00988).abs() < 5e-5);
    }

    #[test]
    fn inch_pound_enthalpy_matches_si_state() {
        let state = resolve_text(&Site::Standard, "db=77F", "h=29.3 Btu/lb").unwrap();
        assert!((state.relative_humidity() - 0.5).abs() < 0.005);
        assert!((state.humidity_ratio() - 0.00988).abs() < 5e-5);
    }

    #[test]
    fn summary_uses_display_units() {
        let state = resolve_text(&Site::Standard, "db=25", "w=10 g/kg").unwrap();
        let rows = summarize(&state);
        let w = rows.iter().find(|r| r.label == "Humidity ratio").unwrap();
        assert_eq!(w.value, "10.000");
        assert_eq!(w.unit, "g/kg");
    }
}
