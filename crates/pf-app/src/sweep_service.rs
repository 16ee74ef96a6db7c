//! Sweep and chart requests from text, plus CSV export.

use crate::calc_service::TextInput;
use crate::error::{AppError, AppResult};
use crate::site::Site;
use pf_air::{
    ChartData, ChartSpec, InputKind, Quantity, SweepDefinition, SweepResult, SweepType,
    execute_input_sweep, execute_pressure_sweep, generate_chart, parse_quantity,
};
use std::fmt::Write as _;

/// What a sweep varies, with the rest held fixed.
#[derive(Debug, Clone)]
pub struct SweepRequest {
    /// Tag of the swept input (`db`, `rh`, ...) or `p` for pressure
    pub vary: String,
    pub from: String,
    pub to: String,
    pub points: usize,
    pub logarithmic: bool,
    /// Held inputs: one for an input sweep, two for a pressure sweep
    pub hold: Vec<String>,
    pub site: Site,
}

fn is_pressure(tag: &str) -> bool {
    matches!(tag.trim().to_lowercase().as_str(), "p" | "pressure")
}

pub fn run_sweep(request: &SweepRequest) -> AppResult<SweepResult> {
    let sweep_type = if request.logarithmic {
        SweepType::Logarithmic
    } else {
        SweepType::Linear
    };
    let held: Vec<TextInput> = request
        .hold
        .iter()
        .map(|h| TextInput::parse(h))
        .collect::<AppResult<_>>()?;

    let result = if is_pressure(&request.vary) {
        let [first, second] = held.as_slice() else {
            return Err(AppError::InvalidInput(
                "a pressure sweep holds exactly two inputs".to_string(),
            ));
        };
        let def = SweepDefinition::from_text(
            &request.from,
            &request.to,
            Quantity::Pressure,
            request.points,
            sweep_type,
        )?;
        execute_pressure_sweep(
            &def,
            (first.kind, first.value.value()),
            (second.kind, second.value.value()),
        )?
    } else {
        let vary: InputKind = request.vary.parse()?;
        let [hold] = held.as_slice() else {
            return Err(AppError::InvalidInput(
                "an input sweep holds exactly one input".to_string(),
            ));
        };
        let def = SweepDefinition::from_text(
            &request.from,
            &request.to,
            vary.quantity(),
            request.points,
            sweep_type,
        )?;
        execute_input_sweep(&def, vary, hold.kind, hold.value.value(), request.site.pressure_pa()?)?
    };

    tracing::debug!(
        variable = %result.variable,
        successful = result.num_successful,
        failed = result.num_failed,
        "sweep complete"
    );
    Ok(result)
}

/// CSV with one row per resolved point; failed points are left out.
pub fn sweep_to_csv(result: &SweepResult) -> String {
    let mut csv = String::from(
        "value,pressure_pa,dry_bulb_c,wet_bulb_c,dew_point_c,relative_humidity,\
         humidity_ratio,enthalpy_j_per_kg,specific_volume_m3_per_kg\n",
    );
    for (value, s) in result.successful() {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{}",
            value,
            s.pressure_pa(),
            s.dry_bulb_c(),
            s.wet_bulb_c(),
            s.dew_point_c(),
            s.relative_humidity(),
            s.humidity_ratio(),
            s.enthalpy_j_per_kg(),
            s.specific_volume_m3_per_kg()
        );
    }
    csv
}

/// Chart series over a dry-bulb range given as text.
pub fn build_chart(site: &Site, from: &str, to: &str, points: usize) -> AppResult<ChartData> {
    let lo = parse_quantity(from, Quantity::Temperature)?;
    let hi = parse_quantity(to, Quantity::Temperature)?;
    let spec = ChartSpec::new(site.pressure_pa()?, lo, hi).with_points(points);
    let data = generate_chart(&spec)?;
    tracing::debug!(curves = data.curves.len(), "chart generated");
    Ok(data)
}

/// Long-format CSV: one row per curve point.
pub fn chart_to_csv(data: &ChartData) -> String {
    let mut csv = String::from("curve,dry_bulb_c,humidity_ratio\n");
    for curve in &data.curves {
        for (t, w) in &curve.points {
            let _ = writeln!(csv, "{},{},{}", curve.kind, t, w);
        }
    }
    csv
}
