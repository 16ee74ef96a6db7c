//! Sweep execution: one resolved state per sweep point.
//!
//! Points are independent, so they are resolved in parallel on the rayon
//! pool. A point that fails to resolve is kept as `None` and counted; the
//! sweep as a whole fails only when no point resolves.

use crate::input::InputKind;
use crate::resolver::{InputPair, resolve};
use crate::state::MoistAirState;
use crate::sweeps::{SweepDefinition, SweepError};
use crate::units::Quantity;
use rayon::prelude::*;
use std::fmt;

/// The variable along a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweptVariable {
    Input(InputKind),
    Pressure,
}

impl fmt::Display for SweptVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(kind) => write!(f, "{kind}"),
            Self::Pressure => write!(f, "pressure"),
        }
    }
}

/// Result of a moist-air sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub variable: SweptVariable,
    /// Sweep values in canonical units
    pub independent_values: Vec<f64>,
    /// One entry per sweep value; `None` where resolution failed
    pub states: Vec<Option<MoistAirState>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    fn column(&self, f: impl Fn(&MoistAirState) -> f64) -> Vec<f64> {
        self.states.iter().flatten().map(f).collect()
    }

    /// Get independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }

    /// Any resolver property over the successful points.
    pub fn property(&self, kind: InputKind) -> Vec<f64> {
        self.column(|s| s.get(kind))
    }

    pub fn pressure_pa(&self) -> Vec<f64> {
        self.column(MoistAirState::pressure_pa)
    }

    pub fn specific_volume_m3_per_kg(&self) -> Vec<f64> {
        self.column(MoistAirState::specific_volume_m3_per_kg)
    }

    /// Successful `(value, state)` pairs in sweep order.
    pub fn successful(&self) -> impl Iterator<Item = (f64, &MoistAirState)> + '_ {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(v, s)| s.as_ref().map(|s| (*v, s)))
    }
}

fn collect_points<F>(
    variable: SweptVariable,
    values: Vec<f64>,
    resolve_point: F,
) -> Result<SweepResult, SweepError>
where
    F: Fn(f64) -> crate::AirResult<MoistAirState> + Sync,
{
    let states: Vec<Option<MoistAirState>> = values
        .par_iter()
        .enumerate()
        .map(|(index, &value)| match resolve_point(value) {
            Ok(state) => Some(state),
            Err(error) => {
                tracing::debug!(%variable, index, value, %error, "sweep point failed");
                None
            }
        })
        .collect();

    let num_successful = states.iter().filter(|s| s.is_some()).count();
    let num_failed = states.len() - num_successful;
    if num_successful == 0 {
        return Err(SweepError::NoSuccessfulPoints { failed: num_failed });
    }
    if num_failed > 0 {
        tracing::warn!(%variable, num_failed, num_successful, "sweep finished with failed points");
    }

    Ok(SweepResult {
        variable,
        independent_values: values,
        states,
        num_successful,
        num_failed,
    })
}

/// Sweep one input while another is held fixed at constant pressure.
pub fn execute_input_sweep(
    sweep_def: &SweepDefinition,
    vary: InputKind,
    hold: InputKind,
    hold_value: f64,
    pressure_pa: f64,
) -> Result<SweepResult, SweepError> {
    if sweep_def.quantity != vary.quantity() {
        return Err(SweepError::InvalidConfiguration(format!(
            "sweep is over {} but {vary} needs {}",
            sweep_def.quantity,
            vary.quantity()
        )));
    }
    // Reject unsupported pairs before doing any work.
    InputPair::new(vary, sweep_def.start, hold, hold_value)?;

    collect_points(
        SweptVariable::Input(vary),
        sweep_def.generate_points(),
        |value| resolve(pressure_pa, vary, value, hold, hold_value),
    )
}

/// Sweep pressure with both inputs held fixed.
pub fn execute_pressure_sweep(
    sweep_def: &SweepDefinition,
    first: (InputKind, f64),
    second: (InputKind, f64),
) -> Result<SweepResult, SweepError> {
    if sweep_def.quantity != Quantity::Pressure {
        return Err(SweepError::InvalidConfiguration(
            "Sweep definition must be for Pressure quantity".to_string(),
        ));
    }
    let pair = InputPair::new(first.0, first.1, second.0, second.1)?;

    collect_points(SweptVariable::Pressure, sweep_def.generate_points(), |p| {
        crate::resolver::resolve_pair(p, pair)
    })
}
