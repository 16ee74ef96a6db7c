//! Sweep definitions.
//!
//! A sweep stores the user's bounds both as text and as canonical values and
//! generates its points on demand.

use crate::error::AirError;
use crate::units::{Quantity, UnitError, parse_quantity};
use std::fmt;
use thiserror::Error;

/// Errors from building or running a sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Sweep bound error: {0}")]
    Unit(#[from] UnitError),

    #[error("Sweep inputs rejected: {0}")]
    Air(#[from] AirError),

    #[error("No sweep point could be resolved ({failed} failed)")]
    NoSuccessfulPoints { failed: usize },
}

/// Point spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Uniform in `ln(x)`; both bounds must be positive
    Logarithmic,
}

/// Definition of a single parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    /// Quantity family of the swept value
    pub quantity: Quantity,
    /// Start value in canonical units
    pub start: f64,
    /// Start as the user typed it
    pub start_raw: String,
    /// End value in canonical units
    pub end: f64,
    /// End as the user typed it
    pub end_raw: String,
    /// Number of points, at least 2
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a sweep from user text inputs.
    pub fn from_text(
        start_raw: impl Into<String>,
        end_raw: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        let start_raw = start_raw.into();
        let end_raw = end_raw.into();
        let start = parse_quantity(&start_raw, quantity)?;
        let end = parse_quantity(&end_raw, quantity)?;

        if num_points < 2 {
            return Err(SweepError::InvalidConfiguration(
                "a sweep needs at least 2 points".to_string(),
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(SweepError::InvalidConfiguration(
                "start and end values must differ".to_string(),
            ));
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(SweepError::InvalidConfiguration(
                "logarithmic sweeps need positive bounds".to_string(),
            ));
        }

        Ok(Self {
            quantity,
            start,
            start_raw,
            end,
            end_raw,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep, ending exactly on `end`.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let last = self.num_points - 1;
        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Logarithmic if self.start > 0.0 && self.end > 0.0 => {
                let (a, b) = (self.start.ln(), self.end.ln());
                (0..self.num_points)
                    .map(|i| (a + (b - a) * i as f64 / last as f64).exp())
                    .collect()
            }
            _ => (0..self.num_points)
                .map(|i| self.start + (self.end - self.start) * i as f64 / last as f64)
                .collect(),
        };
        points[last] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.quantity, self.start_raw, self.end_raw, self.num_points, self.sweep_type
        )
    }
}
