//! Moist-air resolution errors.

use crate::input::InputKind;
use pf_core::CoreError;
use pf_solver::SolverError;
use thiserror::Error;

/// Result type for moist-air operations.
pub type AirResult<T> = Result<T, AirError>;

/// Errors that can occur while resolving a moist-air state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AirError {
    /// Input outside its physically valid range.
    #[error("Domain error for {what} = {value}: {reason}")]
    Domain {
        what: &'static str,
        value: f64,
        reason: String,
    },

    /// The two inputs cannot pin down a state.
    #[error("Unsupported input pair: {first} + {second}")]
    UnsupportedInputPair { first: InputKind, second: InputKind },

    /// A root search ran out of iterations.
    #[error("Convergence failed for {what} after {iterations} iterations")]
    Convergence { what: &'static str, iterations: usize },

    /// A resolved state violated one of its invariants.
    #[error("Internal consistency check failed: {what}")]
    InternalConsistency { what: String },
}

impl AirError {
    pub(crate) fn domain(what: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::Domain {
            what,
            value,
            reason: reason.into(),
        }
    }

    /// Attach the quantity being solved for to a solver failure.
    pub(crate) fn from_solver(what: &'static str, err: SolverError) -> Self {
        match err {
            SolverError::InvalidBracket { lo, hi } => {
                Self::domain(what, lo, format!("empty search interval [{lo}, {hi}]"))
            }
            SolverError::NoSignChange { lo, hi, .. } => Self::domain(
                what,
                lo,
                format!("no solution in [{lo}, {hi}]; inputs are inconsistent"),
            ),
            SolverError::NonFiniteResidual { x } => {
                Self::domain(what, x, "residual is not finite")
            }
            SolverError::ConvergenceFailed { iterations, .. } => {
                Self::Convergence { what, iterations }
            }
            SolverError::Core(core) => core.into(),
        }
    }
}

impl From<CoreError> for AirError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => Self::domain(what, value, "must be finite"),
            CoreError::NotPositive { what, value } => {
                Self::domain(what, value, "must be positive")
            }
        }
    }
}
