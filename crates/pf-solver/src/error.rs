//! Error types for root finding.

use pf_core::CoreError;
use thiserror::Error;

/// Errors that can occur while searching for a root.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid bracket [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("Bracket [{lo}, {hi}] does not change sign (f(lo) = {f_lo:e}, f(hi) = {f_hi:e})")]
    NoSignChange {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("Residual is not finite at x = {x}")]
    NonFiniteResidual { x: f64 },

    #[error("No convergence after {iterations} iterations (x = {x}, residual = {residual:e})")]
    ConvergenceFailed {
        iterations: usize,
        x: f64,
        residual: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SolverResult<T> = Result<T, SolverError>;
