//! Glue between air residuals and the bracketed solvers.

use crate::error::AirError;
use pf_solver::SolverError;

/// Error raised inside a residual evaluated by `pf_solver`.
///
/// Solver failures are named after the quantity being searched for only once
/// the search returns, so residuals can keep using `?` on air functions.
#[derive(Debug)]
pub(crate) enum Search {
    Air(AirError),
    Solver(SolverError),
}

impl Search {
    pub(crate) fn into_air(self, what: &'static str) -> AirError {
        match self {
            Self::Air(err) => err,
            Self::Solver(err) => AirError::from_solver(what, err),
        }
    }
}

impl From<AirError> for Search {
    fn from(err: AirError) -> Self {
        Self::Air(err)
    }
}

impl From<SolverError> for Search {
    fn from(err: SolverError) -> Self {
        Self::Solver(err)
    }
}
