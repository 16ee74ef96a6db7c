//! Search interval, stopping rules and solution record.

use crate::error::{SolverError, SolverResult};
use pf_core::ensure_finite;

/// Closed search interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lo: f64,
    hi: f64,
}

impl Bracket {
    /// Build a bracket from two finite endpoints in ascending order.
    pub fn new(lo: f64, hi: f64) -> SolverResult<Self> {
        let lo = ensure_finite(lo, "bracket lower bound")?;
        let hi = ensure_finite(hi, "bracket upper bound")?;
        if lo > hi {
            return Err(SolverError::InvalidBracket { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x <= self.hi
    }
}

/// Stopping rules shared by all bracketed solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketConfig {
    /// Maximum iterations before giving up
    pub max_iterations: usize,
    /// Stop once `|f(x)|` drops below this
    pub f_tol: f64,
    /// Stop once the step (or half-width) drops below this
    pub x_tol: f64,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            f_tol: 1e-6,
            x_tol: 1e-4,
        }
    }
}

/// Converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Location of the root
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Iterations spent (0 when an endpoint already satisfied `f_tol`)
    pub iterations: usize,
}

/// Evaluate `f` and reject NaN/inf residuals.
pub(crate) fn eval<F, E>(f: &F, x: f64) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let r = f(x)?;
    if r.is_finite() {
        Ok(r)
    } else {
        Err(SolverError::NonFiniteResidual { x }.into())
    }
}

/// Outcome of probing both ends of a bracket.
pub(crate) enum Endpoints {
    /// One endpoint already satisfies `f_tol`
    Root(Root),
    /// Residuals of opposite sign at `lo` and `hi`
    Straddle { f_lo: f64 },
}

/// Evaluate both endpoints and confirm the sign change.
pub(crate) fn probe_endpoints<F, E>(
    f: &F,
    bracket: Bracket,
    config: &BracketConfig,
) -> Result<Endpoints, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let f_lo = eval(f, bracket.lo)?;
    if f_lo.abs() <= config.f_tol {
        return Ok(Endpoints::Root(Root {
            x: bracket.lo,
            residual: f_lo,
            iterations: 0,
        }));
    }
    let f_hi = eval(f, bracket.hi)?;
    if f_hi.abs() <= config.f_tol {
        return Ok(Endpoints::Root(Root {
            x: bracket.hi,
            residual: f_hi,
            iterations: 0,
        }));
    }
    if f_lo * f_hi > 0.0 {
        return Err(SolverError::NoSignChange {
            lo: bracket.lo,
            hi: bracket.hi,
            f_lo,
            f_hi,
        }
        .into());
    }
    Ok(Endpoints::Straddle { f_lo })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_rejects_inverted_bounds() {
        assert!(matches!(
            Bracket::new(2.0, 1.0),
            Err(SolverError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn bracket_rejects_nan() {
        assert!(matches!(
            Bracket::new(f64::NAN, 1.0),
            Err(SolverError::Core(_))
        ));
    }

    #[test]
    fn degenerate_bracket_is_allowed() {
        let b = Bracket::new(3.0, 3.0).unwrap();
        assert_eq!(b.width(), 0.0);
        assert!(b.contains(3.0));
    }
}
