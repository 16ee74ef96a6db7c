//! Bisection on a sign-changing bracket.

use crate::bracket::{Bracket, BracketConfig, Endpoints, Root, eval, probe_endpoints};
use crate::error::SolverError;

/// Find a root of `f` inside `bracket` by repeated halving.
///
/// Stops when `|f(x)| <= f_tol` or the half-width drops below `x_tol`.
/// Fails with [`SolverError::NoSignChange`] if `f(lo)` and `f(hi)` share a
/// sign and with [`SolverError::ConvergenceFailed`] once `max_iterations`
/// halvings have been spent.
pub fn bisect<F, E>(f: F, bracket: Bracket, config: &BracketConfig) -> Result<Root, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let mut f_lo = match probe_endpoints(&f, bracket, config)? {
        Endpoints::Root(root) => return Ok(root),
        Endpoints::Straddle { f_lo } => f_lo,
    };

    let mut lo = bracket.lo();
    let mut hi = bracket.hi();
    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f_lo;

    for iter in 1..=config.max_iterations {
        mid = 0.5 * (lo + hi);
        f_mid = eval(&f, mid)?;

        if f_mid.abs() <= config.f_tol || 0.5 * (hi - lo) < config.x_tol {
            return Ok(Root {
                x: mid,
                residual: f_mid,
                iterations: iter,
            });
        }

        if f_mid * f_lo > 0.0 {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        x: mid,
        residual: f_mid,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverResult;

    #[test]
    fn finds_sqrt_two() {
        let config = BracketConfig {
            f_tol: 1e-12,
            x_tol: 1e-10,
            ..BracketConfig::default()
        };
        let root = bisect(
            |x| -> SolverResult<f64> { Ok(x * x - 2.0) },
            Bracket::new(0.0, 2.0).unwrap(),
            &config,
        )
        .unwrap();
        assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(root.iterations > 0);
    }

    #[test]
    fn decreasing_function() {
        let root = bisect(
            |x| -> SolverResult<f64> { Ok(5.0 - x) },
            Bracket::new(0.0, 10.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap();
        assert!((root.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn endpoint_root_returns_immediately() {
        let root = bisect(
            |x| -> SolverResult<f64> { Ok(x - 1.0) },
            Bracket::new(1.0, 3.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap();
        assert_eq!(root.x, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn same_sign_bracket_is_rejected() {
        let err = bisect(
            |x| -> SolverResult<f64> { Ok(x * x + 1.0) },
            Bracket::new(-1.0, 1.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::NoSignChange { .. }));
    }

    #[test]
    fn iteration_cap_is_reported() {
        let config = BracketConfig {
            max_iterations: 3,
            f_tol: 1e-15,
            x_tol: 1e-15,
        };
        let err = bisect(
            |x| -> SolverResult<f64> { Ok(x - 0.123_456) },
            Bracket::new(0.0, 1.0).unwrap(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConvergenceFailed { iterations: 3, .. }
        ));
    }

    #[test]
    fn nan_residual_is_rejected() {
        let err = bisect(
            |x| -> SolverResult<f64> { Ok(if x > 0.4 { f64::NAN } else { x - 1.0 }) },
            Bracket::new(0.0, 1.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::NonFiniteResidual { .. }));
    }

    #[derive(Debug)]
    enum Caller {
        Solver(SolverError),
        Domain,
    }

    impl From<SolverError> for Caller {
        fn from(e: SolverError) -> Self {
            Caller::Solver(e)
        }
    }

    #[test]
    fn caller_errors_pass_through() {
        let err = bisect(
            |x| if x < 0.5 { Ok(x - 1.0) } else { Err(Caller::Domain) },
            Bracket::new(0.0, 1.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Caller::Domain));

        let err = bisect(
            |x| -> Result<f64, Caller> { Ok(x + 1.0) },
            Bracket::new(0.0, 1.0).unwrap(),
            &BracketConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Caller::Solver(SolverError::NoSignChange { .. })));
    }
}
