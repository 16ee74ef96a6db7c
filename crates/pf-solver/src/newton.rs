//! Newton iteration safeguarded by bisection.

use crate::bracket::{Bracket, BracketConfig, Endpoints, Root, eval, probe_endpoints};
use crate::error::SolverError;

/// Newton solver that never leaves the bracket.
///
/// Each iterate shrinks `[lo, hi]` by the sign of the residual; a Newton step
/// that would land outside the current interval (or a zero/non-finite
/// derivative) is replaced by a bisection step. Converges when
/// `|f(x)| <= f_tol` or the step is shorter than `x_tol`.
pub fn newton_bisect<F, D, E>(
    f: F,
    df: D,
    bracket: Bracket,
    x0: f64,
    config: &BracketConfig,
) -> Result<Root, E>
where
    F: Fn(f64) -> Result<f64, E>,
    D: Fn(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let mut f_lo = match probe_endpoints(&f, bracket, config)? {
        Endpoints::Root(root) => return Ok(root),
        Endpoints::Straddle { f_lo } => f_lo,
    };

    let mut lo = bracket.lo();
    let mut hi = bracket.hi();
    let mut x = if x0.is_finite() && bracket.contains(x0) {
        x0
    } else {
        0.5 * (lo + hi)
    };
    let mut fx = eval(&f, x)?;

    for iter in 1..=config.max_iterations {
        if fx.abs() <= config.f_tol {
            return Ok(Root {
                x,
                residual: fx,
                iterations: iter - 1,
            });
        }

        if fx * f_lo > 0.0 {
            lo = x;
            f_lo = fx;
        } else {
            hi = x;
        }

        let slope = df(x)?;
        let newton = x - fx / slope;
        let next = if slope.is_finite() && slope != 0.0 && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        let step = (next - x).abs();
        x = next;
        fx = eval(&f, x)?;

        if step < config.x_tol {
            return Ok(Root {
                x,
                residual: fx,
                iterations: iter,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        x,
        residual: fx,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverResult;

    fn tight() -> BracketConfig {
        BracketConfig {
            max_iterations: 50,
            f_tol: 1e-14,
            x_tol: 1e-12,
        }
    }

    #[test]
    fn cubic_root_converges_fast() {
        // x^3 - 2x - 5 = 0 has its real root near 2.0946
        let root = newton_bisect(
            |x| -> SolverResult<f64> { Ok(x * x * x - 2.0 * x - 5.0) },
            |x| -> SolverResult<f64> { Ok(3.0 * x * x - 2.0) },
            Bracket::new(2.0, 3.0).unwrap(),
            2.5,
            &tight(),
        )
        .unwrap();
        assert!((root.x - 2.094_551_481_542_327).abs() < 1e-10);
        assert!(root.iterations < 10);
    }

    #[test]
    fn bad_derivative_falls_back_to_bisection() {
        // Derivative deliberately returns zero: pure bisection behaviour
        let root = newton_bisect(
            |x| -> SolverResult<f64> { Ok(x - 0.3) },
            |_| -> SolverResult<f64> { Ok(0.0) },
            Bracket::new(0.0, 1.0).unwrap(),
            0.9,
            &BracketConfig::default(),
        )
        .unwrap();
        assert!((root.x - 0.3).abs() < 1e-3);
    }

    #[test]
    fn overshooting_step_stays_in_bracket() {
        // atan has a Newton overshoot from far away; the bracket keeps it sane
        let root = newton_bisect(
            |x: f64| -> SolverResult<f64> { Ok(x.atan()) },
            |x: f64| -> SolverResult<f64> { Ok(1.0 / (1.0 + x * x)) },
            Bracket::new(-20.0, 30.0).unwrap(),
            25.0,
            &tight(),
        )
        .unwrap();
        assert!(root.x.abs() < 1e-9);
    }

    #[test]
    fn out_of_bracket_guess_uses_midpoint() {
        let root = newton_bisect(
            |x| -> SolverResult<f64> { Ok(x - 4.0) },
            |_| -> SolverResult<f64> { Ok(1.0) },
            Bracket::new(0.0, 10.0).unwrap(),
            f64::NAN,
            &tight(),
        )
        .unwrap();
        assert!((root.x - 4.0).abs() < 1e-12);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let config = BracketConfig {
            max_iterations: 2,
            f_tol: 1e-15,
            x_tol: 1e-15,
        };
        let err = newton_bisect(
            |x| -> SolverResult<f64> { Ok(x - 0.3) },
            |_| -> SolverResult<f64> { Ok(0.0) },
            Bracket::new(0.0, 1.0).unwrap(),
            0.9,
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConvergenceFailed { iterations: 2, .. }
        ));
    }

    #[test]
    fn same_sign_bracket_is_rejected() {
        let err = newton_bisect(
            |x| -> SolverResult<f64> { Ok(x + 10.0) },
            |_| -> SolverResult<f64> { Ok(1.0) },
            Bracket::new(0.0, 1.0).unwrap(),
            0.5,
            &BracketConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::NoSignChange { .. }));
    }
}
