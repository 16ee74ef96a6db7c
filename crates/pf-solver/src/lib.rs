//! pf-solver: bounded scalar root finding.
//!
//! Every routine works on a sign-changing [`Bracket`] and stops after a fixed
//! number of iterations, so a call either returns a [`Root`] or fails with
//! [`SolverError::ConvergenceFailed`]. Residual closures return `Result` so
//! callers can surface their own domain errors from inside the iteration.

pub mod bisection;
pub mod bracket;
pub mod error;
pub mod newton;

pub use bisection::bisect;
pub use bracket::{Bracket, BracketConfig, Root};
pub use error::{SolverError, SolverResult};
pub use newton::newton_bisect;
