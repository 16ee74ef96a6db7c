//! Shared application service layer for psychroflow.
//!
//! Frontends talk to this crate rather than to the engine directly: it turns
//! text with units into engine calls, manages profile libraries and formats
//! results for display or export.

pub mod calc_service;
pub mod error;
pub mod profile_service;
pub mod site;
pub mod sweep_service;

// Re-export key types for convenience
pub use calc_service::{SummaryRow, TextInput, resolve_inputs, resolve_text, summarize};
pub use error::{AppError, AppResult};
pub use profile_service::ProfileSummary;
pub use site::Site;
pub use sweep_service::{SweepRequest, build_chart, chart_to_csv, run_sweep, sweep_to_csv};
