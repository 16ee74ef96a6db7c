//! Error types for the pf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives frontends one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Air(#[from] pf_air::AirError),

    #[error(transparent)]
    Unit(#[from] pf_air::UnitError),

    #[error(transparent)]
    Sweep(#[from] pf_air::SweepError),

    #[error("Profile library error: {0}")]
    Project(String),

    #[error("Failed to read profile library: {path}")]
    LibraryRead {
        path: PathBuf,
        source: pf_project::ProjectError,
    },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pf_project::ProjectError> for AppError {
    fn from(err: pf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<pf_air::ParseInputKindError> for AppError {
    fn from(err: pf_air::ParseInputKindError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
