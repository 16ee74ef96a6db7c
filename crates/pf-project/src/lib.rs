//! pf-project: profile library file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_library, validate_profile};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<ProfileLibrary> {
    let content = std::fs::read_to_string(path)?;
    let library: ProfileLibrary = serde_yaml::from_str(&content)?;
    let library = migrate_to_latest(library)?;
    validate_library(&library)?;
    Ok(library)
}

pub fn save_yaml(path: &Path, library: &ProfileLibrary) -> ProjectResult<()> {
    validate_library(library)?;
    let content = serde_yaml::to_string(library)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<ProfileLibrary> {
    let content = std::fs::read_to_string(path)?;
    let library: ProfileLibrary = serde_json::from_str(&content)?;
    let library = migrate_to_latest(library)?;
    validate_library(&library)?;
    Ok(library)
}

pub fn save_json(path: &Path, library: &ProfileLibrary) -> ProjectResult<()> {
    validate_library(library)?;
    let content = serde_json::to_string_pretty(library)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load by file extension: `.json` as JSON, anything else as YAML.
pub fn load_library(path: &Path) -> ProjectResult<ProfileLibrary> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

/// Save by file extension: `.json` as JSON, anything else as YAML.
pub fn save_library(path: &Path, library: &ProfileLibrary) -> ProjectResult<()> {
    if is_json(path) {
        save_json(path, library)
    } else {
        save_yaml(path, library)
    }
}
