//! Profile library validation logic.

use crate::schema::{InputDef, ProfileDef, ProfileLibrary, SiteDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate profile name: {name}")]
    DuplicateName { name: String },

    #[error("Profile names must not be empty")]
    EmptyName,

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Profile {profile} uses {kind} for both inputs")]
    IdenticalInputKinds { profile: String, kind: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_library(library: &ProfileLibrary) -> Result<(), ValidationError> {
    if library.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: library.version,
        });
    }

    let mut names = HashSet::new();
    for profile in &library.profiles {
        if !names.insert(profile.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: profile.name.clone(),
            });
        }
        validate_profile(profile)?;
    }

    if let Some(current) = &library.current {
        if !names.contains(current.as_str()) {
            return Err(ValidationError::MissingReference {
                name: current.clone(),
                context: "current profile".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_profile(profile: &ProfileDef) -> Result<(), ValidationError> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if profile.first.kind == profile.second.kind {
        return Err(ValidationError::IdenticalInputKinds {
            profile: profile.name.clone(),
            kind: format!("{:?}", profile.first.kind),
        });
    }
    validate_input(&profile.name, "first", &profile.first)?;
    validate_input(&profile.name, "second", &profile.second)?;

    match profile.site {
        SiteDef::Standard => {}
        SiteDef::Pressure { pressure_pa } => {
            if !pressure_pa.is_finite() || pressure_pa <= 0.0 {
                return Err(invalid(
                    &profile.name,
                    "site.pressure_pa",
                    pressure_pa,
                    "must be positive and finite",
                ));
            }
        }
        SiteDef::Altitude { altitude_m } => {
            if !altitude_m.is_finite() {
                return Err(invalid(
                    &profile.name,
                    "site.altitude_m",
                    altitude_m,
                    "must be finite",
                ));
            }
        }
    }
    Ok(())
}

fn validate_input(profile: &str, slot: &str, input: &InputDef) -> Result<(), ValidationError> {
    if !input.value.is_finite() {
        return Err(invalid(profile, slot, input.value, "must be finite"));
    }
    Ok(())
}

fn invalid(profile: &str, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("{profile}.{field}"),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InputKindDef;

    fn profile(name: &str) -> ProfileDef {
        ProfileDef {
            name: name.to_string(),
            description: None,
            created: None,
            site: SiteDef::Standard,
            first: InputDef {
                kind: InputKindDef::DryBulb,
                value: 25.0,
            },
            second: InputDef {
                kind: InputKindDef::RelativeHumidity,
                value: 0.5,
            },
        }
    }

    fn library(profiles: Vec<ProfileDef>) -> ProfileLibrary {
        ProfileLibrary {
            profiles,
            ..ProfileLibrary::default()
        }
    }

    #[test]
    fn valid_library_passes() {
        let mut lib = library(vec![profile("a"), profile("b")]);
        lib.current = Some("b".to_string());
        validate_library(&lib).unwrap();
    }

    #[test]
    fn duplicate_names_fail() {
        let lib = library(vec![profile("a"), profile("a")]);
        assert!(matches!(
            validate_library(&lib),
            Err(ValidationError::DuplicateName { .. })
        ));
    }

    #[test]
    fn blank_name_fails() {
        assert!(matches!(
            validate_profile(&profile("  ")),
            Err(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn identical_kinds_fail() {
        let mut p = profile("a");
        p.second.kind = InputKindDef::DryBulb;
        assert!(matches!(
            validate_profile(&p),
            Err(ValidationError::IdenticalInputKinds { .. })
        ));
    }

    #[test]
    fn non_finite_value_fails() {
        let mut p = profile("a");
        p.first.value = f64::NAN;
        assert!(matches!(
            validate_profile(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn non_positive_pressure_fails() {
        let mut p = profile("a");
        p.site = SiteDef::Pressure { pressure_pa: 0.0 };
        let err = validate_profile(&p).unwrap_err();
        assert!(err.to_string().contains("site.pressure_pa"));
    }

    #[test]
    fn unknown_current_fails() {
        let mut lib = library(vec![profile("a")]);
        lib.current = Some("missing".to_string());
        assert!(matches!(
            validate_library(&lib),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn future_version_fails() {
        let mut lib = library(vec![]);
        lib.version = 99;
        assert!(matches!(
            validate_library(&lib),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }
}
