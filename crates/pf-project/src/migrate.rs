//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{InputKindDef, ProfileLibrary};

/// Version 2 stores relative humidity as a fraction; version 1 used percent.
pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut library: ProfileLibrary) -> Result<ProfileLibrary, ProjectError> {
    while library.version < LATEST_VERSION {
        library = migrate_one_version(library)?;
    }
    Ok(library)
}

fn migrate_one_version(library: ProfileLibrary) -> Result<ProfileLibrary, ProjectError> {
    match library.version {
        0 => migrate_v0_to_v1(library),
        1 => migrate_v1_to_v2(library),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut library: ProfileLibrary) -> Result<ProfileLibrary, ProjectError> {
    library.version = 1;
    Ok(library)
}

fn migrate_v1_to_v2(mut library: ProfileLibrary) -> Result<ProfileLibrary, ProjectError> {
    for profile in &mut library.profiles {
        for input in [&mut profile.first, &mut profile.second] {
            if input.kind == InputKindDef::RelativeHumidity {
                input.value /= 100.0;
            }
        }
    }
    library.version = 2;
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InputDef, ProfileDef, SiteDef};

    fn library(version: u32) -> ProfileLibrary {
        ProfileLibrary {
            version,
            profiles: vec![ProfileDef {
                name: "office".to_string(),
                description: None,
                created: None,
                site: SiteDef::Standard,
                first: InputDef {
                    kind: InputKindDef::DryBulb,
                    value: 24.0,
                },
                second: InputDef {
                    kind: InputKindDef::RelativeHumidity,
                    value: 45.0,
                },
            }],
            current: None,
        }
    }

    #[test]
    fn migrate_latest_is_noop() {
        let lib = library(LATEST_VERSION);
        assert_eq!(migrate_to_latest(lib.clone()).unwrap(), lib);
    }

    #[test]
    fn percent_humidity_becomes_fraction() {
        let migrated = migrate_to_latest(library(0)).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        let profile = &migrated.profiles[0];
        assert_eq!(profile.first.value, 24.0);
        assert!((profile.second.value - 0.45).abs() < 1e-12);
    }
}
