//! Named profile management on a library file.

use crate::calc_service::{TextInput, resolve_inputs};
use crate::error::{AppError, AppResult};
use crate::site::Site;
use chrono::Utc;
use pf_air::{InputKind, MoistAirState};
use pf_project::{InputDef, InputKindDef, ProfileDef, ProfileLibrary};
use std::path::Path;

/// Summary of a profile for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub name: String,
    pub description: Option<String>,
    pub site: Site,
    pub first: (InputKind, f64),
    pub second: (InputKind, f64),
    pub is_current: bool,
}

pub fn kind_to_def(kind: InputKind) -> InputKindDef {
    match kind {
        InputKind::DryBulb => InputKindDef::DryBulb,
        InputKind::WetBulb => InputKindDef::WetBulb,
        InputKind::RelativeHumidity => InputKindDef::RelativeHumidity,
        InputKind::DewPoint => InputKindDef::DewPoint,
        InputKind::HumidityRatio => InputKindDef::HumidityRatio,
        InputKind::Enthalpy => InputKindDef::Enthalpy,
    }
}

pub fn kind_from_def(def: InputKindDef) -> InputKind {
    match def {
        InputKindDef::DryBulb => InputKind::DryBulb,
        InputKindDef::WetBulb => InputKind::WetBulb,
        InputKindDef::RelativeHumidity => InputKind::RelativeHumidity,
        InputKindDef::DewPoint => InputKind::DewPoint,
        InputKindDef::HumidityRatio => InputKind::HumidityRatio,
        InputKindDef::Enthalpy => InputKind::Enthalpy,
    }
}

fn input_def(input: &TextInput) -> InputDef {
    InputDef {
        kind: kind_to_def(input.kind),
        value: input.value.value(),
    }
}

fn text_input(def: &InputDef) -> TextInput {
    TextInput::from_value(kind_from_def(def.kind), def.value)
}

/// Load a library, or start an empty one if the file does not exist yet.
pub fn load_library(path: &Path) -> AppResult<ProfileLibrary> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "profile library not found, starting empty");
        return Ok(ProfileLibrary::default());
    }
    let library = pf_project::load_library(path).map_err(|source| AppError::LibraryRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        profiles = library.profiles.len(),
        "loaded profile library"
    );
    Ok(library)
}

pub fn save_library(path: &Path, library: &ProfileLibrary) -> AppResult<()> {
    pf_project::save_library(path, library)?;
    tracing::debug!(
        path = %path.display(),
        profiles = library.profiles.len(),
        "saved profile library"
    );
    Ok(())
}

pub fn list_profiles(library: &ProfileLibrary) -> Vec<ProfileSummary> {
    library
        .profiles
        .iter()
        .map(|p| ProfileSummary {
            name: p.name.clone(),
            description: p.description.clone(),
            site: Site::from(&p.site),
            first: (kind_from_def(p.first.kind), p.first.value),
            second: (kind_from_def(p.second.kind), p.second.value),
            is_current: library.current.as_deref() == Some(p.name.as_str()),
        })
        .collect()
}

/// Get a profile by name.
pub fn get_profile<'a>(library: &'a ProfileLibrary, name: &str) -> AppResult<&'a ProfileDef> {
    library
        .find(name)
        .ok_or_else(|| AppError::ProfileNotFound(name.to_string()))
}

/// Build a timestamped profile, checking first that it resolves.
pub fn build_profile(
    name: &str,
    description: Option<String>,
    site: Site,
    first: &TextInput,
    second: &TextInput,
) -> AppResult<ProfileDef> {
    resolve_inputs(&site, first, second)?;
    let profile = ProfileDef {
        name: name.to_string(),
        description,
        created: Some(Utc::now()),
        site: site.into(),
        first: input_def(first),
        second: input_def(second),
    };
    pf_project::validate_profile(&profile).map_err(pf_project::ProjectError::from)?;
    Ok(profile)
}

/// Add or replace a profile and make it current.
pub fn save_profile(library: &mut ProfileLibrary, profile: ProfileDef) {
    let name = profile.name.clone();
    if library.upsert(profile).is_some() {
        tracing::debug!(%name, "replaced existing profile");
    }
    library.current = Some(name);
}

pub fn remove_profile(library: &mut ProfileLibrary, name: &str) -> AppResult<ProfileDef> {
    library
        .remove(name)
        .ok_or_else(|| AppError::ProfileNotFound(name.to_string()))
}

/// Make `name` the current profile.
pub fn select_profile(library: &mut ProfileLibrary, name: &str) -> AppResult<()> {
    if !library.select(name) {
        return Err(AppError::ProfileNotFound(name.to_string()));
    }
    tracing::debug!(profile = name, "selected profile");
    Ok(())
}

/// Resolve the state a profile describes.
pub fn run_profile(profile: &ProfileDef) -> AppResult<MoistAirState> {
    let site = Site::from(&profile.site);
    resolve_inputs(&site, &text_input(&profile.first), &text_input(&profile.second))
}

/// Write the whole library as JSON.
pub fn export_json(library: &ProfileLibrary, path: &Path) -> AppResult<()> {
    pf_project::save_json(path, library)?;
    tracing::debug!(path = %path.display(), "exported profiles");
    Ok(())
}

/// Merge profiles from a JSON export into `library`, replacing same-named
/// ones. Returns the number of profiles imported.
pub fn import_json(library: &mut ProfileLibrary, path: &Path) -> AppResult<usize> {
    let incoming = pf_project::load_json(path)?;
    let count = incoming.profiles.len();
    for profile in incoming.profiles {
        if library.upsert(profile).is_some() {
            tracing::warn!(path = %path.display(), "import replaced a profile of the same name");
        }
    }
    tracing::debug!(path = %path.display(), count, "imported profiles");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> ProfileDef {
        build_profile(
            "office",
            None,
            Site::Standard,
            &TextInput::parse("db=24").unwrap(),
            &TextInput::parse("rh=45%").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn kind_conversion_round_trips() {
        for kind in InputKind::ALL {
            assert_eq!(kind_from_def(kind_to_def(kind)), kind);
        }
    }

    #[test]
    fn built_profile_is_stamped_and_runs() {
        let profile = office();
        assert!(profile.created.is_some());
        assert!((profile.second.value - 0.45).abs() < 1e-12);
        let state = run_profile(&profile).unwrap();
        assert!((state.dry_bulb_c() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn unresolvable_profile_is_not_built() {
        let err = build_profile(
            "bad",
            None,
            Site::Standard,
            &TextInput::parse("rh=50%").unwrap(),
            &TextInput::parse("w=0.01").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Air(_)));
    }

    #[test]
    fn save_marks_current_and_remove_clears_it() {
        let mut library = ProfileLibrary::default();
        save_profile(&mut library, office());
        assert_eq!(library.current.as_deref(), Some("office"));
        assert!(list_profiles(&library)[0].is_current);

        remove_profile(&mut library, "office").unwrap();
        assert!(library.current.is_none());
        assert!(matches!(
            remove_profile(&mut library, "office"),
            Err(AppError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn select_switches_current_profile() {
        let mut library = ProfileLibrary::default();
        save_profile(&mut library, office());
        let mut lab = office();
        lab.name = "lab".to_string();
        save_profile(&mut library, lab);
        assert_eq!(library.current.as_deref(), Some("lab"));

        select_profile(&mut library, "office").unwrap();
        assert_eq!(library.current_profile().unwrap().name, "office");
        assert!(matches!(
            select_profile(&mut library, "attic"),
            Err(AppError::ProfileNotFound(_))
        ));
        assert_eq!(library.current.as_deref(), Some("office"));
    }
}
