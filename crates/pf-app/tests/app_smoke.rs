//! Smoke test for the pf-app service layer.

use pf_app::profile_service::{
    build_profile, export_json, import_json, load_library, run_profile, save_library,
    save_profile,
};
use pf_app::{Site, TextInput, resolve_text, summarize};
use pf_project::ProfileLibrary;

#[test]
fn resolve_and_summarize() {
    let site = Site::from_text(Some("101.325 kPa"), None).unwrap();
    let state = resolve_text(&site, "db=25", "rh=50%").unwrap();
    let rows = summarize(&state);
    assert_eq!(rows.len(), 10);
    let wb = rows.iter().find(|r| r.label == "Wet bulb").unwrap();
    assert!(wb.value.starts_with("17.") || wb.value.starts_with("18."));
}

#[test]
fn profile_library_file_lifecycle() {
    let dir = std::env::temp_dir();
    let library_path = dir.join("pf_app_profiles.yaml");
    let export_path = dir.join("pf_app_profiles_export.json");
    let _ = std::fs::remove_file(&library_path);

    let mut library = load_library(&library_path).unwrap();
    assert!(library.profiles.is_empty());

    let profile = build_profile(
        "Lab",
        Some("Climate chamber".to_string()),
        Site::Altitude(1_000.0),
        &TextInput::parse("wb=15").unwrap(),
        &TextInput::parse("dp=10").unwrap(),
    )
    .unwrap();
    save_profile(&mut library, profile);
    save_library(&library_path, &library).unwrap();

    let reloaded = load_library(&library_path).unwrap();
    assert_eq!(reloaded, library);
    let state = run_profile(reloaded.current_profile().unwrap()).unwrap();
    assert!(state.pressure_pa() < 101_325.0);
    assert!(state.dry_bulb_c() > 15.0);

    export_json(&reloaded, &export_path).unwrap();
    let mut other = ProfileLibrary::default();
    assert_eq!(import_json(&mut other, &export_path).unwrap(), 1);
    assert!(other.find("Lab").is_some());
}
