// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use tempfile::TempDir;
use tuneforge::config::Settings;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();
    assert_eq!(settings.estimate.baseline_fps, 250);
    assert!(settings.storage.migrate_legacy);
    assert!(settings.storage.data_dir.is_none());
    assert!(settings.storage.legacy_profiles_path.is_none());
    assert!(settings.validate().is_ok());
}

#[test]
fn test_home_follows_env_var() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("TUNEFORGE_HOME", temp_dir.path());
    assert_eq!(Settings::tuneforge_home(), temp_dir.path());
    assert_eq!(
        Settings::default_path(),
        temp_dir.path().join("settings.json")
    );
    assert_eq!(Settings::default().data_dir(), temp_dir.path().join("data"));
    std::env::remove_var("TUNEFORGE_HOME");
}

#[test]
fn test_settings_deserialization_fills_defaults() {
    let json = r#"{ "storage": { "data_dir": "/srv/tuneforge" } }"#;
    let settings: Settings = serde_json::from_str(json).expect("Should deserialize");
    assert_eq!(settings.estimate.baseline_fps, 250);
    assert_eq!(
        settings.storage.data_dir,
        Some(PathBuf::from("/srv/tuneforge"))
    );
    assert!(settings.storage.migrate_legacy);
}

#[test]
fn test_save_and_reload_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.estimate.baseline_fps = 300;
    settings.storage.migrate_legacy = false;
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_flat_baseline_from_older_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "baseline_fps": 144 }"#).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.estimate.baseline_fps, 144);
}

#[test]
fn test_validation_rejects_zero_baseline() {
    let mut settings = Settings::default();
    settings.estimate.baseline_fps = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_explicit_data_dir_wins_over_home() {
    let mut settings = Settings::default();
    settings.storage.data_dir = Some(PathBuf::from("/var/lib/tuneforge"));
    assert_eq!(
        settings.data_dir_in(&PathBuf::from("/home/user/.tuneforge")),
        PathBuf::from("/var/lib/tuneforge")
    );
}
