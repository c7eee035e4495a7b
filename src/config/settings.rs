// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for tuneforge
//!
//! Handles loading and saving settings from ~/.tuneforge/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::impact::BASELINE_FPS;

mod io;
mod migration;
mod validation;

/// Main settings structure, stored in ~/.tuneforge/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Impact estimate settings
    #[serde(default)]
    pub estimate: EstimateConfig,

    /// Schema storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the impact estimate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateConfig {
    /// Frame rate the percentage estimate is projected onto
    #[serde(default = "default_baseline_fps")]
    pub baseline_fps: u32,
}

/// Configuration for schema persistence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory of the key-value store (defaults to ~/.tuneforge/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Convert legacy named profiles into schemas on startup
    #[serde(default = "default_true")]
    pub migrate_legacy: bool,

    /// Exported legacy profiles file to pick up during migration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_profiles_path: Option<PathBuf>,
}

fn default_baseline_fps() -> u32 {
    BASELINE_FPS
}

fn default_true() -> bool {
    true
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            baseline_fps: default_baseline_fps(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            migrate_legacy: true,
            legacy_profiles_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.estimate.baseline_fps, 250);
        assert!(settings.storage.migrate_legacy);
        assert!(settings.storage.data_dir.is_none());
        assert!(settings.storage.legacy_profiles_path.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"storage": {}}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test_settings.json");

        let mut settings = Settings::default();
        settings.estimate.baseline_fps = 300;
        settings.storage.migrate_legacy = false;
        settings.storage.data_dir = Some(temp_dir.path().join("data"));

        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_settings_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("settings.json");

        Settings::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "this is not json{{{").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    // ===== Deep merge and merge-save tests =====

    #[test]
    fn test_deep_merge() {
        let base: serde_json::Value = serde_json::json!({
            "a": 1,
            "b": {"c": 2, "d": 3},
            "e": "old"
        });
        let overlay: serde_json::Value = serde_json::json!({
            "b": {"c": 99},
            "e": "new",
            "f": true
        });

        let merged = migration::deep_merge(base, overlay);

        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"]["c"], 99);
        assert_eq!(merged["b"]["d"], 3);
        assert_eq!(merged["e"], "new");
        assert_eq!(merged["f"], true);
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let initial = r#"{
            "estimate": {"baseline_fps": 200, "display": "compact"},
            "future_feature": {"enabled": true}
        }"#;
        std::fs::write(&path, initial).unwrap();

        let mut settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.estimate.baseline_fps, 200);
        settings.estimate.baseline_fps = 360;
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["estimate"]["baseline_fps"], 360);
        assert_eq!(value["estimate"]["display"], "compact");
        assert_eq!(value["future_feature"]["enabled"], true);
    }

    #[test]
    fn test_save_overwrites_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "this is not json{{{").unwrap();

        Settings::default().save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_save_clean_does_full_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"future_feature": {"enabled": true}}"#).unwrap();

        Settings::default().save_to_clean(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("future_feature").is_none());
    }

    // ===== migration tests =====

    #[test]
    fn test_flat_baseline_is_moved_into_estimate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"baseline_fps": 144}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.estimate.baseline_fps, 144);
    }

    #[test]
    fn test_nested_baseline_wins_over_flat() {
        let raw = serde_json::json!({"baseline_fps": 144, "estimate": {"baseline_fps": 300}});
        let migrated = migration::migrate_on_load(raw);
        assert_eq!(migrated["estimate"]["baseline_fps"], 300);
        assert!(migrated.get("baseline_fps").is_none());
    }

    // ===== validation tests =====

    #[test]
    fn test_validate_rejects_zero_baseline() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.estimate.baseline_fps = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let mut settings = Settings::default();
        settings.storage.data_dir = Some(PathBuf::from("/tmp/tf-data"));
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/tf-data"));
    }
}
