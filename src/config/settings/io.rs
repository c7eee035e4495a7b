// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, TuneError};

use super::migration;
use super::Settings;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "TUNEFORGE_HOME";

impl Settings {
    /// `settings.json` under the home directory
    pub fn default_path() -> PathBuf {
        Self::tuneforge_home().join("settings.json")
    }

    /// Load from [`Settings::default_path`]
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`. A missing file yields defaults; a file that is not
    /// valid settings JSON is a configuration error naming the path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&content)
            .map_err(|e| TuneError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_value(migration::migrate_on_load(raw))
            .map_err(|e| TuneError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save to [`Settings::default_path`]
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save to `path`, keeping keys this version does not know about.
    ///
    /// An unreadable existing file is replaced.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let ours = serde_json::to_value(self)?;
        let merged = match std::fs::read_to_string(path) {
            Ok(existing) => match serde_json::from_str::<Value>(&existing) {
                Ok(existing) => migration::deep_merge(existing, ours),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "replacing unreadable settings file");
                    ours
                }
            },
            Err(_) => ours,
        };
        write_pretty(path, &merged)
    }

    /// Save to `path`, dropping anything else the file held
    pub fn save_to_clean(&self, path: &Path) -> Result<()> {
        write_pretty(path, &serde_json::to_value(self)?)
    }

    /// `$TUNEFORGE_HOME`, else `~/.tuneforge`
    pub fn tuneforge_home() -> PathBuf {
        match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tuneforge"),
        }
    }

    /// Key-value store directory under the default home
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir_in(&Self::tuneforge_home())
    }

    /// Key-value store directory: the configured one, else `<home>/data`
    pub fn data_dir_in(&self, home: &Path) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => home.join("data"),
        }
    }
}

fn write_pretty(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    debug!(path = %path.display(), "saved settings");
    Ok(())
}
