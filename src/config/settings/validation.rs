// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, TuneError};

use super::Settings;

impl Settings {
    /// Check values serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        if self.estimate.baseline_fps == 0 {
            return Err(TuneError::Config(
                "estimate.baseline_fps must be greater than zero".to_string(),
            ));
        }
        if let Some(path) = &self.storage.legacy_profiles_path {
            if path.as_os_str().is_empty() {
                return Err(TuneError::Config(
                    "storage.legacy_profiles_path is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
