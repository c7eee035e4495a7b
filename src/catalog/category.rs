// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Setting categories

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TuneError;

/// Category every catalog setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Firmware settings the user must change by hand
    Bios,
    Windows,
    Network,
    Nvidia,
    Services,
    /// In-game console commands written to autoexec.cfg
    Autoexec,
    LaunchOptions,
    Extras,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Bios,
        Category::Windows,
        Category::Network,
        Category::Nvidia,
        Category::Services,
        Category::Autoexec,
        Category::LaunchOptions,
        Category::Extras,
    ];

    /// Id prefix shared by every catalog setting of this category
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Bios => "b_",
            Category::Windows => "w_",
            Category::Network => "n_",
            Category::Nvidia => "nv_",
            Category::Services => "s_",
            Category::Autoexec => "ae_",
            Category::LaunchOptions => "lo_",
            Category::Extras => "x_",
        }
    }

    /// Stable machine name, also used in bucket keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bios => "bios",
            Category::Windows => "windows",
            Category::Network => "network",
            Category::Nvidia => "nvidia",
            Category::Services => "services",
            Category::Autoexec => "autoexec",
            Category::LaunchOptions => "launch_options",
            Category::Extras => "extras",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Bios => "BIOS (Manual)",
            Category::Windows => "Windows",
            Category::Network => "Network",
            Category::Nvidia => "NVIDIA",
            Category::Services => "Services",
            Category::Autoexec => "autoexec.cfg",
            Category::LaunchOptions => "Launch Options",
            Category::Extras => "Extras",
        }
    }

    /// Category whose prefix the id carries
    pub fn from_id_prefix(id: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| id.starts_with(category.prefix()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| TuneError::InvalidInput(format!("unknown category: {}", s)))
    }
}
