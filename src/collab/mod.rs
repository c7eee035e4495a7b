// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Interfaces to external collaborators
//!
//! The engine never touches the host directly. Telemetry, live system state
//! and host mutation all come through these traits; each call is a single
//! request/response and callers own any retry policy.

pub mod state;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Values};
use crate::error::Result;
use crate::hardware::RawTelemetry;

pub use state::{StaticStateChecker, SystemState, SystemStateSnapshot};

/// Source of raw hardware readings
#[async_trait]
pub trait TelemetryProvider: Send + Sync {
    /// Read the machine. An error means the probe failed entirely.
    async fn probe(&self) -> Result<RawTelemetry>;
}

/// Reports which settings are already in effect on the host
#[async_trait]
pub trait SystemStateChecker: Send + Sync {
    /// Check the given ids. Ids the checker cannot determine map to `Unknown`.
    async fn check(&self, ids: &[String]) -> Result<SystemStateSnapshot>;
}

/// Applies a selection to the host
#[async_trait]
pub trait HostApplier: Send + Sync {
    /// Apply `selection`, optionally limited to one category
    async fn apply(&self, selection: &Values, scope: Option<Category>) -> Result<ApplyReport>;
}

/// Overall outcome of an apply call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyStatus {
    Success,
    Partial,
    Failure,
}

/// Per-command counts reported by the applier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyCounts {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Result of applying a selection to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub status: ApplyStatus,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub counts: ApplyCounts,
}

impl ApplyReport {
    /// Build a report whose status is derived from the counts
    pub fn from_counts(counts: ApplyCounts, errors: Vec<String>) -> Self {
        let status = if counts.failed == 0 {
            ApplyStatus::Success
        } else if counts.succeeded > 0 {
            ApplyStatus::Partial
        } else {
            ApplyStatus::Failure
        };
        Self {
            status,
            errors,
            counts,
        }
    }

    /// Whether every attempted command succeeded
    pub fn is_success(&self) -> bool {
        self.status == ApplyStatus::Success
    }
}
