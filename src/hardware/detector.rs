// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telemetry providers: a local `sysinfo` probe and a saved-reading replay
//!
//! The sysinfo probe covers CPU, memory and OS fields. GPU, refresh rate and
//! driver flags need vendor tooling, so they are left unknown and the
//! classifier falls back to its defaults for them.

use async_trait::async_trait;
use std::path::PathBuf;
use sysinfo::System;

use super::profile::RawTelemetry;
use crate::collab::TelemetryProvider;
use crate::error::{Result, TuneError};

/// Telemetry provider reading the local machine through `sysinfo`
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProbe;

impl SysinfoProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }

    /// Read the machine synchronously
    pub fn read() -> RawTelemetry {
        let mut sys = System::new_all();
        sys.refresh_all();

        let ram_bytes = sys.total_memory();
        let ram_total_gb = if ram_bytes > 0 {
            Some(ram_bytes as f64 / (1024.0 * 1024.0 * 1024.0))
        } else {
            None
        };

        let cpus = sys.cpus();
        let cpu_name = cpus
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty());
        let cpu_clock_mhz = cpus
            .iter()
            .map(|cpu| cpu.frequency())
            .max()
            .filter(|mhz| *mhz > 0)
            .map(|mhz| mhz as f64);
        let cpu_threads = if cpus.is_empty() {
            None
        } else {
            Some(cpus.len() as f64)
        };

        RawTelemetry {
            cpu_name,
            // sysinfo only lists logical processors here
            cpu_cores: None,
            cpu_threads,
            cpu_clock_mhz,
            ram_total_gb,
            os_name: System::long_os_version(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TelemetryProvider for SysinfoProbe {
    async fn probe(&self) -> Result<RawTelemetry> {
        let raw = tokio::task::spawn_blocking(Self::read)
            .await
            .map_err(|e| TuneError::Probe(format!("sysinfo probe task failed: {}", e)))?;
        tracing::debug!(
            cpu = ?raw.cpu_name,
            threads = ?raw.cpu_threads,
            ram_gb = ?raw.ram_total_gb,
            "sysinfo probe complete"
        );
        Ok(raw)
    }
}

/// Telemetry provider replaying a probe reading saved as JSON
#[derive(Debug, Clone)]
pub struct FileProbe {
    path: PathBuf,
}

impl FileProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TelemetryProvider for FileProbe {
    async fn probe(&self) -> Result<RawTelemetry> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| {
            TuneError::Probe(format!("{}: {}", self.path.display(), e))
        })
    }
}
