// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! End-to-end flows through the tuner and the schema store

use async_trait::async_trait;
use tuneforge::catalog::{Category, SettingValue, Values};
use tuneforge::collab::{
    StaticStateChecker, SystemState, SystemStateSnapshot, TelemetryProvider,
};
use tuneforge::config::Settings;
use tuneforge::hardware::{HardwareTier, RawTelemetry};
use tuneforge::schema::{MemoryStore, SchemaStore, DEFAULT_SCHEMA_NAME};
use tuneforge::tuner::Tuner;
use tuneforge::Result;

struct Probe(RawTelemetry);

#[async_trait]
impl TelemetryProvider for Probe {
    async fn probe(&self) -> Result<RawTelemetry> {
        Ok(self.0.clone())
    }
}

fn tuner() -> Tuner<MemoryStore> {
    Tuner::new(SchemaStore::new(MemoryStore::new()), &Settings::default())
}

fn telemetry(vram_mb: f64, cores: f64, ram_gb: f64, refresh: f64) -> RawTelemetry {
    RawTelemetry {
        gpu_name: Some("NVIDIA GeForce GTX 1050".to_string()),
        gpu_vram_mb: Some(vram_mb),
        cpu_cores: Some(cores),
        ram_total_gb: Some(ram_gb),
        refresh_rate: Some(refresh),
        hags: Some("ON".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_low_end_machine_skips_gpu_scheduling() {
    let mut tuner = tuner();
    let probe = Probe(telemetry(2048.0, 2.0, 6.0, 60.0));

    assert_eq!(tuner.profile(&probe).await.tier, HardwareTier::LowEnd);
    let set = tuner.recommend(&probe).await;
    assert_eq!(set["w_hgs"], SettingValue::Bool(false));
    assert_eq!(set["w_spectre"], SettingValue::Bool(false));
}

#[tokio::test]
async fn test_frame_cap_follows_refresh_rate() {
    let mut tuner = tuner();
    let set = tuner
        .recommend_scoped(&Probe(telemetry(8192.0, 8.0, 32.0, 144.0)), Category::Autoexec)
        .await;
    assert_eq!(set["ae_fps"], SettingValue::Text("288".to_string()));
    assert!(set.keys().all(|id| id.starts_with("ae_")));

    let probe = Probe(telemetry(8192.0, 8.0, 32.0, 240.0));
    tuner.rescan(&probe).await;
    let set = tuner.recommend(&probe).await;
    assert_eq!(set["ae_fps"], SettingValue::Text("0".to_string()));
}

#[tokio::test]
async fn test_estimate_skips_applied_settings() {
    let tuner = tuner();
    let mut selection = Values::new();
    selection.insert("w_power".to_string(), SettingValue::Bool(true));
    selection.insert("w_fso".to_string(), SettingValue::Bool(true));
    selection.insert("w_hpet".to_string(), SettingValue::Bool(true));
    selection.insert("w_spectre".to_string(), SettingValue::Bool(false));

    let mut snapshot = SystemStateSnapshot::new();
    snapshot.set("w_power", SystemState::Applied);
    snapshot.set("w_fso", SystemState::NotApplied);
    snapshot.set("w_hpet", SystemState::NotApplied);
    let checker = StaticStateChecker::new(snapshot);

    let state = tuner.check_state(&checker, &selection).await;
    let estimate = tuner.estimate(&selection, &state);
    assert_eq!(estimate.percent, 5.0);
    assert_eq!(estimate.fps, 13);
}

#[tokio::test]
async fn test_accepting_recommendations_updates_active_schema() {
    let mut tuner = tuner();
    let probe = Probe(telemetry(12288.0, 8.0, 32.0, 144.0));
    let changed = tuner
        .accept_recommendations(&probe, Some(Category::Nvidia))
        .await
        .unwrap();
    assert!(!changed.is_empty());

    let active = tuner.store_mut().ensure_active().unwrap();
    assert_eq!(active.values["nv_perf"], SettingValue::Bool(true));
    assert!(active.values.keys().all(|id| id.starts_with("nv_")));

    let again = tuner
        .accept_recommendations(&probe, Some(Category::Nvidia))
        .await
        .unwrap();
    assert!(again.is_empty());
}

#[test]
fn test_deleting_only_custom_schema_leaves_active_default() {
    let mut store = SchemaStore::new(MemoryStore::new());
    let schema = store.create("X").unwrap();
    store.set_active(schema.id).unwrap();
    assert!(store.delete(schema.id).unwrap());

    let schemas = store.list().unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name, DEFAULT_SCHEMA_NAME);
    assert_eq!(store.active().unwrap().map(|s| s.id), Some(schemas[0].id));
}
