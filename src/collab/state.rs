// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! System-state snapshots

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::SystemStateChecker;
use crate::error::Result;

/// Whether a setting is already in effect on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    Applied,
    NotApplied,
    #[default]
    Unknown,
}

impl From<Option<bool>> for SystemState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => SystemState::Applied,
            Some(false) => SystemState::NotApplied,
            None => SystemState::Unknown,
        }
    }
}

impl From<SystemState> for Option<bool> {
    fn from(value: SystemState) -> Self {
        match value {
            SystemState::Applied => Some(true),
            SystemState::NotApplied => Some(false),
            SystemState::Unknown => None,
        }
    }
}

/// Read-only id -> state mapping.
///
/// Serialized the way checkers report it: `true`, `false` or `null` per id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<bool>>",
    into = "BTreeMap<String, Option<bool>>"
)]
pub struct SystemStateSnapshot {
    states: BTreeMap<String, SystemState>,
}

impl SystemStateSnapshot {
    /// Empty snapshot: every id is `Unknown`
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one id; missing ids are `Unknown`
    pub fn get(&self, id: &str) -> SystemState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Whether the host reports the id as already in effect
    pub fn is_applied(&self, id: &str) -> bool {
        self.get(id) == SystemState::Applied
    }

    /// Record a state
    pub fn set(&mut self, id: impl Into<String>, state: SystemState) {
        self.states.insert(id.into(), state);
    }

    /// Ids reported as applied
    pub fn applied_ids(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|(_, state)| **state == SystemState::Applied)
            .map(|(id, _)| id.as_str())
    }

    /// Number of ids with a recorded state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state was recorded
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Parse a checker's JSON output
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<BTreeMap<String, Option<bool>>> for SystemStateSnapshot {
    fn from(raw: BTreeMap<String, Option<bool>>) -> Self {
        Self {
            states: raw.into_iter().map(|(id, v)| (id, v.into())).collect(),
        }
    }
}

impl From<SystemStateSnapshot> for BTreeMap<String, Option<bool>> {
    fn from(snapshot: SystemStateSnapshot) -> Self {
        snapshot
            .states
            .into_iter()
            .map(|(id, state)| (id, state.into()))
            .collect()
    }
}

impl FromIterator<(String, SystemState)> for SystemStateSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SystemState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

/// Checker that answers from a fixed snapshot, e.g. one saved to disk
#[derive(Debug, Clone, Default)]
pub struct StaticStateChecker {
    snapshot: SystemStateSnapshot,
}

impl StaticStateChecker {
    /// Serve the given snapshot
    pub fn new(snapshot: SystemStateSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(SystemStateSnapshot::from_json(&content)?))
    }
}

#[async_trait]
impl SystemStateChecker for StaticStateChecker {
    async fn check(&self, ids: &[String]) -> Result<SystemStateSnapshot> {
        Ok(ids
            .iter()
            .map(|id| (id.clone(), self.snapshot.get(id)))
            .collect())
    }
}
