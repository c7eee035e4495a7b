// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Migration from flat named profiles
//!
//! Older releases stored `{ name: { setting_id: bool | string } }` under a
//! single key with no layout information. Each named profile becomes a
//! schema with the default layout.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::kv::KeyValueStore;
use super::store::SchemaStore;
use super::types::Schema;
use crate::catalog::{self, SettingValue, Values};
use crate::error::Result;

/// Key holding legacy profiles
pub const LEGACY_KEY: &str = "profiles";
/// Set once migration has run
pub const MIGRATED_KEY: &str = "schemas_migrated";

/// Convert one legacy snapshot into typed values.
///
/// Only catalog ids whose stored value matches the setting's kind survive.
pub fn legacy_values(snapshot: &serde_json::Map<String, Value>) -> Values {
    let mut values = Values::new();
    for (id, raw) in snapshot {
        let value = match raw {
            Value::Bool(b) => SettingValue::Bool(*b),
            Value::String(s) => SettingValue::Text(s.clone()),
            Value::Number(n) => SettingValue::Text(n.to_string()),
            _ => continue,
        };
        match catalog::find(id) {
            Some(def) if def.kind.accepts(&value) => {
                values.insert(id.clone(), value);
            }
            _ => debug!(id = %id, "skipping legacy value"),
        }
    }
    values
}

impl<S: KeyValueStore> SchemaStore<S> {
    /// Whether legacy migration has already run
    pub fn legacy_migrated(&self) -> Result<bool> {
        Ok(self.kv().get(MIGRATED_KEY)?.is_some())
    }

    /// Place legacy profile data where [`SchemaStore::migrate_legacy`] looks
    /// for it. Does nothing once migration has run. Returns whether the data
    /// was staged.
    pub fn stage_legacy_profiles(&mut self, content: &str) -> Result<bool> {
        if self.legacy_migrated()? {
            return Ok(false);
        }
        self.kv_mut().set(LEGACY_KEY, content)?;
        Ok(true)
    }

    /// Convert legacy named profiles into schemas, once.
    ///
    /// Returns how many schemas were created. Malformed profiles are skipped;
    /// unreadable legacy data is logged and marked as migrated so it is not
    /// retried on every start.
    pub fn migrate_legacy(&mut self) -> Result<usize> {
        if self.legacy_migrated()? {
            return Ok(0);
        }
        let Some(content) = self.kv().get(LEGACY_KEY)? else {
            return Ok(0);
        };

        let profiles: serde_json::Map<String, Value> = match serde_json::from_str(&content) {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!(error = %e, "legacy profiles are unreadable, skipping migration");
                self.kv_mut().set(MIGRATED_KEY, "true")?;
                return Ok(0);
            }
        };

        let mut schemas = self.load_raw()?;
        let mut created = 0;
        for (name, snapshot) in &profiles {
            let Some(snapshot) = snapshot.as_object() else {
                warn!(profile = %name, "legacy profile is not an object, skipping");
                continue;
            };
            if name.trim().is_empty() {
                warn!("legacy profile without a name, skipping");
                continue;
            }
            let mut schema = Schema::new(name.trim());
            schema.values = legacy_values(snapshot);
            debug!(profile = %name, values = schema.values.len(), "migrated legacy profile");
            schemas.push(schema);
            created += 1;
        }

        if created > 0 {
            self.save(&schemas)?;
        }
        self.kv_mut().set(MIGRATED_KEY, "true")?;
        info!(created, "legacy profile migration complete");
        Ok(created)
    }
}
