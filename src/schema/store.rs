// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Schema store implementation
//!
//! The whole collection lives under one key as a JSON array and is rewritten
//! on every mutation. The active schema is a separate pointer key.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::kv::KeyValueStore;
use super::types::{BucketKey, CustomEntry, Schema, CUSTOM_ID_PREFIX, DEFAULT_SCHEMA_NAME};
use crate::catalog::{Category, SettingValue, Values};
use crate::error::{Result, TuneError};

/// Key holding the schema collection
pub const SCHEMAS_KEY: &str = "schemas";
/// Key holding the active schema id
pub const ACTIVE_KEY: &str = "active_schema";

/// CRUD over the schema collection
pub struct SchemaStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> SchemaStore<S> {
    /// Wrap a key-value store
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Underlying key-value store
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub(crate) fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    /// Read the persisted collection as-is. Corrupted data reads as empty.
    pub(crate) fn load_raw(&self) -> Result<Vec<Schema>> {
        let Some(content) = self.kv.get(SCHEMAS_KEY)? else {
            return Ok(Vec::new());
        };
        let mut schemas: Vec<Schema> = match serde_json::from_str(&content) {
            Ok(schemas) => schemas,
            Err(e) => {
                warn!(error = %e, "schema collection is unreadable, starting from an empty store");
                return Ok(Vec::new());
            }
        };
        for schema in &mut schemas {
            let removed = schema.repair_layout();
            if removed > 0 {
                warn!(schema = %schema.id, removed, "dropped duplicate or unknown layout entries");
            }
        }
        Ok(schemas)
    }

    /// Read the collection, creating Default if it is empty
    fn load(&mut self) -> Result<Vec<Schema>> {
        let mut schemas = self.load_raw()?;
        if schemas.is_empty() {
            let schema = Schema::new(DEFAULT_SCHEMA_NAME);
            info!(id = %schema.id, "store is empty, created default schema");
            schemas.push(schema);
            self.save(&schemas)?;
        }
        Ok(schemas)
    }

    /// Persist the whole collection
    pub(crate) fn save(&mut self, schemas: &[Schema]) -> Result<()> {
        let content = serde_json::to_string_pretty(schemas)?;
        self.kv.set(SCHEMAS_KEY, &content)
    }

    /// Apply `f` to one schema and persist the collection if it reports a change
    fn modify<T>(
        &mut self,
        id: Uuid,
        f: impl FnOnce(&mut Schema) -> Result<(bool, T)>,
    ) -> Result<T> {
        let mut schemas = self.load()?;
        let schema = schemas
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TuneError::SchemaNotFound(id))?;
        let (changed, out) = f(schema)?;
        if changed {
            schema.touch();
            self.save(&schemas)?;
        }
        Ok(out)
    }

    /// All schemas in creation order
    pub fn list(&mut self) -> Result<Vec<Schema>> {
        self.load()
    }

    /// Get a schema by id
    pub fn get(&mut self, id: Uuid) -> Result<Schema> {
        self.load()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(TuneError::SchemaNotFound(id))
    }

    /// Look a schema up by id or, failing that, by case-insensitive name
    pub fn resolve(&mut self, key: &str) -> Result<Schema> {
        let key = key.trim();
        if let Ok(id) = Uuid::parse_str(key) {
            return self.get(id);
        }
        self.load()?
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| TuneError::InvalidInput(format!("no schema named {}", key)))
    }

    /// Create a schema with the default layout and no values
    pub fn create(&mut self, name: &str) -> Result<Schema> {
        let name = validate_name(name)?;
        let mut schemas = self.load_raw()?;
        let schema = Schema::new(name);
        schemas.push(schema.clone());
        self.save(&schemas)?;
        info!(id = %schema.id, name = %schema.name, "created schema");
        Ok(schema)
    }

    /// Create a schema named "Default"
    pub fn create_default(&mut self) -> Result<Schema> {
        self.create(DEFAULT_SCHEMA_NAME)
    }

    /// Copy a schema under a new id and name
    pub fn duplicate(&mut self, id: Uuid, name: &str) -> Result<Schema> {
        let name = validate_name(name)?;
        let mut schemas = self.load()?;
        let source = schemas
            .iter()
            .find(|s| s.id == id)
            .ok_or(TuneError::SchemaNotFound(id))?;

        let fresh = Schema::new(name);
        let copy = Schema {
            id: fresh.id,
            name: fresh.name,
            created_at: fresh.created_at,
            updated_at: fresh.updated_at,
            ..source.clone()
        };
        schemas.push(copy.clone());
        self.save(&schemas)?;
        info!(from = %id, id = %copy.id, "duplicated schema");
        Ok(copy)
    }

    /// Change a schema's display name
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<Schema> {
        let name = validate_name(name)?;
        self.modify(id, |schema| {
            schema.name = name;
            Ok((true, ()))
        })?;
        self.get(id)
    }

    /// Delete a schema. Returns `false` if it did not exist.
    ///
    /// Deleting the last schema re-creates Default and makes it active.
    /// Deleting the active schema clears the pointer.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let mut schemas = self.load_raw()?;
        let before = schemas.len();
        schemas.retain(|s| s.id != id);
        if schemas.len() == before {
            return Ok(false);
        }
        let was_active = self.active_id()? == Some(id);

        if schemas.is_empty() {
            let schema = Schema::new(DEFAULT_SCHEMA_NAME);
            let default_id = schema.id;
            schemas.push(schema);
            self.save(&schemas)?;
            self.kv.set(ACTIVE_KEY, &default_id.to_string())?;
            info!(deleted = %id, id = %default_id, "deleted last schema, re-created default");
            return Ok(true);
        }

        self.save(&schemas)?;
        if was_active {
            self.kv.remove(ACTIVE_KEY)?;
        }
        info!(id = %id, "deleted schema");
        Ok(true)
    }

    /// Replace a schema's committed values
    pub fn save_values(&mut self, id: Uuid, values: &Values) -> Result<()> {
        self.modify(id, |schema| {
            let changed = schema.values != *values;
            schema.values = values.clone();
            Ok((changed, ()))
        })?;
        debug!(id = %id, count = values.len(), "saved schema values");
        Ok(())
    }

    /// Replace one bucket's ordered ids.
    ///
    /// Returns `Ok(false)` and leaves the layout untouched when the list
    /// repeats an id, names an unknown id, or takes an id that is visible in
    /// another bucket.
    pub fn set_layout_bucket(&mut self, id: Uuid, bucket: BucketKey, ids: &[String]) -> Result<bool> {
        self.modify(id, |schema| {
            if let Some(reason) = schema.check_bucket_replacement(bucket, ids) {
                warn!(schema = %schema.id, %bucket, %reason, "rejected layout change");
                return Ok((false, false));
            }
            schema.layout.insert(bucket, ids.to_vec());
            Ok((true, true))
        })
    }

    /// Move a setting between Principal and its category's Secondary bucket.
    ///
    /// The setting is taken out of every other bucket, wherever a previous
    /// layout edit put it. Returns `Ok(false)` when it already sits only in
    /// the requested bucket.
    pub fn star(&mut self, id: Uuid, setting_id: &str, to_principal: bool) -> Result<bool> {
        self.modify(id, |schema| {
            let category = schema
                .category_of(setting_id)
                .ok_or_else(|| TuneError::UnknownSetting(setting_id.to_string()))?;
            let target = if to_principal {
                BucketKey::Principal
            } else {
                BucketKey::Secondary(category)
            };

            let holders: Vec<BucketKey> = schema
                .layout
                .iter()
                .filter(|(_, ids)| ids.iter().any(|i| i == setting_id))
                .map(|(key, _)| *key)
                .collect();
            let occurrences: usize = schema
                .layout
                .values()
                .map(|ids| ids.iter().filter(|i| *i == setting_id).count())
                .sum();
            if holders == [target] && occurrences == 1 {
                return Ok((false, false));
            }

            for ids in schema.layout.values_mut() {
                ids.retain(|i| i != setting_id);
            }
            schema
                .layout
                .entry(target)
                .or_default()
                .push(setting_id.to_string());
            debug!(schema = %schema.id, setting = setting_id, %target, "starred setting");
            Ok((true, true))
        })
    }

    /// Register an ad-hoc entry on a schema. It starts hidden.
    pub fn add_custom(
        &mut self,
        id: Uuid,
        label: &str,
        category: Category,
        value: SettingValue,
    ) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(TuneError::InvalidInput("custom entry needs a label".to_string()));
        }
        let custom_id = format!(
            "{}{}",
            CUSTOM_ID_PREFIX,
            &Uuid::new_v4().simple().to_string()[..8]
        );
        let entry = CustomEntry {
            label: label.to_string(),
            category,
            value,
        };
        self.modify(id, |schema| {
            schema.custom.insert(custom_id.clone(), entry);
            Ok((true, ()))
        })?;
        info!(schema = %id, custom = %custom_id, "added custom entry");
        Ok(custom_id)
    }

    /// Delete custom entries along with their layout rows and stored values.
    ///
    /// Ids that are not custom entries of the schema are ignored. Returns how
    /// many entries were deleted.
    pub fn remove_custom(&mut self, id: Uuid, custom_ids: &[String]) -> Result<usize> {
        let removed = self.modify(id, |schema| {
            let removed = custom_ids
                .iter()
                .filter(|custom_id| schema.custom.remove(custom_id.as_str()).is_some())
                .count();
            if removed > 0 {
                for ids in schema.layout.values_mut() {
                    ids.retain(|i| !custom_ids.contains(i));
                }
                schema.values.retain(|key, _| !custom_ids.contains(key));
            }
            Ok((removed > 0, removed))
        })?;
        if removed > 0 {
            info!(schema = %id, removed, "removed custom entries");
        }
        Ok(removed)
    }

    /// Id the active pointer holds, if any. The schema may no longer exist.
    pub fn active_id(&self) -> Result<Option<Uuid>> {
        Ok(self
            .kv
            .get(ACTIVE_KEY)?
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok()))
    }

    /// The active schema, if the pointer names an existing one
    pub fn active(&mut self) -> Result<Option<Schema>> {
        let Some(id) = self.active_id()? else {
            return Ok(None);
        };
        Ok(self.load()?.into_iter().find(|s| s.id == id))
    }

    /// Point the active marker at an existing schema
    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        self.get(id)?;
        self.kv.set(ACTIVE_KEY, &id.to_string())?;
        info!(id = %id, "activated schema");
        Ok(())
    }

    /// The active schema, repairing the pointer to the first schema if needed
    pub fn ensure_active(&mut self) -> Result<Schema> {
        if let Some(schema) = self.active()? {
            return Ok(schema);
        }
        let first = self
            .load()?
            .into_iter()
            .next()
            .ok_or_else(|| TuneError::Store("schema collection is empty".to_string()))?;
        self.kv.set(ACTIVE_KEY, &first.id.to_string())?;
        debug!(id = %first.id, "active pointer repaired");
        Ok(first)
    }

    /// Serialize a schema for export
    pub fn export_to_json(schema: &Schema) -> Result<String> {
        Ok(serde_json::to_string_pretty(schema)?)
    }

    /// Import an exported schema.
    ///
    /// A schema with the same id is overwritten in place: it keeps its
    /// creation time and its modification time is bumped. A new id is added
    /// with the exported timestamps.
    pub fn import_from_json(&mut self, text: &str) -> Result<Schema> {
        let mut incoming: Schema = serde_json::from_str(text)?;
        incoming.name = validate_name(&incoming.name)?;
        let removed = incoming.repair_layout();
        if removed > 0 {
            warn!(schema = %incoming.id, removed, "dropped duplicate or unknown layout entries on import");
        }

        let mut schemas = self.load_raw()?;
        let schema = match schemas.iter_mut().find(|s| s.id == incoming.id) {
            Some(existing) => {
                existing.name = incoming.name;
                existing.layout = incoming.layout;
                existing.values = incoming.values;
                existing.custom = incoming.custom;
                existing.touch();
                existing.clone()
            }
            None => {
                schemas.push(incoming.clone());
                incoming
            }
        };
        self.save(&schemas)?;
        info!(id = %schema.id, name = %schema.name, "imported schema");
        Ok(schema)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TuneError::InvalidInput("schema name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}
