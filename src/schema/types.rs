// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Schema records and view layout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use uuid::Uuid;

use crate::catalog::{self, Category, SettingValue, Values};
use crate::error::TuneError;

/// Name given to the schema created when the store is empty
pub const DEFAULT_SCHEMA_NAME: &str = "Default";

/// Prefix of ad-hoc ids defined by the user
pub const CUSTOM_ID_PREFIX: &str = "custom_";

/// A named region of a schema's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BucketKey {
    /// Quick-access view
    Principal,
    /// Detailed view of one category
    Secondary(Category),
}

impl BucketKey {
    /// Whether this is the Principal bucket
    pub fn is_principal(&self) -> bool {
        matches!(self, BucketKey::Principal)
    }

    /// Category of a Secondary bucket
    pub fn category(&self) -> Option<Category> {
        match self {
            BucketKey::Principal => None,
            BucketKey::Secondary(category) => Some(*category),
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKey::Principal => f.write_str("principal"),
            BucketKey::Secondary(category) => write!(f, "secondary:{}", category.as_str()),
        }
    }
}

impl FromStr for BucketKey {
    type Err = TuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("principal") {
            return Ok(BucketKey::Principal);
        }
        // "secondary:windows", or just the category name
        let category = s.strip_prefix("secondary:").unwrap_or(s);
        Ok(BucketKey::Secondary(category.parse()?))
    }
}

impl From<BucketKey> for String {
    fn from(key: BucketKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for BucketKey {
    type Error = TuneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bucket -> ordered setting ids
pub type Layout = BTreeMap<BucketKey, Vec<String>>;

/// Build the layout every new schema starts with.
///
/// Principal-flagged settings go to the Principal bucket; everything else is
/// filed under its category's Secondary bucket, in catalog order.
pub fn default_layout() -> Layout {
    let mut layout = Layout::new();
    layout.insert(BucketKey::Principal, Vec::new());
    for def in catalog::all() {
        let key = if def.principal {
            BucketKey::Principal
        } else {
            BucketKey::Secondary(def.category)
        };
        layout.entry(key).or_default().push(def.id.to_string());
    }
    layout
}

/// A user-defined entry that is not part of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    pub label: String,
    pub category: Category,
    pub value: SettingValue,
}

/// A named, persisted bundle of values and view layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub layout: Layout,
    #[serde(default)]
    pub values: Values,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, CustomEntry>,
}

impl Schema {
    /// Create a schema with the default layout and no values
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            layout: default_layout(),
            values: Values::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Ordered ids of one bucket; empty if the bucket does not exist
    pub fn bucket(&self, key: BucketKey) -> &[String] {
        self.layout.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bucket holding `id`, if it is visible
    pub fn bucket_of(&self, id: &str) -> Option<BucketKey> {
        self.layout
            .iter()
            .find(|(_, ids)| ids.iter().any(|i| i == id))
            .map(|(key, _)| *key)
    }

    /// Whether `id` is a catalog setting or one of this schema's custom entries
    pub fn knows(&self, id: &str) -> bool {
        catalog::find(id).is_some() || self.custom.contains_key(id)
    }

    /// Fixed category of a catalog or custom id
    pub fn category_of(&self, id: &str) -> Option<Category> {
        catalog::find(id)
            .map(|def| def.category)
            .or_else(|| self.custom.get(id).map(|entry| entry.category))
    }

    /// Display label of a catalog or custom id
    pub fn label_of(&self, id: &str) -> Option<&str> {
        catalog::find(id)
            .map(|def| def.label)
            .or_else(|| self.custom.get(id).map(|entry| entry.label.as_str()))
    }

    /// Every known id that is absent from the layout
    pub fn hidden_ids(&self) -> Vec<String> {
        let visible: HashSet<&str> = self.layout.values().flatten().map(String::as_str).collect();
        catalog::all()
            .iter()
            .map(|def| def.id)
            .chain(self.custom.keys().map(String::as_str))
            .filter(|id| !visible.contains(id))
            .map(str::to_string)
            .collect()
    }

    /// Whether every visible id is known and appears in exactly one bucket
    pub fn layout_is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        self.layout
            .values()
            .flatten()
            .all(|id| self.knows(id) && seen.insert(id.as_str()))
    }

    /// Drop unknown ids and every repeat of an id after its first appearance.
    /// Returns how many entries were removed.
    pub fn repair_layout(&mut self) -> usize {
        let known: HashSet<String> = catalog::all()
            .iter()
            .map(|def| def.id.to_string())
            .chain(self.custom.keys().cloned())
            .collect();
        let mut seen = HashSet::new();
        let mut removed = 0;
        for ids in self.layout.values_mut() {
            let before = ids.len();
            ids.retain(|id| known.contains(id) && seen.insert(id.clone()));
            removed += before - ids.len();
        }
        removed
    }

    /// Check that `ids` can replace bucket `key` without duplicating or
    /// orphaning anything. Returns the reason when it cannot.
    pub fn check_bucket_replacement(&self, key: BucketKey, ids: &[String]) -> Option<String> {
        let mut seen = HashSet::new();
        for id in ids {
            if !self.knows(id) {
                return Some(format!("unknown setting {}", id));
            }
            if !seen.insert(id.as_str()) {
                return Some(format!("{} listed twice", id));
            }
            if let Some(other) = self.bucket_of(id) {
                if other != key {
                    return Some(format!("{} is already visible in {}", id, other));
                }
            }
        }
        None
    }
}
