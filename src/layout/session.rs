// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Layout edit session state machine

use std::collections::HashSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{self, Category, SettingValue, Values};
use crate::error::Result;
use crate::schema::{BucketKey, KeyValueStore, SchemaStore};

/// Category given to custom entries created while editing the Principal bucket
pub const PRINCIPAL_CUSTOM_CATEGORY: Category = Category::Extras;

/// Answer to a request to leave the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allowed,
    /// An edit session is open and must be saved or cancelled first
    Blocked,
}

/// One bucket detached from the store while it is being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub schema_id: Uuid,
    pub bucket: BucketKey,
    /// Bucket contents when the session started
    pub snapshot: Vec<String>,
    /// Uncommitted contents
    pub working: Vec<String>,
    /// Custom entries defined during the session; deleted again on cancel
    pub created: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(EditSession),
}

/// Holds at most one edit session
#[derive(Debug, Default)]
pub struct LayoutEditor {
    state: EditState,
}

impl LayoutEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditState::Editing(session) => Some(session),
            EditState::Viewing => None,
        }
    }

    fn session_mut(&mut self, op: &str) -> Option<&mut EditSession> {
        match &mut self.state {
            EditState::Editing(session) => Some(session),
            EditState::Viewing => {
                debug!(op, "ignored: no edit session");
                None
            }
        }
    }

    /// Start editing `bucket` of the given schema, or of the active schema.
    ///
    /// The active pointer is resolved first either way, so a store without
    /// one gets its Default schema. Returns `Ok(false)` if a session is
    /// already open.
    pub fn enter<S: KeyValueStore>(
        &mut self,
        store: &mut SchemaStore<S>,
        schema_id: Option<Uuid>,
        bucket: BucketKey,
    ) -> Result<bool> {
        if self.is_editing() {
            debug!("ignored: edit session already open");
            return Ok(false);
        }
        let active = store.ensure_active()?;
        let schema = match schema_id {
            Some(id) if id != active.id => store.get(id)?,
            _ => active,
        };
        let snapshot = schema.bucket(bucket).to_vec();
        info!(schema = %schema.id, %bucket, items = snapshot.len(), "entered layout edit");
        self.state = EditState::Editing(EditSession {
            schema_id: schema.id,
            bucket,
            working: snapshot.clone(),
            snapshot,
            created: Vec::new(),
        });
        Ok(true)
    }

    /// Move the item at `from` so it ends up at `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let Some(session) = self.session_mut("move") else {
            return false;
        };
        let len = session.working.len();
        if from >= len || to >= len {
            return false;
        }
        let id = session.working.remove(from);
        session.working.insert(to, id);
        true
    }

    /// Replace the working order. `ids` must be a permutation of it.
    pub fn reorder(&mut self, ids: Vec<String>) -> bool {
        let Some(session) = self.session_mut("reorder") else {
            return false;
        };
        let mut expected = session.working.clone();
        let mut given = ids.clone();
        expected.sort();
        given.sort();
        if expected != given {
            warn!("rejected reorder: not a permutation of the bucket");
            return false;
        }
        session.working = ids;
        true
    }

    /// Hide an id from the bucket
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(session) = self.session_mut("remove") else {
            return false;
        };
        let before = session.working.len();
        session.working.retain(|i| i != id);
        session.working.len() != before
    }

    /// Ids that may be inserted into the bucket: ids of the bucket's category
    /// (any category for Principal) that are in no other bucket and not in the
    /// working list.
    pub fn addable<S: KeyValueStore>(&self, store: &mut SchemaStore<S>) -> Result<Vec<String>> {
        let Some(session) = self.session() else {
            return Ok(Vec::new());
        };
        let schema = store.get(session.schema_id)?;
        let category = session.bucket.category();

        let taken: HashSet<&str> = schema
            .layout
            .iter()
            .filter(|(key, _)| **key != session.bucket)
            .flat_map(|(_, ids)| ids.iter())
            .chain(session.working.iter())
            .map(String::as_str)
            .collect();

        let catalog_ids = catalog::all()
            .iter()
            .filter(|def| category.map_or(true, |c| def.category == c))
            .map(|def| def.id.to_string());
        let custom_ids = schema
            .custom
            .iter()
            .filter(|(_, entry)| category.map_or(true, |c| entry.category == c))
            .map(|(id, _)| id.clone());

        Ok(catalog_ids
            .chain(custom_ids)
            .filter(|id| !taken.contains(id.as_str()))
            .collect())
    }

    /// Insert an addable id at `position` (end of the list if `None` or past it)
    pub fn insert<S: KeyValueStore>(
        &mut self,
        store: &mut SchemaStore<S>,
        id: &str,
        position: Option<usize>,
    ) -> Result<bool> {
        if !self.is_editing() {
            debug!("ignored: no edit session");
            return Ok(false);
        }
        if !self.addable(store)?.iter().any(|i| i == id) {
            warn!(id, "rejected insert: id is not addable here");
            return Ok(false);
        }
        let Some(session) = self.session_mut("insert") else {
            return Ok(false);
        };
        let at = position
            .unwrap_or(session.working.len())
            .min(session.working.len());
        session.working.insert(at, id.to_string());
        Ok(true)
    }

    /// Define an ad-hoc entry on the schema and append it to the bucket.
    ///
    /// Returns the new id, or `None` when no session is open.
    pub fn add_custom<S: KeyValueStore>(
        &mut self,
        store: &mut SchemaStore<S>,
        label: &str,
        value: SettingValue,
    ) -> Result<Option<String>> {
        let Some(session) = self.session_mut("add_custom") else {
            return Ok(None);
        };
        let category = session
            .bucket
            .category()
            .unwrap_or(PRINCIPAL_CUSTOM_CATEGORY);
        let id = store.add_custom(session.schema_id, label, category, value)?;
        session.working.push(id.clone());
        session.created.push(id.clone());
        Ok(Some(id))
    }

    /// Commit the working list and values, then return to viewing.
    ///
    /// Ids that were starred into another bucket during the session are
    /// dropped from the working list first. Returns `Ok(false)` when no
    /// session is open or the store rejected the layout.
    pub fn save<S: KeyValueStore>(
        &mut self,
        store: &mut SchemaStore<S>,
        values: &Values,
    ) -> Result<bool> {
        let EditState::Editing(session) = std::mem::take(&mut self.state) else {
            debug!("ignored: save without edit session");
            return Ok(false);
        };
        let schema = store.get(session.schema_id)?;
        let working: Vec<String> = session
            .working
            .into_iter()
            .filter(|id| match schema.bucket_of(id) {
                Some(other) => other == session.bucket,
                None => schema.knows(id),
            })
            .collect();

        let accepted = store.set_layout_bucket(session.schema_id, session.bucket, &working)?;
        store.save_values(session.schema_id, values)?;
        info!(schema = %session.schema_id, bucket = %session.bucket, accepted, "saved layout edit");
        Ok(accepted)
    }

    /// Discard the working list and any custom entries defined meanwhile,
    /// commit values, then return to viewing
    pub fn cancel<S: KeyValueStore>(
        &mut self,
        store: &mut SchemaStore<S>,
        values: &Values,
    ) -> Result<bool> {
        let EditState::Editing(session) = std::mem::take(&mut self.state) else {
            debug!("ignored: cancel without edit session");
            return Ok(false);
        };
        let discarded = store.remove_custom(session.schema_id, &session.created)?;
        let values: Values = values
            .iter()
            .filter(|(key, _)| !session.created.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        store.save_values(session.schema_id, &values)?;
        info!(schema = %session.schema_id, bucket = %session.bucket, discarded, "cancelled layout edit");
        Ok(true)
    }

    /// Whether the caller may switch views
    pub fn request_navigation(&self) -> Navigation {
        if self.is_editing() {
            Navigation::Blocked
        } else {
            Navigation::Allowed
        }
    }
}
