// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Schema persistence
//!
//! A schema is a named bundle of committed values plus the view layout that
//! splits settings between the Principal bucket and per-category Secondary
//! buckets. Every visible id sits in exactly one bucket.

pub mod kv;
pub mod legacy;
pub mod store;
pub mod types;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use legacy::{legacy_values, LEGACY_KEY, MIGRATED_KEY};
pub use store::{SchemaStore, ACTIVE_KEY, SCHEMAS_KEY};
pub use types::{
    default_layout, BucketKey, CustomEntry, Layout, Schema, CUSTOM_ID_PREFIX, DEFAULT_SCHEMA_NAME,
};
