// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Bring older settings layouts up to date before deserializing.
///
/// Early files kept `baseline_fps` at the top level; it now lives under
/// `estimate`. A value already present under `estimate` wins.
pub(super) fn migrate_on_load(value: Value) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    if let Some(flat) = map.remove("baseline_fps") {
        let estimate = map
            .entry("estimate")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(estimate) = estimate {
            estimate.entry("baseline_fps").or_insert(flat);
        }
    }
    Value::Object(map)
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
