// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Setting values and value kinds

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A committed or recommended setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    /// Boolean payload, if this is a toggle value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Text(_) => None,
        }
    }

    /// Text payload, if this is a free-form value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Bool(_) => None,
            SettingValue::Text(s) => Some(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", if *b { "on" } else { "off" }),
            SettingValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Setting id -> value
pub type Values = BTreeMap<String, SettingValue>;

/// What kind of value a setting holds, with its default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueKind {
    Toggle { default: bool },
    Text { default: &'static str },
}

impl ValueKind {
    /// Default value as a [`SettingValue`]
    pub fn default_value(&self) -> SettingValue {
        match self {
            ValueKind::Toggle { default } => SettingValue::Bool(*default),
            ValueKind::Text { default } => SettingValue::Text((*default).to_string()),
        }
    }

    /// Whether `value` has the shape this kind expects
    pub fn accepts(&self, value: &SettingValue) -> bool {
        matches!(
            (self, value),
            (ValueKind::Toggle { .. }, SettingValue::Bool(_))
                | (ValueKind::Text { .. }, SettingValue::Text(_))
        )
    }

    /// Whether `value` counts as "turned on" for this kind.
    ///
    /// Toggles are on when `true`. Text settings are on when a non-empty value
    /// different from the default was explicitly accepted.
    pub fn is_on(&self, value: &SettingValue) -> bool {
        match (self, value) {
            (ValueKind::Toggle { .. }, SettingValue::Bool(b)) => *b,
            (ValueKind::Text { default }, SettingValue::Text(s)) => {
                let s = s.trim();
                !s.is_empty() && s != *default
            }
            _ => false,
        }
    }
}
