// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Setting catalog
//!
//! The static table of every tunable setting: id, category, value kind,
//! impact weight and recommendation rule.

pub mod category;
pub mod definitions;
pub mod rule;
pub mod value;

pub use category::Category;
pub use definitions::{SettingDefinition, SETTINGS};
pub use rule::{frame_cap, Predicate, Rule, ValueRule};
pub use value::{SettingValue, ValueKind, Values};

/// All catalog settings in display order
pub fn all() -> &'static [SettingDefinition] {
    SETTINGS
}

/// Look up a setting by id
pub fn find(id: &str) -> Option<&'static SettingDefinition> {
    SETTINGS.iter().find(|def| def.id == id)
}

/// Settings of one category, in display order
pub fn by_category(category: Category) -> impl Iterator<Item = &'static SettingDefinition> {
    SETTINGS.iter().filter(move |def| def.category == category)
}

/// Catalog values for every setting
pub fn default_values() -> Values {
    SETTINGS
        .iter()
        .map(|def| (def.id.to_string(), def.kind.default_value()))
        .collect()
}
