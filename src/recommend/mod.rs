// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Recommendation rule engine
//!
//! Evaluates every catalog rule against a hardware profile. Pure: no
//! persistence, no side effects.

use std::collections::BTreeMap;

use crate::catalog::{self, Category, SettingDefinition, SettingValue, Values};
use crate::hardware::HardwareProfile;

/// Setting id -> recommended value
pub type RecommendationSet = BTreeMap<String, SettingValue>;

/// Recommended value for one setting, with the safety override applied.
/// `None` for manual settings.
pub fn recommend_one(def: &SettingDefinition, profile: &HardwareProfile) -> Option<SettingValue> {
    let candidate = def.rule.evaluate(profile)?;
    if def.safety_override {
        return Some(SettingValue::Bool(false));
    }
    Some(candidate)
}

/// Full recommendation set for a profile
pub fn recommend(profile: &HardwareProfile) -> RecommendationSet {
    recommend_where(profile, |_| true)
}

/// Recommendations restricted to ids starting with `prefix`
pub fn recommend_for_prefix(profile: &HardwareProfile, prefix: &str) -> RecommendationSet {
    recommend_where(profile, |def| def.id.starts_with(prefix))
}

/// Recommendations for one category
pub fn recommend_scoped(profile: &HardwareProfile, category: Category) -> RecommendationSet {
    recommend_for_prefix(profile, category.prefix())
}

fn recommend_where<F>(profile: &HardwareProfile, include: F) -> RecommendationSet
where
    F: Fn(&SettingDefinition) -> bool,
{
    catalog::all()
        .iter()
        .filter(|def| include(def))
        .filter_map(|def| recommend_one(def, profile).map(|value| (def.id.to_string(), value)))
        .collect()
}

/// Merge a recommendation set into a value snapshot.
///
/// Returns the ids whose value changed, in id order.
pub fn accept(values: &mut Values, recommendations: &RecommendationSet) -> Vec<String> {
    let mut changed = Vec::new();
    for (id, value) in recommendations {
        if values.get(id) != Some(value) {
            values.insert(id.clone(), value.clone());
            changed.push(id.clone());
        }
    }
    changed
}
