// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Recommendation command

use serde::Serialize;

use super::{is_json, print_json, telemetry_provider};
use crate::catalog::{self, SettingValue};
use crate::cli::args::{OutputFormat, RecommendArgs};
use crate::error::Result;
use crate::hardware::HardwareTier;
use crate::recommend::RecommendationSet;
use crate::schema::KeyValueStore;
use crate::tuner::Tuner;

#[derive(Serialize)]
struct RecommendOutput {
    tier: HardwareTier,
    fallback: bool,
    recommendations: RecommendationSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    accepted: Option<Vec<String>>,
}

/// Execute the recommend command
pub async fn execute<S: KeyValueStore>(
    tuner: &mut Tuner<S>,
    args: &RecommendArgs,
    format: &OutputFormat,
) -> Result<()> {
    let probe = telemetry_provider(args.telemetry.as_deref());
    let recommendations = match args.category {
        Some(category) => tuner.recommend_scoped(probe.as_ref(), category).await,
        None => tuner.recommend(probe.as_ref()).await,
    };
    let accepted = if args.accept {
        Some(
            tuner
                .accept_recommendations(probe.as_ref(), args.category)
                .await?,
        )
    } else {
        None
    };
    let profile = tuner.profile(probe.as_ref()).await;

    if is_json(format) {
        return print_json(&RecommendOutput {
            tier: profile.tier,
            fallback: profile.fallback,
            recommendations,
            accepted,
        });
    }

    println!("\nRecommendations for {} hardware\n", profile.tier);
    let mut current = None;
    for def in catalog::all() {
        let Some(value) = recommendations.get(def.id) else {
            continue;
        };
        if current != Some(def.category) {
            println!("[{}]", def.category.label());
            current = Some(def.category);
        }
        let marker = if def.safety_override { " (safety)" } else { "" };
        println!("  {:<14} {:<8} {}{}", def.id, render(value), def.label, marker);
    }

    if let Some(accepted) = accepted {
        println!("\nAccepted into active schema: {} changed", accepted.len());
    }
    println!();
    Ok(())
}

pub(crate) fn render(value: &SettingValue) -> String {
    match value {
        SettingValue::Bool(true) => "on".to_string(),
        SettingValue::Bool(false) => "off".to_string(),
        SettingValue::Text(text) if text.is_empty() => "-".to_string(),
        SettingValue::Text(text) => text.clone(),
    }
}
