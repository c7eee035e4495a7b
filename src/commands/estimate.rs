// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Impact estimate command

use serde::Serialize;

use super::{is_json, print_json};
use crate::cli::args::{EstimateArgs, OutputFormat};
use crate::collab::{StaticStateChecker, SystemStateSnapshot};
use crate::error::Result;
use crate::impact::{Contribution, ContributionLine, Estimate};
use crate::schema::KeyValueStore;
use crate::tuner::Tuner;

#[derive(Serialize)]
struct EstimateOutput {
    schema: String,
    baseline_fps: u32,
    #[serde(flatten)]
    estimate: Estimate,
    breakdown: Vec<ContributionLine>,
}

/// Execute the estimate command
pub async fn execute<S: KeyValueStore>(
    tuner: &mut Tuner<S>,
    args: &EstimateArgs,
    format: &OutputFormat,
) -> Result<()> {
    let schema = match &args.schema {
        Some(key) => tuner.store_mut().resolve(key)?,
        None => tuner.store_mut().ensure_active()?,
    };

    let state = match &args.state {
        Some(path) => {
            let checker = StaticStateChecker::from_file(path)?;
            tuner.check_state(&checker, &schema.values).await
        }
        None => SystemStateSnapshot::new(),
    };

    let estimate = tuner.estimate(&schema.values, &state);
    let breakdown = tuner.breakdown(&schema.values, &state);

    if is_json(format) {
        return print_json(&EstimateOutput {
            schema: schema.name,
            baseline_fps: tuner.model().baseline_fps(),
            estimate,
            breakdown,
        });
    }

    println!("\nSchema: {}", schema.name);
    println!(
        "Estimated gain: +{:.1}% (~+{} FPS over {} FPS)",
        estimate.percent,
        estimate.fps,
        tuner.model().baseline_fps()
    );

    if args.detailed {
        println!();
        for line in &breakdown {
            let note = match line.contribution {
                Contribution::Counted => "",
                Contribution::AlreadyApplied => " (already applied)",
            };
            println!("  {:<14} {:>5.1}%{}", line.id, line.weight, note);
        }
    }
    println!();
    Ok(())
}
