// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware detection command

use serde::Serialize;

use super::{is_json, print_json, telemetry_provider};
use crate::cli::args::{DetectArgs, OutputFormat};
use crate::error::Result;
use crate::hardware::HardwareProfile;
use crate::schema::KeyValueStore;
use crate::tuner::Tuner;

#[derive(Serialize)]
struct DetectOutput<'a> {
    #[serde(flatten)]
    profile: &'a HardwareProfile,
    tier_description: &'static str,
}

/// Execute the detect command
pub async fn execute<S: KeyValueStore>(
    tuner: &mut Tuner<S>,
    args: &DetectArgs,
    format: &OutputFormat,
) -> Result<()> {
    let probe = telemetry_provider(args.telemetry.as_deref());
    let profile = tuner.profile(probe.as_ref()).await;

    if is_json(format) {
        return print_json(&DetectOutput {
            profile,
            tier_description: profile.tier.description(),
        });
    }

    println!("\n=== Hardware Profile ===\n");
    println!("Tier: {} ({})", profile.tier, profile.tier.description());
    if profile.fallback {
        println!("(telemetry unavailable, showing fallback defaults)");
    }
    println!(
        "CPU: {} ({} cores / {} threads @ {} MHz)",
        display_or_unknown(&profile.cpu_name),
        profile.cpu_cores,
        profile.cpu_threads,
        profile.cpu_clock_mhz
    );
    println!(
        "GPU: {} ({} MB VRAM, vendor: {})",
        display_or_unknown(&profile.gpu_name),
        profile.vram_mb,
        vendor(profile)
    );
    println!("RAM: {:.1} GB", profile.ram_gb);
    println!("Display: {} Hz", profile.refresh_hz);
    println!("Windows: {}", profile.os_major);
    println!(
        "GPU scheduling: {}",
        if profile.hw_scheduling_available {
            "available"
        } else {
            "not reported"
        }
    );
    println!(
        "Resizable BAR: {}",
        if profile.resizable_bar_available {
            "enabled"
        } else {
            "not reported"
        }
    );
    println!();
    Ok(())
}

fn display_or_unknown(name: &str) -> &str {
    if name.trim().is_empty() {
        "unknown"
    } else {
        name
    }
}

fn vendor(profile: &HardwareProfile) -> &'static str {
    if profile.is_nvidia {
        "NVIDIA"
    } else if profile.is_amd {
        "AMD"
    } else if profile.is_intel {
        "Intel"
    } else {
        "unknown"
    }
}
