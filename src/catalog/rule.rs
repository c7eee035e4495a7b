// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Recommendation rules
//!
//! Rules are plain data rather than closures so the catalog can be listed,
//! serialized and tested without the engine.

use serde::Serialize;

use super::value::SettingValue;
use crate::hardware::{HardwareProfile, HardwareTier};

/// Highest frame cap the frame-cap rule will produce
pub const MAX_FRAME_CAP: u32 = 999;
/// Refresh rate from which the frame cap is lifted entirely
pub const UNCAPPED_REFRESH_HZ: u32 = 240;

/// Boolean condition over a hardware profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Predicate {
    Always,
    IsNvidia,
    IsAmd,
    IsIntel,
    MinVramMb(u32),
    MinRamGb(u32),
    MinCores(u32),
    MinThreads(u32),
    MinOsMajor(u32),
    HwScheduling,
    ResizableBar,
    TierAtLeast(HardwareTier),
    AllOf(&'static [Predicate]),
    AnyOf(&'static [Predicate]),
    Not(&'static Predicate),
}

impl Predicate {
    /// Evaluate against a profile
    pub fn holds(&self, profile: &HardwareProfile) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::IsNvidia => profile.is_nvidia,
            Predicate::IsAmd => profile.is_amd,
            Predicate::IsIntel => profile.is_intel,
            Predicate::MinVramMb(mb) => profile.vram_mb >= *mb,
            Predicate::MinRamGb(gb) => profile.ram_gb >= f64::from(*gb),
            Predicate::MinCores(n) => profile.cpu_cores >= *n,
            Predicate::MinThreads(n) => profile.cpu_threads >= *n,
            Predicate::MinOsMajor(v) => profile.os_major >= *v,
            Predicate::HwScheduling => profile.hw_scheduling_available,
            Predicate::ResizableBar => profile.resizable_bar_available,
            Predicate::TierAtLeast(tier) => profile.tier >= *tier,
            Predicate::AllOf(preds) => preds.iter().all(|p| p.holds(profile)),
            Predicate::AnyOf(preds) => preds.iter().any(|p| p.holds(profile)),
            Predicate::Not(pred) => !pred.holds(profile),
        }
    }
}

/// Value-producing rule for text settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "fn", content = "arg", rename_all = "snake_case")]
pub enum ValueRule {
    /// "0" (uncapped) from 240 Hz, otherwise twice the refresh rate capped at 999
    FrameCap,
    /// The profile's logical processor count
    LogicalThreads,
    /// A constant value
    Fixed(&'static str),
}

impl ValueRule {
    /// Produce the value for a profile
    pub fn produce(&self, profile: &HardwareProfile) -> String {
        match self {
            ValueRule::FrameCap => frame_cap(profile.refresh_hz).to_string(),
            ValueRule::LogicalThreads => profile.cpu_threads.to_string(),
            ValueRule::Fixed(value) => (*value).to_string(),
        }
    }
}

/// Frame cap for a refresh rate; 0 means uncapped
pub fn frame_cap(refresh_hz: u32) -> u32 {
    if refresh_hz >= UNCAPPED_REFRESH_HZ {
        0
    } else {
        refresh_hz.saturating_mul(2).min(MAX_FRAME_CAP)
    }
}

/// How a setting's recommended value is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", content = "arg", rename_all = "snake_case")]
pub enum Rule {
    Constant(bool),
    When(Predicate),
    Value(ValueRule),
    /// Informational or hand-applied only; never part of a recommendation set
    Manual,
}

impl Rule {
    /// Evaluate the rule. `None` for manual settings.
    pub fn evaluate(&self, profile: &HardwareProfile) -> Option<SettingValue> {
        match self {
            Rule::Constant(value) => Some(SettingValue::Bool(*value)),
            Rule::When(predicate) => Some(SettingValue::Bool(predicate.holds(profile))),
            Rule::Value(rule) => Some(SettingValue::Text(rule.produce(profile))),
            Rule::Manual => None,
        }
    }

    /// Whether the rule is excluded from recommendation
    pub fn is_manual(&self) -> bool {
        matches!(self, Rule::Manual)
    }
}
