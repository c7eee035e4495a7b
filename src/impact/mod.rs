// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Impact estimation model
//!
//! Sums the weights of selected settings, skipping any the host already has
//! in effect: enabling those again adds nothing.

use serde::Serialize;

use crate::catalog::{self, Values};
use crate::collab::SystemStateSnapshot;

/// Reference frame rate of a mid-range system (CS2, 1080p low)
pub const BASELINE_FPS: u32 = 250;

/// Aggregate gain estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Summed FPS % gain
    pub percent: f64,
    /// Absolute FPS gain over the baseline
    pub fps: u32,
}

/// Why a selected, weighted setting did or did not count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contribution {
    Counted,
    AlreadyApplied,
}

/// One line of an estimate breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionLine {
    pub id: &'static str,
    pub weight: f64,
    pub contribution: Contribution,
}

/// Weighted estimator with a configurable baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactModel {
    baseline_fps: u32,
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self::new(BASELINE_FPS)
    }
}

impl ImpactModel {
    /// Create a model with the given baseline frame rate
    pub fn new(baseline_fps: u32) -> Self {
        Self { baseline_fps }
    }

    /// Baseline frame rate
    pub fn baseline_fps(&self) -> u32 {
        self.baseline_fps
    }

    /// Every selected setting with a positive weight, and whether it counted
    pub fn breakdown(&self, selection: &Values, state: &SystemStateSnapshot) -> Vec<ContributionLine> {
        catalog::all()
            .iter()
            .filter(|def| def.weight > 0.0)
            .filter(|def| {
                selection
                    .get(def.id)
                    .map(|value| def.kind.is_on(value))
                    .unwrap_or(false)
            })
            .map(|def| ContributionLine {
                id: def.id,
                weight: def.weight,
                contribution: if state.is_applied(def.id) {
                    Contribution::AlreadyApplied
                } else {
                    Contribution::Counted
                },
            })
            .collect()
    }

    /// Estimate the gain of `selection` given what the host already has
    pub fn estimate(&self, selection: &Values, state: &SystemStateSnapshot) -> Estimate {
        let percent: f64 = self
            .breakdown(selection, state)
            .iter()
            .filter(|line| line.contribution == Contribution::Counted)
            .map(|line| line.weight)
            .sum();
        Estimate {
            percent,
            fps: self.fps_for(percent),
        }
    }

    /// Absolute FPS gain for a percentage
    pub fn fps_for(&self, percent: f64) -> u32 {
        (f64::from(self.baseline_fps) * percent / 100.0).round().max(0.0) as u32
    }
}

/// Estimate with the default baseline
pub fn estimate(selection: &Values, state: &SystemStateSnapshot) -> Estimate {
    ImpactModel::default().estimate(selection, state)
}
