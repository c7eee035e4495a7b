// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware tier classification

use serde::{Deserialize, Serialize};

/// VRAM below this (MB) forces the low-end tier
pub const LOW_END_VRAM_MB: u32 = 4096;
/// Fewer physical cores than this forces the low-end tier
pub const LOW_END_CORES: u32 = 4;
/// Less RAM than this (GB) forces the low-end tier
pub const LOW_END_RAM_GB: f64 = 8.0;

/// Minimum VRAM (MB) for the high-end tier
pub const HIGH_END_VRAM_MB: u32 = 8192;
/// Minimum physical cores for the high-end tier
pub const HIGH_END_CORES: u32 = 6;
/// Minimum RAM (GB) for the high-end tier
pub const HIGH_END_RAM_GB: f64 = 16.0;

/// Coarse hardware capability bucket
///
/// Variants are declared in ascending order so `Ord` compares capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HardwareTier {
    /// Any of: VRAM < 4 GB, fewer than 4 cores, RAM < 8 GB
    LowEnd,
    /// Everything between the two other tiers
    MidRange,
    /// All of: VRAM >= 8 GB, 6+ cores, RAM >= 16 GB
    HighEnd,
}

impl HardwareTier {
    /// Classify from the three capability axes.
    ///
    /// Low-end checks win over high-end checks, so the result is unique for
    /// every input.
    pub fn classify(vram_mb: u32, cores: u32, ram_gb: f64) -> Self {
        if vram_mb < LOW_END_VRAM_MB || cores < LOW_END_CORES || ram_gb < LOW_END_RAM_GB {
            return HardwareTier::LowEnd;
        }
        if vram_mb >= HIGH_END_VRAM_MB && cores >= HIGH_END_CORES && ram_gb >= HIGH_END_RAM_GB {
            return HardwareTier::HighEnd;
        }
        HardwareTier::MidRange
    }

    /// Get a human-readable description of this tier
    pub fn description(&self) -> &'static str {
        match self {
            HardwareTier::LowEnd => "Entry-level system (limited VRAM, cores or RAM)",
            HardwareTier::MidRange => "Mainstream gaming system",
            HardwareTier::HighEnd => "High-end gaming system",
        }
    }

    /// All tiers in ascending order
    pub fn all() -> [HardwareTier; 3] {
        [
            HardwareTier::LowEnd,
            HardwareTier::MidRange,
            HardwareTier::HighEnd,
        ]
    }
}

impl std::fmt::Display for HardwareTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardwareTier::LowEnd => write!(f, "LowEnd"),
            HardwareTier::MidRange => write!(f, "MidRange"),
            HardwareTier::HighEnd => write!(f, "HighEnd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== classify boundary tests =====

    #[test]
    fn test_low_end_boundaries_are_exclusive() {
        // Exactly at the low-end thresholds is no longer low-end
        assert_eq!(HardwareTier::classify(4096, 4, 8.0), HardwareTier::MidRange);
        assert_eq!(HardwareTier::classify(4095, 4, 8.0), HardwareTier::LowEnd);
        assert_eq!(HardwareTier::classify(4096, 3, 8.0), HardwareTier::LowEnd);
        assert_eq!(HardwareTier::classify(4096, 4, 7.9), HardwareTier::LowEnd);
    }

    #[test]
    fn test_high_end_boundaries_are_inclusive() {
        assert_eq!(HardwareTier::classify(8192, 6, 16.0), HardwareTier::HighEnd);
        assert_eq!(HardwareTier::classify(8191, 6, 16.0), HardwareTier::MidRange);
        assert_eq!(HardwareTier::classify(8192, 5, 16.0), HardwareTier::MidRange);
        assert_eq!(HardwareTier::classify(8192, 6, 15.9), HardwareTier::MidRange);
    }

    #[test]
    fn test_low_end_wins_over_high_end_axes() {
        // Huge VRAM and RAM cannot compensate for a dual-core CPU
        assert_eq!(HardwareTier::classify(24576, 2, 64.0), HardwareTier::LowEnd);
    }

    #[test]
    fn test_ordering() {
        assert!(HardwareTier::LowEnd < HardwareTier::MidRange);
        assert!(HardwareTier::MidRange < HardwareTier::HighEnd);
    }

    #[test]
    fn test_description() {
        assert!(HardwareTier::LowEnd.description().contains("Entry-level"));
        assert!(HardwareTier::HighEnd.description().contains("High-end"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HardwareTier::LowEnd), "LowEnd");
        assert_eq!(format!("{}", HardwareTier::MidRange), "MidRange");
        assert_eq!(format!("{}", HardwareTier::HighEnd), "HighEnd");
    }

    #[test]
    fn test_all_tiers_serialize_roundtrip() {
        for tier in HardwareTier::all() {
            let json = serde_json::to_string(&tier).unwrap();
            let parsed: HardwareTier = serde_json::from_str(&json).unwrap();
            assert_eq!(tier, parsed);
        }
    }
}
