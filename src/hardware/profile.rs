// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Raw telemetry readings and the typed hardware profile derived from them

use serde::{Deserialize, Deserializer, Serialize};

use super::tier::HardwareTier;

/// Physical cores assumed when the probe does not report them
pub const DEFAULT_CORES: u32 = 4;
/// Clock speed (MHz) assumed when unknown
pub const DEFAULT_CLOCK_MHZ: u32 = 3000;
/// VRAM (MB) assumed when unknown
pub const DEFAULT_VRAM_MB: u32 = 4096;
/// RAM (GB) assumed when unknown
pub const DEFAULT_RAM_GB: f64 = 16.0;
/// Display refresh rate (Hz) assumed when unknown
pub const DEFAULT_REFRESH_HZ: u32 = 60;
/// OS major version assumed when unknown
pub const DEFAULT_OS_MAJOR: u32 = 10;

/// First Windows build number that ships as Windows 11
const WINDOWS_11_FIRST_BUILD: f64 = 22000.0;

const NVIDIA_MARKERS: &[&str] = &["NVIDIA", "GEFORCE", "RTX", "GTX", "QUADRO"];
const AMD_MARKERS: &[&str] = &["AMD", "RADEON", "ATI "];
const INTEL_MARKERS: &[&str] = &["INTEL", "ARC", "IRIS", "UHD GRAPHICS"];

/// Whatever the telemetry probe managed to read. Every field may be missing.
///
/// Numeric fields accept JSON numbers or numeric strings, since probe
/// scripts are not consistent about either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTelemetry {
    #[serde(default)]
    pub cpu_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cpu_cores: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cpu_threads: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cpu_clock_mhz: Option<f64>,
    #[serde(default)]
    pub gpu_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gpu_vram_mb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ram_total_gb: Option<f64>,
    #[serde(default)]
    pub os_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub os_build: Option<f64>,
    /// Hardware GPU scheduling state: "ON", "OFF" or "N/A"
    #[serde(default)]
    pub hags: Option<String>,
    /// Resizable BAR aperture, e.g. "256 MB", or "N/A"
    #[serde(default)]
    pub rebar: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub refresh_rate: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Typed, immutable hardware profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub cpu_name: String,
    pub gpu_name: String,
    /// Physical cores
    pub cpu_cores: u32,
    /// Logical processors
    pub cpu_threads: u32,
    pub cpu_clock_mhz: u32,
    pub is_nvidia: bool,
    pub is_amd: bool,
    pub is_intel: bool,
    pub vram_mb: u32,
    pub ram_gb: f64,
    pub refresh_hz: u32,
    /// The OS exposes hardware-accelerated GPU scheduling (on or off)
    pub hw_scheduling_available: bool,
    /// Resizable BAR is reported by the driver
    pub resizable_bar_available: bool,
    pub os_major: u32,
    pub tier: HardwareTier,
    /// True when this is the fixed profile used without telemetry
    pub fallback: bool,
}

impl HardwareProfile {
    /// Classify a raw reading. Never fails: missing fields take conservative defaults.
    pub fn classify(raw: &RawTelemetry) -> Self {
        let cpu_cores = positive(raw.cpu_cores).unwrap_or(DEFAULT_CORES);
        let cpu_threads = positive(raw.cpu_threads).unwrap_or(cpu_cores.saturating_mul(2));
        let cpu_clock_mhz = positive(raw.cpu_clock_mhz).unwrap_or(DEFAULT_CLOCK_MHZ);
        // AdapterRAM reports 0 when the driver hides it
        let vram_mb = positive(raw.gpu_vram_mb).unwrap_or(DEFAULT_VRAM_MB);
        let ram_gb = raw
            .ram_total_gb
            .filter(|gb| gb.is_finite() && *gb > 0.0)
            .unwrap_or(DEFAULT_RAM_GB);
        let refresh_hz = positive(raw.refresh_rate).unwrap_or(DEFAULT_REFRESH_HZ);

        let gpu_name = raw.gpu_name.clone().unwrap_or_default();
        let gpu_upper = gpu_name.to_uppercase();

        let tier = HardwareTier::classify(vram_mb, cpu_cores, ram_gb);

        Self {
            cpu_name: raw.cpu_name.clone().unwrap_or_default(),
            is_nvidia: matches_any(&gpu_upper, NVIDIA_MARKERS),
            is_amd: matches_any(&gpu_upper, AMD_MARKERS),
            is_intel: matches_any(&gpu_upper, INTEL_MARKERS),
            gpu_name,
            cpu_cores,
            cpu_threads,
            cpu_clock_mhz,
            vram_mb,
            ram_gb,
            refresh_hz,
            hw_scheduling_available: raw
                .hags
                .as_deref()
                .map(|s| {
                    let s = s.trim();
                    s.eq_ignore_ascii_case("on") || s.eq_ignore_ascii_case("off")
                })
                .unwrap_or(false),
            resizable_bar_available: raw
                .rebar
                .as_deref()
                .map(|s| {
                    let s = s.trim();
                    !s.is_empty() && !s.eq_ignore_ascii_case("n/a")
                })
                .unwrap_or(false),
            os_major: os_major(raw.os_name.as_deref(), raw.os_build),
            tier,
            fallback: false,
        }
    }

    /// Fixed mid-range profile used when the probe failed entirely
    pub fn fallback() -> Self {
        Self {
            cpu_name: String::new(),
            gpu_name: String::new(),
            cpu_cores: DEFAULT_CORES,
            cpu_threads: DEFAULT_CORES * 2,
            cpu_clock_mhz: DEFAULT_CLOCK_MHZ,
            is_nvidia: false,
            is_amd: false,
            is_intel: false,
            vram_mb: DEFAULT_VRAM_MB,
            ram_gb: DEFAULT_RAM_GB,
            refresh_hz: DEFAULT_REFRESH_HZ,
            hw_scheduling_available: false,
            resizable_bar_available: false,
            os_major: DEFAULT_OS_MAJOR,
            tier: HardwareTier::MidRange,
            fallback: true,
        }
    }

    /// Build a profile from a probe outcome; `None` means the probe failed.
    pub fn from_probe(raw: Option<&RawTelemetry>) -> Self {
        match raw {
            Some(raw) => Self::classify(raw),
            None => Self::fallback(),
        }
    }
}

fn positive(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32)
}

fn matches_any(haystack_upper: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| haystack_upper.contains(m))
}

fn os_major(os_name: Option<&str>, os_build: Option<f64>) -> u32 {
    let name = os_name.unwrap_or_default().to_uppercase();
    if name.contains("WINDOWS 11") {
        return 11;
    }
    if let Some(build) = os_build.filter(|b| b.is_finite() && *b > 0.0) {
        return if build >= WINDOWS_11_FIRST_BUILD { 11 } else { 10 };
    }
    if name.contains("WINDOWS 10") {
        return 10;
    }
    DEFAULT_OS_MAJOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaming_rig() -> RawTelemetry {
        RawTelemetry {
            cpu_name: Some("AMD Ryzen 7 7800X3D 8-Core Processor".to_string()),
            cpu_cores: Some(8.0),
            cpu_threads: Some(16.0),
            cpu_clock_mhz: Some(4200.0),
            gpu_name: Some("NVIDIA GeForce RTX 4070".to_string()),
            gpu_vram_mb: Some(12282.0),
            ram_total_gb: Some(31.9),
            os_name: Some("Microsoft Windows 11 Pro".to_string()),
            os_build: Some(22631.0),
            hags: Some("ON".to_string()),
            rebar: Some("256 MB".to_string()),
            refresh_rate: Some(165.0),
        }
    }

    #[test]
    fn test_classify_full_reading() {
        let profile = HardwareProfile::classify(&gaming_rig());
        assert_eq!(profile.cpu_cores, 8);
        assert_eq!(profile.cpu_threads, 16);
        assert_eq!(profile.vram_mb, 12282);
        assert_eq!(profile.refresh_hz, 165);
        assert!(profile.is_nvidia);
        assert!(!profile.is_amd);
        assert!(!profile.is_intel);
        assert!(profile.hw_scheduling_available);
        assert!(profile.resizable_bar_available);
        assert_eq!(profile.os_major, 11);
        assert_eq!(profile.tier, HardwareTier::HighEnd);
        assert!(!profile.fallback);
    }

    #[test]
    fn test_classify_empty_reading_uses_defaults() {
        let profile = HardwareProfile::classify(&RawTelemetry::default());
        assert_eq!(profile.cpu_cores, DEFAULT_CORES);
        assert_eq!(profile.cpu_threads, DEFAULT_CORES * 2);
        assert_eq!(profile.vram_mb, DEFAULT_VRAM_MB);
        assert_eq!(profile.refresh_hz, DEFAULT_REFRESH_HZ);
        assert!((profile.ram_gb - DEFAULT_RAM_GB).abs() < f64::EPSILON);
        assert_eq!(profile.tier, HardwareTier::MidRange);
        assert!(!profile.is_nvidia && !profile.is_amd && !profile.is_intel);
        assert!(!profile.fallback);
    }

    #[test]
    fn test_zero_readings_are_treated_as_missing() {
        let raw = RawTelemetry {
            gpu_vram_mb: Some(0.0),
            refresh_rate: Some(0.0),
            cpu_cores: Some(0.0),
            ..Default::default()
        };
        let profile = HardwareProfile::classify(&raw);
        assert_eq!(profile.vram_mb, DEFAULT_VRAM_MB);
        assert_eq!(profile.refresh_hz, DEFAULT_REFRESH_HZ);
        assert_eq!(profile.cpu_cores, DEFAULT_CORES);
    }

    #[test]
    fn test_absurd_readings_saturate() {
        let raw = RawTelemetry {
            cpu_cores: Some(3.0e9),
            gpu_vram_mb: Some(1.0e30),
            refresh_rate: Some(f64::MAX),
            ..Default::default()
        };
        let profile = HardwareProfile::classify(&raw);
        assert_eq!(profile.cpu_cores, 3_000_000_000);
        assert_eq!(profile.cpu_threads, u32::MAX);
        assert_eq!(profile.vram_mb, u32::MAX);
        assert_eq!(profile.refresh_hz, u32::MAX);
    }

    #[test]
    fn test_vendor_matching_is_case_insensitive() {
        for name in ["nvidia quadro p2000", "GeForce GTX 1060", "rtx a4000"] {
            let raw = RawTelemetry {
                gpu_name: Some(name.to_string()),
                ..Default::default()
            };
            assert!(HardwareProfile::classify(&raw).is_nvidia, "{name}");
        }

        let amd = RawTelemetry {
            gpu_name: Some("AMD Radeon RX 7800 XT".to_string()),
            ..Default::default()
        };
        let profile = HardwareProfile::classify(&amd);
        assert!(profile.is_amd && !profile.is_nvidia);

        let intel = RawTelemetry {
            gpu_name: Some("Intel(R) UHD Graphics 770".to_string()),
            ..Default::default()
        };
        assert!(HardwareProfile::classify(&intel).is_intel);
    }

    #[test]
    fn test_os_major_detection() {
        assert_eq!(os_major(Some("Microsoft Windows 11 Home"), None), 11);
        assert_eq!(os_major(Some("Microsoft Windows 10 Pro"), Some(19045.0)), 10);
        assert_eq!(os_major(None, Some(22000.0)), 11);
        assert_eq!(os_major(Some("Microsoft Windows 10 Pro"), None), 10);
        assert_eq!(os_major(None, None), DEFAULT_OS_MAJOR);
    }

    #[test]
    fn test_hags_and_rebar_flags() {
        let raw = RawTelemetry {
            hags: Some("OFF".to_string()),
            rebar: Some("N/A".to_string()),
            ..Default::default()
        };
        let profile = HardwareProfile::classify(&raw);
        assert!(profile.hw_scheduling_available);
        assert!(!profile.resizable_bar_available);

        let raw = RawTelemetry {
            hags: Some("N/A".to_string()),
            ..Default::default()
        };
        assert!(!HardwareProfile::classify(&raw).hw_scheduling_available);
    }

    #[test]
    fn test_fallback_profile() {
        let profile = HardwareProfile::fallback();
        assert_eq!(profile.tier, HardwareTier::MidRange);
        assert!(profile.fallback);
        assert_eq!(HardwareProfile::from_probe(None), profile);
    }

    #[test]
    fn test_from_probe_classifies_reading() {
        let raw = gaming_rig();
        let profile = HardwareProfile::from_probe(Some(&raw));
        assert_eq!(profile, HardwareProfile::classify(&raw));
    }

    #[test]
    fn test_raw_telemetry_accepts_string_numbers() {
        let json = r#"{
            "cpu_name": "Intel Core i5-12400F",
            "cpu_cores": "6",
            "cpu_threads": 12,
            "gpu_vram_mb": "8192",
            "ram_total_gb": 15.9,
            "os_build": "22631",
            "refresh_rate": null
        }"#;
        let raw: RawTelemetry = serde_json::from_str(json).unwrap();
        assert_eq!(raw.cpu_cores, Some(6.0));
        assert_eq!(raw.cpu_threads, Some(12.0));
        assert_eq!(raw.gpu_vram_mb, Some(8192.0));
        assert_eq!(raw.os_build, Some(22631.0));
        assert_eq!(raw.refresh_rate, None);
        assert_eq!(raw.gpu_name, None);
    }

    #[test]
    fn test_raw_telemetry_ignores_garbage_numbers() {
        let raw: RawTelemetry =
            serde_json::from_str(r#"{"cpu_cores": "many", "gpu_vram_mb": [1]}"#).unwrap();
        assert_eq!(raw.cpu_cores, None);
        assert_eq!(raw.gpu_vram_mb, None);
    }
}
