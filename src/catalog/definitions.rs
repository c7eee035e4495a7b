// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The static setting table
//!
//! Weights are FPS % gains on a mid-range system, averaged from community
//! benchmarks. Latency-only and maintenance settings carry 0.

use serde::Serialize;

use super::category::Category;
use super::rule::{Predicate, Rule, ValueRule};
use super::value::ValueKind;
use crate::hardware::HardwareTier;

/// One tunable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettingDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub kind: ValueKind,
    /// Non-negative FPS % contribution
    pub weight: f64,
    pub rule: Rule,
    /// Never recommended `true`: trades performance for security or stability
    pub safety_override: bool,
    /// Placed in the Principal bucket of a default layout
    pub principal: bool,
}

impl SettingDefinition {
    const fn toggle(
        id: &'static str,
        label: &'static str,
        category: Category,
        default: bool,
        weight: f64,
        rule: Rule,
    ) -> Self {
        Self {
            id,
            label,
            category,
            kind: ValueKind::Toggle { default },
            weight,
            rule,
            safety_override: false,
            principal: false,
        }
    }

    const fn text(
        id: &'static str,
        label: &'static str,
        category: Category,
        default: &'static str,
        rule: Rule,
    ) -> Self {
        Self {
            id,
            label,
            category,
            kind: ValueKind::Text { default },
            weight: 0.0,
            rule,
            safety_override: false,
            principal: false,
        }
    }

    const fn principal(mut self) -> Self {
        self.principal = true;
        self
    }

    const fn safety(mut self) -> Self {
        self.safety_override = true;
        self
    }
}

use Category::*;

const ALWAYS: Rule = Rule::When(Predicate::Always);
const NVIDIA: Rule = Rule::When(Predicate::IsNvidia);
const NEVER: Rule = Rule::Constant(false);
const DEDICATED_GPU: Predicate = Predicate::AnyOf(&[Predicate::IsNvidia, Predicate::IsAmd]);
const BELOW_HIGH_END: Predicate = Predicate::Not(&Predicate::TierAtLeast(HardwareTier::HighEnd));

const fn t(
    id: &'static str,
    label: &'static str,
    category: Category,
    default: bool,
    weight: f64,
    rule: Rule,
) -> SettingDefinition {
    SettingDefinition::toggle(id, label, category, default, weight, rule)
}

const fn v(
    id: &'static str,
    label: &'static str,
    category: Category,
    default: &'static str,
    rule: Rule,
) -> SettingDefinition {
    SettingDefinition::text(id, label, category, default, rule)
}

/// Every tunable setting
pub static SETTINGS: &[SettingDefinition] = &[
    // BIOS: shown as guidance only
    t("b_svm", "Disable SVM / Virtualization", Bios, false, 0.0, Rule::Manual),
    t("b_cst", "Disable C-States", Bios, false, 0.0, Rule::Manual),
    t("b_cool", "Disable Cool'n'Quiet / SpeedStep", Bios, false, 0.0, Rule::Manual),
    t("b_xmp", "Enable XMP/DOCP", Bios, false, 0.0, Rule::Manual),
    t("b_rbar", "Enable Resizable BAR", Bios, false, 0.0, Rule::Manual),
    t("b_4g", "Enable Above 4G Decoding", Bios, false, 0.0, Rule::Manual),
    // Windows
    t("w_power", "Ultimate Performance Plan", Windows, true, 3.0, ALWAYS).principal(),
    t("w_dvr", "Disable Game DVR", Windows, true, 2.5, ALWAYS).principal(),
    t("w_bar", "Disable Game Bar", Windows, true, 1.0, ALWAYS),
    t("w_mode", "Disable Game Mode", Windows, true, 1.0, ALWAYS),
    t("w_hib", "Disable Hibernation", Windows, true, 0.5, ALWAYS),
    t("w_mouse", "Disable Mouse Accel", Windows, true, 0.0, ALWAYS),
    t("w_fso", "Disable Fullscreen Optim", Windows, true, 2.0, ALWAYS).principal(),
    t("w_vis", "Disable Visual Effects", Windows, true, 0.5, ALWAYS),
    t("w_trans", "Disable Transparency", Windows, true, 0.5, ALWAYS),
    t("w_bgapps", "Disable Background Apps", Windows, true, 2.0, ALWAYS),
    t("w_notif", "Disable Notifications", Windows, true, 0.5, ALWAYS),
    t("w_cort", "Disable Cortana", Windows, true, 0.5, ALWAYS),
    t("w_idx", "Disable Search Indexing", Windows, false, 1.5, Rule::When(BELOW_HIGH_END)),
    t(
        "w_hgs",
        "Hardware GPU Scheduling",
        Windows,
        true,
        2.0,
        Rule::When(Predicate::AllOf(&[Predicate::IsNvidia, Predicate::MinVramMb(6144)])),
    )
    .principal(),
    t("w_hpet", "Disable HPET", Windows, true, 3.0, ALWAYS).principal(),
    t("w_pthrot", "Disable Power Throttling", Windows, true, 1.0, ALWAYS),
    t("w_park", "Disable Core Parking", Windows, true, 1.5, Rule::When(Predicate::MinCores(4))),
    t("w_temp", "Clean Temp Files", Windows, false, 0.0, NEVER),
    t("w_cs2gpu", "CS2: High Perf GPU", Windows, true, 1.0, Rule::When(DEDICATED_GPU)),
    t("w_deliver", "Disable Delivery Optim", Windows, true, 1.0, ALWAYS),
    t("w_widgets", "Disable Widgets (Win11)", Windows, false, 0.5, Rule::When(Predicate::MinOsMajor(11))),
    t("w_memcomp", "Disable Memory Compress", Windows, false, 1.0, Rule::When(Predicate::MinRamGb(16))),
    t("w_uxuser", "Disable Connected UX", Windows, true, 0.5, ALWAYS),
    t("w_spectre", "Disable CPU Mitigations", Windows, false, 8.0, ALWAYS).safety(),
    t("w_lastaccess", "Disable NTFS Last Access", Windows, true, 0.5, ALWAYS),
    t("w_8dot3", "Disable 8.3 Name Creation", Windows, true, 0.5, ALWAYS),
    t("w_mmcss", "MMCSS Gaming Priority", Windows, true, 1.5, ALWAYS),
    t("w_largecache", "Disable Large System Cache", Windows, true, 1.0, ALWAYS),
    // Network: latency, mostly no FPS effect
    t("n_nagle", "Disable Nagle (TcpNoDelay)", Network, true, 0.0, ALWAYS).principal(),
    t("n_tcp", "Optimize TCP stack", Network, true, 0.0, ALWAYS),
    t("n_dns", "Flush DNS", Network, true, 0.0, ALWAYS),
    t("n_wifi", "Disable Wi-Fi Power Save", Network, false, 0.0, NEVER),
    t("n_throttle", "Disable Network Throttle", Network, true, 1.0, ALWAYS),
    t("n_ecn", "Disable ECN Capability", Network, true, 0.0, ALWAYS),
    t("n_rss", "Enable RSS (Recv Scaling)", Network, true, 0.0, Rule::When(Predicate::MinCores(4))),
    t("n_netbios", "Disable NetBIOS over TCP", Network, true, 0.0, ALWAYS),
    t("n_lmhosts", "Disable LMHOSTS Lookup", Network, true, 0.0, ALWAYS),
    t("n_ctcp", "Enable CTCP Congestion", Network, true, 0.0, ALWAYS),
    // NVIDIA driver profile
    t("nv_perf", "Max Performance Mode", Nvidia, true, 3.0, NVIDIA).principal(),
    t("nv_vsync", "Disable V-Sync global", Nvidia, true, 2.0, NVIDIA),
    t("nv_lat", "Ultra Low Latency", Nvidia, true, 1.5, NVIDIA).principal(),
    t("nv_thread", "Threaded Optimization", Nvidia, true, 1.5, NVIDIA),
    t("nv_aniso", "AF: App-controlled", Nvidia, false, 0.5, NVIDIA),
    t("nv_shader", "Clear Shader Cache", Nvidia, false, 0.0, NEVER),
    t("nv_reflex", "Force Reflex On+Boost", Nvidia, true, 1.5, NVIDIA),
    t("nv_sharp", "Disable Image Sharpening", Nvidia, false, 0.5, NVIDIA),
    t("nv_texfilt", "Texture Filtering: Perf", Nvidia, true, 0.5, NVIDIA),
    t("nv_prerender", "Pre-Rendered Frames = 1", Nvidia, true, 1.0, NVIDIA),
    t("nv_ambient", "Disable Ambient Occlusion", Nvidia, true, 1.0, NVIDIA),
    t("nv_fxaa", "Disable Global FXAA", Nvidia, true, 0.5, NVIDIA),
    // Background services
    t("s_sys", "SysMain (Superfetch)", Services, true, 1.5, ALWAYS),
    t("s_diag", "DiagTrack (Telemetry)", Services, true, 0.5, ALWAYS),
    t("s_ws", "Windows Search", Services, false, 1.0, Rule::When(BELOW_HIGH_END)),
    t("s_print", "Print Spooler", Services, false, 0.0, NEVER),
    t("s_fax", "Fax", Services, true, 0.0, ALWAYS),
    t("s_xbox", "Xbox Services (all)", Services, true, 0.5, ALWAYS),
    t("s_cdp", "Connected Devices Platform", Services, true, 0.5, ALWAYS),
    t("s_wpn", "WpnUserService (Push)", Services, true, 0.5, ALWAYS),
    t("s_diagpol", "Diagnostic Policy", Services, false, 0.5, NEVER),
    t("s_remote", "Remote Registry", Services, true, 0.0, ALWAYS),
    t("s_maps", "MapsBroker", Services, true, 0.5, ALWAYS),
    t("s_phonesvc", "Phone Service", Services, true, 0.0, ALWAYS),
    t("s_retaildemo", "RetailDemo Service", Services, true, 0.0, ALWAYS),
    // autoexec.cfg console commands
    t("ae_on", "Generate autoexec.cfg", Autoexec, true, 0.0, ALWAYS),
    v("ae_fps", "fps_max", Autoexec, "400", Rule::Value(ValueRule::FrameCap)).principal(),
    v("ae_rate", "rate", Autoexec, "786432", Rule::Value(ValueRule::Fixed("786432"))),
    v("ae_int", "cl_interp", Autoexec, "0", Rule::Value(ValueRule::Fixed("0"))),
    v("ae_ir", "cl_interp_ratio", Autoexec, "1", Rule::Value(ValueRule::Fixed("1"))),
    v("ae_ur", "cl_updaterate", Autoexec, "128", Rule::Value(ValueRule::Fixed("128"))),
    v("ae_cr", "cl_cmdrate", Autoexec, "128", Rule::Value(ValueRule::Fixed("128"))),
    t("ae_raw", "m_rawinput 1", Autoexec, true, 0.0, ALWAYS),
    v("ae_custom", "Custom commands", Autoexec, "", Rule::Manual),
    // Launch options
    t("lo_exec", "+exec autoexec.cfg", LaunchOptions, true, 0.0, ALWAYS),
    t("lo_nvid", "-novid", LaunchOptions, true, 0.0, ALWAYS),
    t("lo_joy", "-nojoy", LaunchOptions, true, 0.5, ALWAYS),
    t("lo_high", "-high", LaunchOptions, true, 2.0, ALWAYS).principal(),
    t("lo_allow", "-allow_third_party_software", LaunchOptions, false, 0.0, NEVER),
    v("lo_thr", "-threads", LaunchOptions, "", Rule::Value(ValueRule::LogicalThreads)),
    v("lo_custom", "Custom arguments", LaunchOptions, "", Rule::Manual),
    // Extras
    t("x_faceit", "FACEIT Anti-Cheat status", Extras, false, 0.0, Rule::Manual),
    t("x_steam", "Disable Steam Overlay", Extras, true, 1.5, ALWAYS),
    t("x_disc", "Disable Discord Overlay", Extras, true, 1.0, ALWAYS),
    t("x_resp", "SystemResponsiveness = 0", Extras, true, 2.0, ALWAYS).principal(),
    t("x_gpup", "GPU Priority for games", Extras, true, 1.0, ALWAYS),
    t("x_prio", "PrioritySeparation tuned", Extras, true, 1.5, ALWAYS),
    t("x_cs2p", "CS2: High Process Priority", Extras, true, 1.5, ALWAYS),
    t("x_telem", "Disable Telemetry Tasks", Extras, true, 0.5, ALWAYS),
    t("x_timer", "Timer Resolution 0.5ms", Extras, false, 1.0, ALWAYS),
    t("x_msimode", "MSI Mode for GPU", Extras, false, 1.5, Rule::When(DEDICATED_GPU)).safety(),
    t("x_pcie", "PCIe Link State Off", Extras, true, 1.0, ALWAYS),
    t("x_ndis", "Interrupt Moderation Off", Extras, false, 0.5, Rule::When(Predicate::MinCores(6))),
    t("x_large", "Enable Large Pages", Extras, false, 1.0, Rule::When(Predicate::MinRamGb(16))),
];
