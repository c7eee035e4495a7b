// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Explicit cache for the classified hardware profile

use super::profile::HardwareProfile;

/// Holds the profile computed on first use until explicitly invalidated
#[derive(Debug, Default)]
pub struct ProfileCache {
    profile: Option<HardwareProfile>,
}

impl ProfileCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached profile, if any
    pub fn get(&self) -> Option<&HardwareProfile> {
        self.profile.as_ref()
    }

    /// Get the cached profile, computing it with `f` on first use
    pub fn get_or_insert_with<F>(&mut self, f: F) -> &HardwareProfile
    where
        F: FnOnce() -> HardwareProfile,
    {
        self.profile.get_or_insert_with(f)
    }

    /// Store a freshly computed profile, replacing any cached one
    pub fn insert(&mut self, profile: HardwareProfile) -> &HardwareProfile {
        self.profile.insert(profile)
    }

    /// Drop the cached profile so the next access re-classifies
    pub fn invalidate(&mut self) {
        if self.profile.take().is_some() {
            tracing::debug!("hardware profile cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::tier::HardwareTier;

    #[test]
    fn test_computes_once() {
        let mut cache = ProfileCache::new();
        let mut calls = 0;
        cache.get_or_insert_with(|| {
            calls += 1;
            HardwareProfile::fallback()
        });
        cache.get_or_insert_with(|| {
            calls += 1;
            HardwareProfile::fallback()
        });
        assert_eq!(calls, 1);
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut cache = ProfileCache::new();
        cache.get_or_insert_with(HardwareProfile::fallback);
        cache.invalidate();
        assert!(cache.get().is_none());

        let mut low = HardwareProfile::fallback();
        low.tier = HardwareTier::LowEnd;
        let profile = cache.get_or_insert_with(|| low.clone());
        assert_eq!(profile.tier, HardwareTier::LowEnd);
    }

    #[test]
    fn test_insert_replaces() {
        let mut cache = ProfileCache::new();
        cache.get_or_insert_with(HardwareProfile::fallback);
        let mut replaced = HardwareProfile::fallback();
        replaced.refresh_hz = 240;
        cache.insert(replaced);
        assert_eq!(cache.get().map(|p| p.refresh_hz), Some(240));
    }
}
