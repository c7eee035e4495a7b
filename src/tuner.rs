// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Engine facade
//!
//! Owns the profile cache, the impact model and the schema store, and wires
//! the collaborators into them: probe -> classifier -> rules -> selection ->
//! estimate, with apply going out through the host applier.

use tracing::{debug, info, warn};

use crate::catalog::{self, Category, Values};
use crate::collab::{
    ApplyReport, HostApplier, SystemState, SystemStateChecker, SystemStateSnapshot,
    TelemetryProvider,
};
use crate::config::Settings;
use crate::error::Result;
use crate::hardware::{HardwareProfile, ProfileCache};
use crate::impact::{ContributionLine, Estimate, ImpactModel};
use crate::recommend::{self, RecommendationSet};
use crate::schema::{KeyValueStore, SchemaStore};

pub struct Tuner<S: KeyValueStore> {
    cache: ProfileCache,
    model: ImpactModel,
    store: SchemaStore<S>,
}

impl<S: KeyValueStore> Tuner<S> {
    /// Build a tuner over `store` using the configured baseline
    pub fn new(store: SchemaStore<S>, settings: &Settings) -> Self {
        Self::with_model(store, ImpactModel::new(settings.estimate.baseline_fps))
    }

    pub fn with_model(store: SchemaStore<S>, model: ImpactModel) -> Self {
        Self {
            cache: ProfileCache::new(),
            model,
            store,
        }
    }

    pub fn store(&self) -> &SchemaStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SchemaStore<S> {
        &mut self.store
    }

    pub fn model(&self) -> &ImpactModel {
        &self.model
    }

    /// Run startup migration of legacy profiles.
    ///
    /// A configured legacy file is staged into the store first. Returns the
    /// number of schemas created.
    pub fn prepare_store(&mut self, settings: &Settings) -> Result<usize> {
        if !settings.storage.migrate_legacy {
            return Ok(0);
        }
        if let Some(path) = &settings.storage.legacy_profiles_path {
            if path.exists() && !self.store.legacy_migrated()? {
                let content = std::fs::read_to_string(path)?;
                self.store.stage_legacy_profiles(&content)?;
                debug!(path = %path.display(), "staged legacy profiles file");
            }
        }
        self.store.migrate_legacy()
    }

    /// Cached profile, if one was computed
    pub fn cached_profile(&self) -> Option<&HardwareProfile> {
        self.cache.get()
    }

    /// Hardware profile, probing on first use.
    ///
    /// A failed probe yields the fallback profile, which is cached like any
    /// other until [`Tuner::rescan`].
    pub async fn profile(&mut self, probe: &dyn TelemetryProvider) -> &HardwareProfile {
        if self.cache.get().is_none() {
            let raw = match probe.probe().await {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warn!(error = %e, "telemetry probe failed, using fallback profile");
                    None
                }
            };
            let profile = HardwareProfile::from_probe(raw.as_ref());
            info!(tier = %profile.tier, fallback = profile.fallback, "classified hardware");
            self.cache.insert(profile);
        }
        self.cache.get_or_insert_with(HardwareProfile::fallback)
    }

    /// Drop the cached profile and probe again
    pub async fn rescan(&mut self, probe: &dyn TelemetryProvider) -> &HardwareProfile {
        self.cache.invalidate();
        self.profile(probe).await
    }

    /// Full recommendation set for this machine
    pub async fn recommend(&mut self, probe: &dyn TelemetryProvider) -> RecommendationSet {
        recommend::recommend(self.profile(probe).await)
    }

    /// Recommendations for one category
    pub async fn recommend_scoped(
        &mut self,
        probe: &dyn TelemetryProvider,
        category: Category,
    ) -> RecommendationSet {
        recommend::recommend_scoped(self.profile(probe).await, category)
    }

    /// Merge recommendations into the active schema's values and persist them.
    ///
    /// Returns the ids whose value changed.
    pub async fn accept_recommendations(
        &mut self,
        probe: &dyn TelemetryProvider,
        scope: Option<Category>,
    ) -> Result<Vec<String>> {
        let recommendations = match scope {
            Some(category) => self.recommend_scoped(probe, category).await,
            None => self.recommend(probe).await,
        };
        let schema = self.store.ensure_active()?;
        let mut values = schema.values.clone();
        let changed = recommend::accept(&mut values, &recommendations);
        if !changed.is_empty() {
            self.store.save_values(schema.id, &values)?;
        }
        info!(schema = %schema.id, changed = changed.len(), "accepted recommendations");
        Ok(changed)
    }

    /// Ask the checker about every setting turned on in `selection`.
    ///
    /// A failing checker degrades to an all-unknown snapshot.
    pub async fn check_state(
        &self,
        checker: &dyn SystemStateChecker,
        selection: &Values,
    ) -> SystemStateSnapshot {
        let ids = selected_ids(selection);
        match checker.check(&ids).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "system state check failed, treating state as unknown");
                ids.into_iter().map(|id| (id, SystemState::Unknown)).collect()
            }
        }
    }

    /// Impact of `selection`, skipping settings already applied on the host
    pub fn estimate(&self, selection: &Values, state: &SystemStateSnapshot) -> Estimate {
        self.model.estimate(selection, state)
    }

    /// Per-setting contributions behind [`Tuner::estimate`]
    pub fn breakdown(&self, selection: &Values, state: &SystemStateSnapshot) -> Vec<ContributionLine> {
        self.model.breakdown(selection, state)
    }

    /// Send the selected settings, optionally limited to one category, to the applier
    pub async fn apply(
        &self,
        applier: &dyn HostApplier,
        selection: &Values,
        scope: Option<Category>,
    ) -> Result<ApplyReport> {
        let scoped: Values = selection
            .iter()
            .filter(|(id, _)| scope.map_or(true, |c| id.starts_with(c.prefix())))
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();
        let report = applier.apply(&scoped, scope).await?;
        info!(
            status = ?report.status,
            attempted = report.counts.attempted,
            failed = report.counts.failed,
            "applied selection"
        );
        Ok(report)
    }
}

/// Ids in `selection` whose value counts as turned on
pub fn selected_ids(selection: &Values) -> Vec<String> {
    selection
        .iter()
        .filter(|(id, value)| catalog::find(id).is_some_and(|def| def.kind.is_on(value)))
        .map(|(id, _)| id.clone())
        .collect()
}
