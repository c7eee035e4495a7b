// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Each module exposes an `execute` that prints text or JSON depending on the
//! requested output format.

pub mod catalog;
pub mod estimate;
pub mod recommend;
pub mod schema;
pub mod system;

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::{Cli, Commands, DetectArgs, OutputFormat};
use crate::collab::TelemetryProvider;
use crate::config::Settings;
use crate::error::Result;
use crate::hardware::{FileProbe, SysinfoProbe};
use crate::schema::{FileStore, SchemaStore};
use crate::tuner::Tuner;

/// Load settings, open the store and dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let home = cli.home.clone().unwrap_or_else(Settings::tuneforge_home);
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(|| home.join("settings.json"));
    let settings = Settings::load_from(&settings_path)?;
    settings.validate()?;

    if let Some(Commands::Catalog(args)) = &cli.command {
        return catalog::execute(args, &cli.format);
    }

    let data_dir = settings.data_dir_in(&home);
    let store = SchemaStore::new(FileStore::open(&data_dir)?);
    let mut tuner = Tuner::new(store, &settings);
    let migrated = tuner.prepare_store(&settings)?;
    if migrated > 0 {
        info!(migrated, "converted legacy profiles into schemas");
    }

    match &cli.command {
        None => system::execute(&mut tuner, &DetectArgs::default(), &cli.format).await,
        Some(Commands::Detect(args)) => system::execute(&mut tuner, args, &cli.format).await,
        Some(Commands::Recommend(args)) => recommend::execute(&mut tuner, args, &cli.format).await,
        Some(Commands::Estimate(args)) => estimate::execute(&mut tuner, args, &cli.format).await,
        Some(Commands::Catalog(args)) => catalog::execute(args, &cli.format),
        Some(Commands::Schema(args)) => schema::execute(tuner.store_mut(), args, &cli.format),
    }
}

/// Probe for this run: a saved reading if one was given, else the local machine
pub fn telemetry_provider(saved: Option<&Path>) -> Box<dyn TelemetryProvider> {
    match saved {
        Some(path) => Box::new(FileProbe::new(path)),
        None => Box::new(SysinfoProbe::new()),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn is_json(format: &OutputFormat) -> bool {
    matches!(format, OutputFormat::Json)
}
