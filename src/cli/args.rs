// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for tuneforge.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::Category;

/// tuneforge - hardware-aware settings recommendations
#[derive(Parser, Debug)]
#[command(name = "tuneforge")]
#[command(version, about = "Hardware-aware settings recommendations and schemas")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Home directory (defaults to $TUNEFORGE_HOME or ~/.tuneforge)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify this machine's hardware (default when no command given)
    #[command(alias = "hw")]
    Detect(DetectArgs),

    /// Show recommended values for this machine
    Recommend(RecommendArgs),

    /// Estimate the FPS gain of a schema's selection
    Estimate(EstimateArgs),

    /// List catalog settings
    Catalog(CatalogArgs),

    /// Schema management
    Schema(SchemaArgs),
}

/// Arguments for the detect subcommand
#[derive(clap::Args, Debug, Default)]
pub struct DetectArgs {
    /// Read a saved probe reading instead of probing this machine
    #[arg(long, value_name = "FILE")]
    pub telemetry: Option<PathBuf>,
}

/// Arguments for the recommend subcommand
#[derive(clap::Args, Debug)]
pub struct RecommendArgs {
    /// Only recommend settings of this category
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Read a saved probe reading instead of probing this machine
    #[arg(long, value_name = "FILE")]
    pub telemetry: Option<PathBuf>,

    /// Write the recommendations into the active schema
    #[arg(long)]
    pub accept: bool,
}

/// Arguments for the estimate subcommand
#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    /// Schema name or id (defaults to the active schema)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// System state snapshot (`{"id": true|false|null}`) of settings already applied
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// List each contributing setting
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the catalog subcommand
#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Only list settings of this category
    #[arg(short, long)]
    pub category: Option<Category>,
}

/// Arguments for the schema subcommand
#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommands,
}

/// Schema subcommands
#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List schemas
    List,

    /// Show a schema's layout and values
    Show {
        /// Schema name or id (defaults to the active schema)
        schema: Option<String>,
    },

    /// Create a schema with the default layout
    Create {
        /// Schema name
        name: String,
    },

    /// Copy a schema
    Duplicate {
        /// Schema name or id
        schema: String,
        /// Name of the copy
        name: String,
    },

    /// Rename a schema
    Rename {
        /// Schema name or id
        schema: String,
        /// New name
        name: String,
    },

    /// Delete a schema
    Delete {
        /// Schema name or id
        schema: String,
    },

    /// Make a schema active
    Activate {
        /// Schema name or id
        schema: String,
    },

    /// Move a setting to the Principal bucket, or back with --unstar
    Star {
        /// Setting id
        setting: String,
        /// Schema name or id (defaults to the active schema)
        #[arg(short, long)]
        schema: Option<String>,
        /// Move the setting back to its category bucket
        #[arg(long)]
        unstar: bool,
    },

    /// Export a schema as JSON
    Export {
        /// Schema name or id (defaults to the active schema)
        schema: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a schema from an exported JSON file
    Import {
        /// File to import
        file: PathBuf,
    },
}

/// Output format for responses
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
