// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! tuneforge - hardware-aware settings recommendations
//!
//! Entry point for the tuneforge CLI application.

use clap::Parser;

use tuneforge::cli::Cli;
use tuneforge::commands;
use tuneforge::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` shows store and engine decisions, `-vv` everything. `RUST_LOG` still applies.
    let directive = match cli.verbose {
        0 => None,
        1 => Some("tuneforge=info"),
        _ => Some("tuneforge=debug"),
    };
    if let Some(directive) = directive {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli).await
}
