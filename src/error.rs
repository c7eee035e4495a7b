// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for tuneforge
//!
//! Nothing in the engine is fatal: degraded telemetry falls back to defaults and
//! corrupted stores are re-derived. These variants cover what is left to report.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for tuneforge operations
#[derive(Error, Debug)]
pub enum TuneError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(String),

    /// No schema with the given id exists
    #[error("Schema not found: {0}")]
    SchemaNotFound(Uuid),

    /// Setting id is neither in the catalog nor a custom entry
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// Telemetry probe failed
    #[error("Probe error: {0}")]
    Probe(String),

    /// Host-mutation service failed
    #[error("Apply error: {0}")]
    Apply(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for tuneforge operations
pub type Result<T> = std::result::Result<T, TuneError>;
