// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! tuneforge - hardware-aware settings recommendation and schema persistence.
//!
//! This crate exposes the engine used by the `tuneforge` CLI (`src/main.rs`).
//!
//! Architecture highlights:
//! - `hardware`: telemetry normalization, tier classification, profile cache
//! - `catalog`: the static setting table with per-setting rules and weights
//! - `recommend`, `impact`: pure recommendation and estimate computations
//! - `schema`, `layout`: persisted schemas and the bucket edit session
//! - `collab`: async interfaces to the probe, state checker and host applier
//! - `tuner`: facade wiring the above together

pub mod catalog;
pub mod cli;
pub mod collab;
pub mod commands;
pub mod config;
pub mod error;
pub mod hardware;
pub mod impact;
pub mod layout;
pub mod recommend;
pub mod schema;
pub mod tuner;

pub use error::{Result, TuneError};
