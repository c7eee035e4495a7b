// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware profiling
//!
//! Turns raw telemetry into a typed [`HardwareProfile`] with a discrete
//! [`HardwareTier`], and caches the result for the life of its owner.

pub mod cache;
pub mod detector;
pub mod profile;
pub mod tier;

pub use cache::*;
pub use detector::*;
pub use profile::*;
pub use tier::*;
