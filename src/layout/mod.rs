// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Layout editing
//!
//! Edits to one bucket are staged in an [`EditSession`] and only reach the
//! schema store on save. Starring is immediate and lives on
//! [`crate::schema::SchemaStore::star`].

pub mod session;

pub use session::*;
