// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Catalog listing command

use super::recommend::render;
use super::{is_json, print_json};
use crate::catalog::{self, Category, SettingDefinition};
use crate::cli::args::{CatalogArgs, OutputFormat};
use crate::error::Result;

/// Catalog entries, optionally limited to one category
pub fn select(category: Option<Category>) -> Vec<&'static SettingDefinition> {
    match category {
        Some(category) => catalog::by_category(category).collect(),
        None => catalog::all().iter().collect(),
    }
}

/// Execute the catalog command
pub fn execute(args: &CatalogArgs, format: &OutputFormat) -> Result<()> {
    let definitions = select(args.category);

    if is_json(format) {
        return print_json(&definitions);
    }

    let mut current = None;
    for def in &definitions {
        if current != Some(def.category) {
            println!("\n[{}]", def.category.label());
            current = Some(def.category);
        }
        let mut flags = Vec::new();
        if def.rule.is_manual() {
            flags.push("manual");
        }
        if def.safety_override {
            flags.push("safety");
        }
        if def.principal {
            flags.push("principal");
        }
        println!(
            "  {:<14} {:>4.1}%  default {:<6} {}{}",
            def.id,
            def.weight,
            render(&def.kind.default_value()),
            def.label,
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        );
    }
    println!("\n{} settings", definitions.len());
    Ok(())
}
