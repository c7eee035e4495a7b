// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Schema management commands

use serde::Serialize;
use uuid::Uuid;

use super::recommend::render;
use super::{is_json, print_json};
use crate::cli::args::{OutputFormat, SchemaArgs, SchemaCommands};
use crate::error::Result;
use crate::schema::{KeyValueStore, Schema, SchemaStore};

#[derive(Serialize)]
struct SchemaSummary<'a> {
    id: Uuid,
    name: &'a str,
    active: bool,
    values: usize,
    updated_at: String,
}

/// Execute a schema subcommand
pub fn execute<S: KeyValueStore>(
    store: &mut SchemaStore<S>,
    args: &SchemaArgs,
    format: &OutputFormat,
) -> Result<()> {
    match &args.command {
        SchemaCommands::List => list(store, format),
        SchemaCommands::Show { schema } => {
            let schema = resolve_or_active(store, schema.as_deref())?;
            show(store, &schema, format)
        }
        SchemaCommands::Create { name } => {
            let schema = store.create(name)?;
            report(&schema, "Created", format)
        }
        SchemaCommands::Duplicate { schema, name } => {
            let source = store.resolve(schema)?;
            let copy = store.duplicate(source.id, name)?;
            report(&copy, "Created", format)
        }
        SchemaCommands::Rename { schema, name } => {
            let schema = store.resolve(schema)?;
            let renamed = store.rename(schema.id, name)?;
            report(&renamed, "Renamed", format)
        }
        SchemaCommands::Delete { schema } => {
            let schema = store.resolve(schema)?;
            store.delete(schema.id)?;
            report(&schema, "Deleted", format)
        }
        SchemaCommands::Activate { schema } => {
            let schema = store.resolve(schema)?;
            store.set_active(schema.id)?;
            report(&schema, "Activated", format)
        }
        SchemaCommands::Star {
            setting,
            schema,
            unstar,
        } => {
            let schema = resolve_or_active(store, schema.as_deref())?;
            let moved = store.star(schema.id, setting, !*unstar)?;
            if is_json(format) {
                return print_json(&serde_json::json!({ "setting": setting, "moved": moved }));
            }
            match (moved, *unstar) {
                (false, _) => println!("{} is already there", setting),
                (true, false) => println!("Starred {} in {}", setting, schema.name),
                (true, true) => println!("Unstarred {} in {}", setting, schema.name),
            }
            Ok(())
        }
        SchemaCommands::Export { schema, output } => {
            let schema = resolve_or_active(store, schema.as_deref())?;
            let json = SchemaStore::<S>::export_to_json(&schema)?;
            match output {
                Some(path) => {
                    std::fs::write(path, json)?;
                    if !is_json(format) {
                        println!("Exported {} to {}", schema.name, path.display());
                    }
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        SchemaCommands::Import { file } => {
            let content = std::fs::read_to_string(file)?;
            let schema = store.import_from_json(&content)?;
            report(&schema, "Imported", format)
        }
    }
}

fn resolve_or_active<S: KeyValueStore>(
    store: &mut SchemaStore<S>,
    key: Option<&str>,
) -> Result<Schema> {
    match key {
        Some(key) => store.resolve(key),
        None => store.ensure_active(),
    }
}

fn list<S: KeyValueStore>(store: &mut SchemaStore<S>, format: &OutputFormat) -> Result<()> {
    let schemas = store.list()?;
    let active = store.active_id()?;
    let summaries: Vec<SchemaSummary> = schemas
        .iter()
        .map(|s| SchemaSummary {
            id: s.id,
            name: &s.name,
            active: active == Some(s.id),
            values: s.values.len(),
            updated_at: s.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    if is_json(format) {
        return print_json(&summaries);
    }

    println!("\nSchemas:\n");
    for summary in &summaries {
        println!(
            "{} {:<24} {:>3} values  updated {}  {}",
            if summary.active { "*" } else { " " },
            summary.name,
            summary.values,
            summary.updated_at,
            summary.id
        );
    }
    println!();
    Ok(())
}

fn show<S: KeyValueStore>(
    store: &mut SchemaStore<S>,
    schema: &Schema,
    format: &OutputFormat,
) -> Result<()> {
    if is_json(format) {
        return print_json(schema);
    }

    let active = store.active_id()? == Some(schema.id);
    println!(
        "\n{}{}  ({})",
        schema.name,
        if active { " [active]" } else { "" },
        schema.id
    );
    for (bucket, ids) in &schema.layout {
        if ids.is_empty() {
            continue;
        }
        println!("\n[{}]", bucket);
        for id in ids {
            let value = schema
                .values
                .get(id)
                .map(render)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<14} {:<8} {}",
                id,
                value,
                schema.label_of(id).unwrap_or_default()
            );
        }
    }

    let hidden = schema.hidden_ids();
    if !hidden.is_empty() {
        println!("\nHidden: {}", hidden.join(", "));
    }
    println!();
    Ok(())
}

fn report(schema: &Schema, action: &str, format: &OutputFormat) -> Result<()> {
    if is_json(format) {
        return print_json(schema);
    }
    println!("{} schema {} ({})", action, schema.name, schema.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MemoryStore;

    fn run(store: &mut SchemaStore<MemoryStore>, command: SchemaCommands) -> Result<()> {
        execute(store, &SchemaArgs { command }, &OutputFormat::Json)
    }

    #[test]
    fn test_create_activate_delete_by_name() {
        let mut store = SchemaStore::new(MemoryStore::new());
        run(
            &mut store,
            SchemaCommands::Create {
                name: "Ranked".to_string(),
            },
        )
        .unwrap();
        run(
            &mut store,
            SchemaCommands::Activate {
                schema: "ranked".to_string(),
            },
        )
        .unwrap();
        assert_eq!(store.active().unwrap().unwrap().name, "Ranked");

        run(
            &mut store,
            SchemaCommands::Delete {
                schema: "Ranked".to_string(),
            },
        )
        .unwrap();
        let schemas = store.list().unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].name, "Default");
    }

    #[test]
    fn test_star_defaults_to_active_schema() {
        let mut store = SchemaStore::new(MemoryStore::new());
        run(
            &mut store,
            SchemaCommands::Star {
                setting: "s_xbox".to_string(),
                schema: None,
                unstar: false,
            },
        )
        .unwrap();
        let active = store.ensure_active().unwrap();
        assert!(active.bucket(crate::schema::BucketKey::Principal).contains(&"s_xbox".to_string()));
    }

    #[test]
    fn test_export_then_import_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.json");

        let mut source = SchemaStore::new(MemoryStore::new());
        let schema = source.create("Shared").unwrap();
        run(
            &mut source,
            SchemaCommands::Export {
                schema: Some("Shared".to_string()),
                output: Some(path.clone()),
            },
        )
        .unwrap();

        let mut target = SchemaStore::new(MemoryStore::new());
        run(&mut target, SchemaCommands::Import { file: path }).unwrap();
        assert_eq!(target.get(schema.id).unwrap().name, "Shared");
    }

    #[test]
    fn test_unknown_schema_is_an_error() {
        let mut store = SchemaStore::new(MemoryStore::new());
        assert!(run(
            &mut store,
            SchemaCommands::Rename {
                schema: "missing".to_string(),
                name: "x".to_string(),
            },
        )
        .is_err());
    }
}
