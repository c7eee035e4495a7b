// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use clap::Parser;
use tempfile::TempDir;
use tuneforge::catalog::Category;
use tuneforge::cli::{Cli, Commands, OutputFormat, SchemaCommands};
use tuneforge::commands;
use tuneforge::schema::{FileStore, SchemaStore};

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["tuneforge"]).expect("Valid command parsing");
    assert!(cli.command.is_none());
    assert_eq!(cli.format, OutputFormat::Text);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_parse_detect_alias() {
    let cli = Cli::try_parse_from(["tuneforge", "hw", "--telemetry", "probe.json"])
        .expect("Valid command parsing");
    if let Some(Commands::Detect(args)) = cli.command {
        assert_eq!(args.telemetry.unwrap().to_str(), Some("probe.json"));
    } else {
        panic!("Expected Detect command");
    }
}

#[test]
fn test_parse_recommend_with_category() {
    let cli = Cli::try_parse_from(["tuneforge", "recommend", "-c", "nvidia", "--accept"])
        .expect("Valid command parsing");
    if let Some(Commands::Recommend(args)) = cli.command {
        assert_eq!(args.category, Some(Category::Nvidia));
        assert!(args.accept);
    } else {
        panic!("Expected Recommend command");
    }
}

#[test]
fn test_parse_recommend_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["tuneforge", "recommend", "-c", "kernel"]).is_err());
}

#[test]
fn test_parse_estimate() {
    let cli = Cli::try_parse_from([
        "tuneforge", "estimate", "-s", "Ranked", "--state", "state.json", "-d",
    ])
    .expect("Valid command parsing");
    if let Some(Commands::Estimate(args)) = cli.command {
        assert_eq!(args.schema.as_deref(), Some("Ranked"));
        assert!(args.state.is_some());
        assert!(args.detailed);
    } else {
        panic!("Expected Estimate command");
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["tuneforge", "catalog", "--format", "json", "-vv"])
        .expect("Valid command parsing");
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Some(Commands::Catalog(_))));
}

fn parse_schema(args: &[&str]) -> SchemaCommands {
    let argv: Vec<&str> = ["tuneforge", "schema"].iter().chain(args).copied().collect();
    match Cli::try_parse_from(argv).expect("Valid command parsing").command {
        Some(Commands::Schema(schema_args)) => schema_args.command,
        other => panic!("Expected Schema command, got {:?}", other),
    }
}

#[test]
fn test_parse_schema_subcommands() {
    assert!(matches!(parse_schema(&["list"]), SchemaCommands::List));
    assert!(matches!(
        parse_schema(&["show"]),
        SchemaCommands::Show { schema: None }
    ));
    assert!(matches!(
        parse_schema(&["create", "Ranked"]),
        SchemaCommands::Create { .. }
    ));
    assert!(matches!(
        parse_schema(&["duplicate", "Ranked", "Copy"]),
        SchemaCommands::Duplicate { .. }
    ));
    assert!(matches!(
        parse_schema(&["rename", "Ranked", "Comp"]),
        SchemaCommands::Rename { .. }
    ));
    assert!(matches!(
        parse_schema(&["delete", "Ranked"]),
        SchemaCommands::Delete { .. }
    ));
    assert!(matches!(
        parse_schema(&["activate", "Ranked"]),
        SchemaCommands::Activate { .. }
    ));
    assert!(matches!(
        parse_schema(&["export", "-o", "out.json"]),
        SchemaCommands::Export { output: Some(_), .. }
    ));
    assert!(matches!(
        parse_schema(&["import", "in.json"]),
        SchemaCommands::Import { .. }
    ));
}

#[test]
fn test_parse_star_flags() {
    match parse_schema(&["star", "n_ecn", "-s", "Ranked", "--unstar"]) {
        SchemaCommands::Star {
            setting,
            schema,
            unstar,
        } => {
            assert_eq!(setting, "n_ecn");
            assert_eq!(schema.as_deref(), Some("Ranked"));
            assert!(unstar);
        }
        other => panic!("Expected Star, got {:?}", other),
    }
}

// ===== end-to-end runs =====

fn run_in(home: &TempDir, args: &[&str]) -> tuneforge::Result<()> {
    let home_arg = home.path().to_str().unwrap();
    let argv: Vec<&str> = ["tuneforge", "--home", home_arg, "--format", "json"]
        .iter()
        .chain(args.iter())
        .copied()
        .collect();
    let cli = Cli::try_parse_from(argv).expect("Valid command parsing");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(commands::run(cli))
}

#[test]
fn test_schema_commands_persist_under_home() {
    let home = TempDir::new().unwrap();
    run_in(&home, &["schema", "create", "Ranked"]).unwrap();
    run_in(&home, &["schema", "activate", "ranked"]).unwrap();
    run_in(&home, &["schema", "star", "n_ecn"]).unwrap();
    run_in(&home, &["schema", "list"]).unwrap();

    let mut store = SchemaStore::new(FileStore::open(home.path().join("data")).unwrap());
    let active = store.active().unwrap().expect("active schema");
    assert_eq!(active.name, "Ranked");
    assert!(active.bucket(tuneforge::schema::BucketKey::Principal).contains(&"n_ecn".to_string()));
}

#[test]
fn test_recommend_accept_from_saved_reading() {
    let home = TempDir::new().unwrap();
    let reading = home.path().join("probe.json");
    std::fs::write(
        &reading,
        r#"{"gpu_name": "NVIDIA GeForce RTX 3070", "gpu_vram_mb": "8192",
            "cpu_cores": 8, "ram_total_gb": 32, "refresh_rate": 144}"#,
    )
    .unwrap();
    let reading_arg = reading.to_str().unwrap();

    run_in(&home, &["detect", "--telemetry", reading_arg]).unwrap();
    run_in(&home, &["recommend", "--telemetry", reading_arg, "--accept"]).unwrap();
    run_in(&home, &["estimate", "-d"]).unwrap();

    let mut store = SchemaStore::new(FileStore::open(home.path().join("data")).unwrap());
    let active = store.ensure_active().unwrap();
    assert_eq!(
        active.values.get("ae_fps"),
        Some(&tuneforge::catalog::SettingValue::Text("288".to_string()))
    );
}

#[test]
fn test_unknown_schema_fails() {
    let home = TempDir::new().unwrap();
    assert!(run_in(&home, &["schema", "delete", "nope"]).is_err());
}

#[test]
fn test_invalid_settings_file_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("settings.json"),
        r#"{"estimate": {"baseline_fps": 0}}"#,
    )
    .unwrap();
    assert!(run_in(&home, &["catalog"]).is_err());
}
