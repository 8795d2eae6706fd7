// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and the evedit binary.
//!
//! Parsing tests use realistic command-line argument patterns; binary tests
//! run evedit against a file backend in a temporary directory.

use std::path::Path;
use std::process::{Command as Process, Output};

use clap::Parser;
use evedit::cli::global::GlobalOptions;
use evedit::cli::items::ItemsAction;
use evedit::cli::var::{ScopeArg, Source};
use evedit::cli::{Cli, Command};

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["evedit", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["evedit", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_multiple_inis() {
    let cli = Cli::try_parse_from(["evedit", "-i", "a.toml", "--ini", "b.toml", "options"]).unwrap();
    assert_eq!(cli.global.inis.len(), 2);
}

#[test]
fn cli_global_options_to_config_overrides() {
    let opts = GlobalOptions {
        log_level: Some(4),
        file_log_level: Some(6),
        log_file: Some(std::path::PathBuf::from("evedit.log")),
        options: vec!["store/backend=file".to_string()],
        ..Default::default()
    };
    assert_eq!(
        opts.to_config_overrides(),
        [
            "store/backend=file",
            "global/output_log_level=4",
            "global/file_log_level=6",
            "global/log_file=evedit.log",
        ]
    );
}

// =============================================================================
// Variable Commands
// =============================================================================

#[test]
fn cli_show_defaults() {
    let cli = Cli::try_parse_from(["evedit", "show"]).unwrap();
    let Some(Command::Show(args)) = cli.command else {
        panic!("expected show");
    };
    assert_eq!(args.source, None);
    assert!(!args.json);
}

#[test]
fn cli_show_system_source() {
    let cli = Cli::try_parse_from(["evedit", "show", "--source", "system"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Command::Show(ref args)) if args.source == Some(Source::System)
    ));
}

#[test]
fn cli_get_items_system() {
    let cli = Cli::try_parse_from(["evedit", "get", "Path", "--scope", "system", "--items"]).unwrap();
    let Some(Command::Get(args)) = cli.command else {
        panic!("expected get");
    };
    assert_eq!(args.name, "Path");
    assert_eq!(args.scope, Some(ScopeArg::System));
    assert!(args.items);
}

#[test]
fn cli_items_replace() {
    let cli = Cli::try_parse_from(["evedit", "items", "Path", "replace", "1", "D:\\Tools"]).unwrap();
    let Some(Command::Items(args)) = cli.command else {
        panic!("expected items");
    };
    assert!(matches!(
        args.action,
        ItemsAction::Replace { index: 1, ref item } if item == "D:\\Tools"
    ));
}

#[test]
fn cli_apply_file() {
    let cli = Cli::try_parse_from(["evedit", "apply", "vars.json", "--scope", "user"]).unwrap();
    let Some(Command::Apply(args)) = cli.command else {
        panic!("expected apply");
    };
    assert_eq!(args.file, Path::new("vars.json"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn cli_invalid_log_level() {
    let result = Cli::try_parse_from(["evedit", "-l", "10", "show"]);
    assert!(result.is_err());
}

#[test]
fn cli_missing_required_args() {
    let result = Cli::try_parse_from(["evedit", "set", "ONLY_NAME"]);
    assert!(result.is_err());
}

#[test]
fn cli_items_requires_action() {
    let result = Cli::try_parse_from(["evedit", "items", "Path"]);
    assert!(result.is_err());
}

// =============================================================================
// Binary
// =============================================================================

fn evedit(root: &Path, args: &[&str]) -> Output {
    let root_override = format!("store/root={}", root.display());
    Process::new(env!("CARGO_BIN_EXE_evedit"))
        .current_dir(root)
        .args(["-l", "0", "-s", "store/backend=file", "-s", "notify/strategy=off"])
        .args(["-s", root_override.as_str()])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn bin_set_get_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let set = evedit(dir.path(), &["set", "MY_VAR", "%HOME%\\bin"]);
    assert!(set.status.success(), "{set:?}");

    let get = evedit(dir.path(), &["get", "my_var"]);
    assert!(get.status.success());
    assert_eq!(stdout(&get), "%HOME%\\bin\n");
    assert!(dir.path().join("user.json").exists());
}

#[test]
fn bin_get_absent_prints_empty() {
    let dir = tempfile::tempdir().unwrap();
    let get = evedit(dir.path(), &["get", "NOT_THERE"]);
    assert!(get.status.success());
    assert_eq!(stdout(&get), "\n");
}

#[test]
fn bin_items_edit_list() {
    let dir = tempfile::tempdir().unwrap();

    assert!(evedit(dir.path(), &["set", "Path", "C:\\A;C:\\B;"]).status.success());
    assert!(evedit(dir.path(), &["items", "Path", "add", "C:\\Mid", "--at", "1"]).status.success());

    let list = evedit(dir.path(), &["items", "Path", "list"]);
    assert_eq!(stdout(&list), "0: C:\\A\n1: C:\\Mid\n2: C:\\B\n");

    let bad = evedit(dir.path(), &["items", "Path", "remove", "9"]);
    assert!(!bad.status.success());
}

#[test]
fn bin_apply_and_show_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vars.json"),
        r#"{ "JAVA_HOME": "C:\\Java", "Path": ["C:\\Java\\bin"] }"#,
    )
    .unwrap();

    let apply = evedit(dir.path(), &["apply", "vars.json"]);
    assert!(apply.status.success(), "{apply:?}");
    assert_eq!(stdout(&apply), "saved     JAVA_HOME\nsaved     Path\n");

    let show = evedit(dir.path(), &["show", "--source", "user", "--json"]);
    let shown: serde_json::Value = serde_json::from_slice(&show.stdout).unwrap();
    assert_eq!(
        shown,
        serde_json::json!({ "JAVA_HOME": "C:\\Java", "Path": "C:\\Java\\bin;" })
    );
}

#[test]
fn bin_invalid_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    let set = evedit(dir.path(), &["set", "A=B", "1"]);
    assert!(!set.status.success());
    assert!(String::from_utf8_lossy(&set.stderr).contains("name contains '='"));
}

#[test]
fn bin_broadcast_off_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    assert!(evedit(dir.path(), &["broadcast"]).status.success());
}
