// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;

use crate::cli::items::ItemsAction;
use crate::cli::var::Source;
use crate::cmd::apply::apply_file;
use crate::cmd::context::{CommandContext, open_backend};
use crate::cmd::get::get_variable;
use crate::cmd::items::edit_items;
use crate::cmd::set::set_variable;
use crate::cmd::show::show_variables;
use crate::config::types::{BackendKind, StoreConfig};
use crate::editor::BroadcastPolicy;
use crate::notify::RecordingNotifier;
use crate::scope::Scope;
use crate::store::memory::MemoryBackend;

fn context(backend: MemoryBackend, scope: Scope) -> CommandContext {
    CommandContext::new(
        Box::new(backend),
        Box::new(RecordingNotifier::new()),
        scope,
        BroadcastPolicy::PerVariable,
    )
}

fn path_context() -> CommandContext {
    context(
        MemoryBackend::new().with_var(Scope::User, "Path", "C:\\A;C:\\B;"),
        Scope::User,
    )
}

fn output(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut out = Vec::new();
    f(&mut out);
    String::from_utf8(out).unwrap()
}

fn items(ctx: &CommandContext, action: &ItemsAction) -> String {
    output(|out| edit_items(ctx, "Path", action, out).unwrap())
}

fn raw_path(ctx: &CommandContext) -> String {
    ctx.store().get("Path").unwrap()
}

// --- get / set ---

#[test]
fn test_get_prints_raw_value() {
    let ctx = path_context();
    let text = output(|out| get_variable(&ctx, "PATH", false, out).unwrap());
    assert_eq!(text, "C:\\A;C:\\B;\n");
}

#[test]
fn test_get_items() {
    let ctx = path_context();
    let text = output(|out| get_variable(&ctx, "Path", true, out).unwrap());
    assert_eq!(text, "C:\\A\nC:\\B\n");

    let text = output(|out| get_variable(&ctx, "MISSING", true, out).unwrap());
    assert_eq!(text, "");
}

#[test]
fn test_set_then_get() {
    let ctx = context(MemoryBackend::new(), Scope::User);
    set_variable(&ctx, "MY_VAR", "%USERPROFILE%\\x").unwrap();
    let text = output(|out| get_variable(&ctx, "MY_VAR", false, out).unwrap());
    assert_eq!(text, "%USERPROFILE%\\x\n");
}

#[test]
fn test_set_system_without_elevation_fails() {
    let ctx = context(MemoryBackend::new(), Scope::System);
    let err = set_variable(&ctx, "MY_VAR", "x").unwrap_err();
    assert!(err.to_string().contains("re-run as administrator"), "{err}");
}

// --- items ---

#[test]
fn test_items_list() {
    let ctx = path_context();
    insta::assert_snapshot!(items(&ctx, &ItemsAction::List), @r"
    0: C:\A
    1: C:\B
    ");
}

#[test]
fn test_items_add_appends_and_inserts() {
    let ctx = path_context();
    let text = items(
        &ctx,
        &ItemsAction::Add {
            item: "C:\\C".to_string(),
            at: None,
        },
    );
    assert_eq!(text, "saved     Path\n");
    assert_eq!(raw_path(&ctx), "C:\\A;C:\\B;C:\\C;");

    items(
        &ctx,
        &ItemsAction::Add {
            item: "C:\\First".to_string(),
            at: Some(0),
        },
    );
    assert_eq!(raw_path(&ctx), "C:\\First;C:\\A;C:\\B;C:\\C;");
}

#[test]
fn test_items_remove_replace_move() {
    let ctx = path_context();
    items(&ctx, &ItemsAction::Remove { index: 0 });
    assert_eq!(raw_path(&ctx), "C:\\B;");

    items(
        &ctx,
        &ItemsAction::Replace {
            index: 0,
            item: "D:\\B".to_string(),
        },
    );
    items(
        &ctx,
        &ItemsAction::Add {
            item: "E:\\".to_string(),
            at: None,
        },
    );
    items(&ctx, &ItemsAction::Move { from: 1, to: 0 });
    assert_eq!(raw_path(&ctx), "E:\\;D:\\B;");
}

#[test]
fn test_items_add_to_absent_variable() {
    let ctx = context(MemoryBackend::new(), Scope::User);
    items(
        &ctx,
        &ItemsAction::Add {
            item: "C:\\Tools".to_string(),
            at: None,
        },
    );
    assert_eq!(raw_path(&ctx), "C:\\Tools;");
}

#[test]
fn test_items_remove_from_absent_variable_fails() {
    let ctx = context(MemoryBackend::new(), Scope::User);
    let err = edit_items(&ctx, "Path", &ItemsAction::Remove { index: 0 }, &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");
}

#[test]
fn test_items_scalar_becomes_list() {
    let ctx = context(
        MemoryBackend::new().with_var(Scope::User, "Path", "C:\\Only"),
        Scope::User,
    );
    items(
        &ctx,
        &ItemsAction::Add {
            item: "C:\\Two".to_string(),
            at: None,
        },
    );
    assert_eq!(raw_path(&ctx), "C:\\Only;C:\\Two;");
}

#[test]
fn test_items_separator_in_item_writes_nothing() {
    let ctx = path_context();
    let action = ItemsAction::Add {
        item: "C:\\X;C:\\Y".to_string(),
        at: None,
    };
    assert!(edit_items(&ctx, "Path", &action, &mut Vec::new()).is_err());
    assert_eq!(raw_path(&ctx), "C:\\A;C:\\B;");
}

// --- apply ---

fn write_json(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("vars.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_apply_scalars_and_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(
        &dir,
        r#"{ "JAVA_HOME": "C:\\Java", "Path": ["C:\\A", "C:\\B"], "NEW": ["x"] }"#,
    );
    let ctx = path_context();

    let text = output(|out| apply_file(&ctx, &path, out).unwrap());
    assert_eq!(text, "saved     JAVA_HOME\nsaved     NEW\n");
    assert_eq!(ctx.store().get("JAVA_HOME").unwrap(), "C:\\Java");
    assert_eq!(ctx.store().get("NEW").unwrap(), "x;");
    assert_eq!(raw_path(&ctx), "C:\\A;C:\\B;");

    let again = output(|out| apply_file(&ctx, &path, out).unwrap());
    assert_eq!(again, "");
}

#[test]
fn test_apply_rejects_separator_in_item() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(&dir, r#"{ "A": "1", "Path": ["C:\\A;C:\\B"] }"#);
    let ctx = context(MemoryBackend::new(), Scope::User);

    let err = apply_file(&ctx, &path, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("cannot encode 'Path'"), "{err}");
    assert_eq!(ctx.store().get("A").unwrap(), "");
}

#[test]
fn test_apply_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(&dir, r#"{ "A": 1 }"#);
    let ctx = context(MemoryBackend::new(), Scope::User);
    assert!(apply_file(&ctx, &path, &mut Vec::new()).is_err());
}

#[test]
fn test_apply_system_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(&dir, r#"{ "A": "1", "B": "2" }"#);
    let ctx = context(MemoryBackend::new(), Scope::System);

    let mut out = Vec::new();
    let err = apply_file(&ctx, &path, &mut out).unwrap_err();
    assert!(err.to_string().starts_with("2 variable(s) could not be saved"), "{err}");
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|line| line.starts_with("failed    ")));
}

// --- show ---

#[test]
fn test_show_user_text_and_json() {
    let ctx = context(
        MemoryBackend::new()
            .with_var(Scope::User, "b", "2")
            .with_var(Scope::User, "A", "1;"),
        Scope::User,
    );

    let text = output(|out| show_variables(&ctx, Source::User, false, out).unwrap());
    assert_eq!(text, "A=1;\nb=2\n");

    let json = output(|out| show_variables(&ctx, Source::User, true, out).unwrap());
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, serde_json::json!({ "A": "1;", "b": "2" }));
}

#[test]
fn test_show_system_is_readable_without_elevation() {
    let ctx = context(
        MemoryBackend::new().with_var(Scope::System, "OS", "Windows_NT"),
        Scope::User,
    );
    let text = output(|out| show_variables(&ctx, Source::System, false, out).unwrap());
    assert_eq!(text, "OS=Windows_NT\n");
}

// --- context ---

#[test]
fn test_open_file_backend() {
    let config = StoreConfig {
        backend: BackendKind::File,
        root: "evedit-store".into(),
    };
    assert_eq!(open_backend(&config).unwrap().name(), "file");
}

#[cfg(not(windows))]
#[test]
fn test_registry_backend_unavailable_off_windows() {
    let config = StoreConfig {
        backend: BackendKind::Registry,
        ..StoreConfig::default()
    };
    let err = open_backend(&config).err().unwrap();
    assert!(err.to_string().contains("only available on Windows"));
}
