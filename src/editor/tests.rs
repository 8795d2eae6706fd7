// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BroadcastPolicy, EditSession, EntryState};
use crate::codec::VariableValue;
use crate::error::{EditError, EvError};
use crate::notify::RecordingNotifier;
use crate::scope::Scope;
use crate::store::EnvironmentStore;
use crate::store::memory::MemoryBackend;

fn user_backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_var(Scope::User, "MY_VAR", "hello")
        .with_var(Scope::User, "Path", "C:\\A;C:\\B;")
}

// --- Working copy ---

#[test]
fn test_from_store_entries_are_clean() {
    let backend = user_backend();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let session = EditSession::from_store(&store).unwrap();

    assert_eq!(session.len(), 2);
    assert!(session.iter().all(|(_, e)| e.state() == EntryState::Clean));
    assert!(!session.has_changes());
}

#[test]
fn test_add_creates_empty_edited_entry() {
    let mut session = EditSession::from_snapshot([("A", "1")]);
    let id = session.add();

    let entry = session.entry(id).unwrap();
    assert_eq!(entry.name(), "");
    assert_eq!(entry.raw(), "");
    assert_eq!(entry.state(), EntryState::Edited);
    assert!(!entry.is_persisted());
    assert_eq!(session.len(), 2);
}

#[test]
fn test_rename_and_set_raw_mark_edited() {
    let mut session = EditSession::from_snapshot([("A", "1"), ("B", "2")]);
    let a = session.find("a").unwrap();
    let b = session.find("B").unwrap();

    session.rename(a, "ALPHA").unwrap();
    session.set_raw(b, "two").unwrap();

    assert_eq!(session.entry(a).unwrap().state(), EntryState::Edited);
    assert_eq!(session.entry(b).unwrap().state(), EntryState::Edited);
    assert_eq!(
        session.snapshot(),
        [
            ("ALPHA".to_string(), "1".to_string()),
            ("B".to_string(), "two".to_string())
        ]
    );
}

#[test]
fn test_setting_same_value_keeps_clean() {
    let mut session = EditSession::from_snapshot([("A", "1")]);
    let a = session.find("A").unwrap();
    session.set_raw(a, "1").unwrap();
    assert_eq!(session.entry(a).unwrap().state(), EntryState::Clean);
}

#[test]
fn test_remove_empty_selection_is_noop() {
    let mut session = EditSession::from_snapshot([("A", "1")]);
    session.remove(&[]);
    assert_eq!(session.len(), 1);
    assert!(!session.has_changes());
}

#[test]
fn test_remove_omits_entry_from_snapshot() {
    let mut session = EditSession::from_snapshot([("A", "1"), ("B", "2")]);
    let a = session.find("A").unwrap();
    session.remove(&[a]);

    assert_eq!(session.entry(a).unwrap().state(), EntryState::Removed);
    assert_eq!(session.snapshot(), [("B".to_string(), "2".to_string())]);
    assert!(session.find("A").is_none());
    assert!(session.has_changes());
}

#[test]
fn test_edit_removed_entry_is_rejected() {
    let mut session = EditSession::from_snapshot([("A", "1")]);
    let a = session.find("A").unwrap();
    session.remove(&[a]);

    assert!(matches!(
        session.set_raw(a, "2"),
        Err(EditError::UnknownEntry { .. })
    ));
}

#[test]
fn test_upsert_updates_existing_or_adds() {
    let mut session = EditSession::from_snapshot([("Path", "C:\\A;")]);
    let existing = session.upsert("PATH", "C:\\B;");
    let added = session.upsert("NEW", "x");

    assert_eq!(session.find("path"), Some(existing));
    assert_eq!(session.entry(existing).unwrap().name(), "Path");
    assert_eq!(session.entry(existing).unwrap().raw(), "C:\\B;");
    assert!(!session.entry(added).unwrap().is_persisted());
}

// --- List editor ---

#[test]
fn test_list_editor_requires_list_value() {
    let mut session = EditSession::from_snapshot([("MY_VAR", "hello")]);
    let id = session.find("MY_VAR").unwrap();

    let err = session.open_list_editor(id).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"'MY_VAR' is not a list value");
}

#[test]
fn test_list_editor_insert_and_confirm() {
    let mut session = EditSession::from_snapshot([("Path", "C:\\A;C:\\B;")]);
    let id = session.find("Path").unwrap();

    let mut editor = session.open_list_editor(id).unwrap();
    assert_eq!(editor.items(), ["C:\\A", "C:\\B"]);
    editor.insert(1, "C:\\Mid").unwrap();
    editor.insert(0, "C:\\First").unwrap();
    editor.push("C:\\Last");
    editor.confirm().unwrap();

    let entry = session.entry(id).unwrap();
    assert_eq!(entry.raw(), "C:\\First;C:\\A;C:\\Mid;C:\\B;C:\\Last;");
    assert_eq!(entry.state(), EntryState::Edited);
}

#[test]
fn test_list_editor_remove_replace_move() {
    let mut session = EditSession::from_snapshot([("L", "a;b;c;")]);
    let id = session.find("L").unwrap();

    let mut editor = session.open_list_editor(id).unwrap();
    assert_eq!(editor.remove(1).unwrap(), "b");
    assert_eq!(editor.replace(0, "A").unwrap(), "a");
    editor.push("d");
    editor.move_item(2, 0).unwrap();
    assert_eq!(editor.items(), ["d", "A", "c"]);
    editor.confirm().unwrap();

    assert_eq!(
        session.value(id),
        Some(VariableValue::List(vec![
            "d".to_string(),
            "A".to_string(),
            "c".to_string()
        ]))
    );
}

#[test]
fn test_list_editor_out_of_range() {
    let mut session = EditSession::from_snapshot([("L", "a;b;")]);
    let id = session.find("L").unwrap();

    let mut editor = session.open_list_editor(id).unwrap();
    assert!(editor.insert(2, "end").is_ok());
    let err = editor.insert(5, "x").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"index 5 is out of range for a list of 3 items");
    assert!(editor.remove(3).is_err());
    assert!(editor.move_item(0, 3).is_err());
}

#[test]
fn test_list_editor_cancel_leaves_entry() {
    let mut session = EditSession::from_snapshot([("L", "a;b;")]);
    let id = session.find("L").unwrap();

    let mut editor = session.open_list_editor(id).unwrap();
    editor.push("c");
    editor.cancel();

    let entry = session.entry(id).unwrap();
    assert_eq!(entry.raw(), "a;b;");
    assert_eq!(entry.state(), EntryState::Clean);
}

#[test]
fn test_list_editor_separator_in_item_leaves_entry() {
    let mut session = EditSession::from_snapshot([("L", "a;b;")]);
    let id = session.find("L").unwrap();

    let mut editor = session.open_list_editor(id).unwrap();
    editor.push("c;d");
    let err = editor.confirm().unwrap_err();
    assert!(matches!(err, EvError::Codec(_)));
    assert_eq!(session.entry(id).unwrap().raw(), "a;b;");
}

// --- Commit ---

#[test]
fn test_commit_writes_only_changed_entries() {
    let backend = user_backend();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::from_store(&store).unwrap();
    let notifier = RecordingNotifier::new();

    let var = session.find("MY_VAR").unwrap();
    session.set_raw(var, "world").unwrap();
    let path = session.find("Path").unwrap();
    session.set_raw(path, "C:\\A;C:\\B;C:\\C;").unwrap();
    session.set_raw(path, "C:\\A;C:\\B;").unwrap();

    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.saved, ["MY_VAR"]);
    assert_eq!(report.unchanged, ["Path"]);
    assert!(report.is_success());
    assert_eq!(backend.writes(), 1);
    assert_eq!(notifier.calls(), 1);
    assert_eq!(session.entry(var).unwrap().state(), EntryState::Saved);
    assert_eq!(session.entry(path).unwrap().state(), EntryState::Saved);
    assert_eq!(store.get("MY_VAR").unwrap(), "world");
}

#[test]
fn test_commit_clean_session_makes_no_calls() {
    let backend = user_backend();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::from_store(&store).unwrap();
    let notifier = RecordingNotifier::new();

    let report = session.commit(&store, &notifier, BroadcastPolicy::Batched);
    assert!(report.saved.is_empty());
    assert_eq!(report.broadcasts, 0);
    assert_eq!(backend.writes(), 0);
    assert_eq!(notifier.calls(), 0);
}

#[test]
fn test_commit_creates_new_empty_variable() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    let id = session.add();
    session.rename(id, "NEW_EMPTY").unwrap();
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.saved, ["NEW_EMPTY"]);
    assert!(report.unchanged.is_empty());
    assert_eq!(backend.writes(), 1);
    assert_eq!(notifier.calls(), 1);
    assert_eq!(backend.value(Scope::User, "NEW_EMPTY").as_deref(), Some(""));

    session.remove(&[id]);
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);
    assert_eq!(report.removed, ["NEW_EMPTY"]);
}

#[test]
fn test_commit_existing_empty_variable_is_unchanged() {
    let backend = MemoryBackend::new().with_var(Scope::User, "EMPTY", "");
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    session.upsert("EMPTY", "");
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.unchanged, ["EMPTY"]);
    assert_eq!(backend.writes(), 0);
    assert_eq!(notifier.calls(), 0);
}

#[test]
fn test_remove_never_persisted_entry_makes_no_store_call() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    let id = session.add();
    session.rename(id, "TEMP_VAR").unwrap();
    session.set_raw(id, "x").unwrap();
    session.remove(&[id]);

    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);
    assert!(report.removed.is_empty());
    assert!(report.saved.is_empty());
    assert_eq!(backend.writes(), 0);
    assert_eq!(notifier.calls(), 0);
    assert!(session.entry(id).is_none());
}

#[test]
fn test_remove_persisted_entry_is_reported_not_deleted() {
    let backend = user_backend();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::from_store(&store).unwrap();
    let notifier = RecordingNotifier::new();

    let var = session.find("MY_VAR").unwrap();
    session.remove(&[var]);
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.removed, ["MY_VAR"]);
    assert_eq!(backend.writes(), 0);
    assert_eq!(store.get("MY_VAR").unwrap(), "hello");
    assert!(session.snapshot().iter().all(|(name, _)| name != "MY_VAR"));
}

#[test]
fn test_commit_batched_broadcasts_once() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    session.upsert("A", "1");
    session.upsert("B", "2");
    session.upsert("C", "3");
    let report = session.commit(&store, &notifier, BroadcastPolicy::Batched);

    assert_eq!(report.saved.len(), 3);
    assert_eq!(report.broadcasts, 1);
    assert_eq!(notifier.calls(), 1);
}

#[test]
fn test_commit_per_variable_broadcasts_each() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    session.upsert("A", "1");
    session.upsert("B", "2");
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.broadcasts, 2);
    assert_eq!(notifier.calls(), 2);
}

#[test]
fn test_commit_failure_keeps_entry_edited() {
    let backend = MemoryBackend::new().with_var(Scope::System, "JAVA_HOME", "C:\\Java");
    let store = EnvironmentStore::new(&backend, Scope::System);
    let mut session = EditSession::from_store(&store).unwrap();
    let notifier = RecordingNotifier::new();

    let id = session.find("JAVA_HOME").unwrap();
    session.set_raw(id, "D:\\Java").unwrap();
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].error.is_access_denied());
    assert_eq!(session.entry(id).unwrap().state(), EntryState::Edited);
    assert_eq!(session.entry(id).unwrap().raw(), "D:\\Java");
    assert_eq!(notifier.calls(), 0);

    backend.set_elevated(true);
    let retry = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);
    assert_eq!(retry.saved, ["JAVA_HOME"]);
    assert_eq!(store.get("JAVA_HOME").unwrap(), "D:\\Java");
}

#[test]
fn test_commit_failure_does_not_abort_others() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::new();

    session.upsert("BAD=NAME", "1");
    session.upsert("GOOD", "2");
    let unnamed = session.add();
    let report = session.commit(&store, &notifier, BroadcastPolicy::Batched);

    assert_eq!(report.saved, ["GOOD"]);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[1].id, unnamed);
    assert_eq!(notifier.calls(), 1);
}

#[test]
fn test_commit_notify_failure_keeps_save() {
    let backend = MemoryBackend::new();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::new();
    let notifier = RecordingNotifier::failing();

    let id = session.upsert("A", "1");
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert!(report.is_success());
    assert_eq!(report.notify_failures.len(), 1);
    assert_eq!(session.entry(id).unwrap().state(), EntryState::Saved);
    assert_eq!(store.get("A").unwrap(), "1");
}

#[test]
fn test_rename_writes_new_name_only() {
    let backend = user_backend();
    let store = EnvironmentStore::new(&backend, Scope::User);
    let mut session = EditSession::from_store(&store).unwrap();
    let notifier = RecordingNotifier::new();

    let id = session.find("MY_VAR").unwrap();
    session.rename(id, "OUR_VAR").unwrap();
    let report = session.commit(&store, &notifier, BroadcastPolicy::PerVariable);

    assert_eq!(report.saved, ["OUR_VAR"]);
    assert_eq!(store.get("OUR_VAR").unwrap(), "hello");
    assert_eq!(store.get("MY_VAR").unwrap(), "hello");
}

#[test]
fn test_broadcast_policy_from_batch() {
    assert_eq!(BroadcastPolicy::from_batch(true), BroadcastPolicy::Batched);
    assert_eq!(BroadcastPolicy::from_batch(false), BroadcastPolicy::PerVariable);
    assert_eq!(BroadcastPolicy::default(), BroadcastPolicy::PerVariable);
}
