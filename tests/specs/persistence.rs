// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The snapshot file across restarts and damage.

use crate::prelude::*;

#[test]
fn state_survives_restart() {
    let ws = Workspace::new();
    ws.touch("a.mkv", 1);
    let first = ws.engine().reconcile().unwrap().state;

    let reopened = JsonFileStore::new(ws.state_file()).load();
    similar_asserts::assert_eq!(first, reopened);
}

#[test]
fn snapshot_is_a_versioned_envelope() {
    let ws = Workspace::new();
    ws.touch("a.mkv", 1);
    ws.engine().reconcile().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.state_file()).unwrap()).unwrap();
    assert_eq!(raw["v"], 1);
    assert!(raw["state"]["media"].is_object());
    assert!(raw["state"]["activity"].is_array());
}

#[test]
fn corrupt_snapshot_starts_over_and_keeps_a_backup() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.state_file().parent().unwrap()).unwrap();
    std::fs::write(ws.state_file(), "{ definitely not json").unwrap();
    ws.touch("a.mkv", 1);

    let out = ws.engine().reconcile().unwrap();

    assert_eq!(out.state.media.len(), 1);
    let backup = ws.state_file().with_extension("bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ definitely not json");
}

#[test]
fn legacy_bare_state_is_upgraded() {
    let ws = Workspace::new();
    std::fs::create_dir_all(ws.state_file().parent().unwrap()).unwrap();
    std::fs::write(ws.state_file(), r#"{"media":{},"runs":{},"activity":[]}"#).unwrap();
    ws.touch("a.mkv", 1);

    let out = ws.engine().reconcile().unwrap();
    assert_eq!(out.state.media.len(), 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.state_file()).unwrap()).unwrap();
    assert_eq!(raw["v"], 1);
}
