// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User actions against real marker files.

use crate::prelude::*;
use autosub_engine::ForceOptions;

fn finished(ws: &Workspace) -> (SpecEngine, MediaId) {
    let engine = ws.engine();
    ws.touch("movie.mkv", 1);
    ws.touch("movie.srt", 2);
    ws.touch("movie.done", 3);
    ws.touch("movie.translate_failed", 3);
    engine.reconcile().unwrap();
    (engine, ws.id_of("movie.mkv"))
}

#[test]
fn retry_clears_markers_and_triggers_scan() {
    let ws = Workspace::new();
    let (engine, id) = finished(&ws);

    let out = engine.retry_media(id.as_str()).unwrap();

    assert_eq!(out.media.status, MediaStatus::Running);
    assert!(out.warning.is_none());
    assert!(!ws.exists("movie.done"));
    assert!(!ws.exists("movie.translate_failed"));
    assert!(ws.exists("movie.srt"));
    assert_eq!(std::fs::read_to_string(ws.media(".scan_now")).unwrap(), "scan");
}

#[test]
fn force_writes_overrides_beside_source() {
    let ws = Workspace::new();
    let (engine, id) = finished(&ws);

    let options = ForceOptions { force_asr: true, ..ForceOptions::default() };
    engine.force_media(id.as_str(), options).unwrap();

    let job: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.media("movie.job.json")).unwrap()).unwrap();
    assert_eq!(job["force_once"], true);
    assert_eq!(job["force_asr"], true);
    assert_eq!(job["use_existing_subtitle"], false);
    assert_eq!(job["ignore_simplified_subtitle"], true);
}

#[test]
fn archive_survives_reconcile_and_unarchive_restores() {
    let ws = Workspace::new();
    let (engine, id) = finished(&ws);

    engine.archive_media(id.as_str()).unwrap();
    assert!(ws.exists("movie.archived"));
    let out = engine.reconcile().unwrap();
    assert_eq!(out.state.media.get(&id).unwrap().status, MediaStatus::Archived);

    engine.unarchive_media(id.as_str()).unwrap();
    assert!(!ws.exists("movie.archived"));
    let out = engine.reconcile().unwrap();
    // The failure marker is still on disk.
    assert_eq!(out.state.media.get(&id).unwrap().status, MediaStatus::Failed);
}
