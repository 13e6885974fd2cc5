// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A media file's full life: discovered, processed, finished, removed.

use crate::prelude::*;
use std::time::Duration;

#[test]
fn media_lifecycle_end_to_end() {
    let ws = Workspace::new();
    let engine = ws.engine();
    let id = ws.id_of("movie.mp4");

    // Discovered
    ws.touch("movie.mp4", 900_000);
    let out = engine.reconcile().unwrap();
    let media = out.state.media.get(&id).unwrap();
    assert_eq!(media.status, MediaStatus::Pending);
    assert_eq!(media.title, "movie.mp4");
    assert_eq!(out.state.activity.len(), 1);
    assert_eq!(out.state.activity[0].kind, ActivityType::MediaAdded);

    // Worker picks it up
    ws.clock.advance(Duration::from_secs(10));
    ws.touch("movie.lock", 1_000_005);
    let out = engine.reconcile().unwrap();
    let media = out.state.media.get(&id).unwrap();
    assert_eq!(media.status, MediaStatus::Running);
    let run = out.state.last_run(media).unwrap();
    assert_eq!(run.status, RunStatus::Running);
    assert_eq!(run.started_at, 1_000_010);

    // Worker finishes
    ws.clock.advance(Duration::from_secs(60));
    ws.remove("movie.lock");
    ws.write("movie.srt", "1\n00:00:01,000 --> 00:00:02,000\nhi\n", 1_000_040);
    ws.write("movie.zh.srt", "1\n00:00:01,000 --> 00:00:02,000\n你好\n", 1_000_050);
    ws.touch("movie.done", 1_000_055);
    let out = engine.reconcile().unwrap();
    let media = out.state.media.get(&id).unwrap();
    assert_eq!(media.status, MediaStatus::Done);
    assert!(media.outputs.raw.is_some());
    assert!(media.outputs.zh.is_some());
    let run = out.state.last_run(media).unwrap();
    assert_eq!(run.status, RunStatus::Done);
    assert_eq!(run.finished_at, Some(1_000_050));
    let kinds: Vec<_> = out.state.activity.iter().take(3).map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![ActivityType::StageTranslateDone, ActivityType::StageAsrDone, ActivityType::StatusChange]
    );

    // Nothing changed on disk: nothing changes in the store
    let before = std::fs::read_to_string(ws.state_file()).unwrap();
    ws.clock.advance(Duration::from_secs(60));
    let out = engine.reconcile().unwrap();
    assert!(out.report.is_empty());
    similar_asserts::assert_eq!(before, std::fs::read_to_string(ws.state_file()).unwrap());

    // Source deleted
    ws.remove("movie.mp4");
    let out = engine.reconcile().unwrap();
    assert!(out.state.media.is_empty());
    assert!(out.state.runs.is_empty());
    assert!(out.state.activity.is_empty());
}

#[test]
fn failure_marker_fails_the_run() {
    let ws = Workspace::new();
    let engine = ws.engine();
    ws.touch("show/ep1.mkv", 900_000);
    engine.reconcile().unwrap();
    ws.touch("show/ep1.lock", 900_100);
    engine.reconcile().unwrap();

    ws.remove("show/ep1.lock");
    ws.write("show/ep1.translate_failed.log", "llm timeout", 950_000);
    let out = engine.reconcile().unwrap();

    let media = out.state.media.get(&ws.id_of("show/ep1.mkv")).unwrap();
    assert_eq!(media.status, MediaStatus::Failed);
    let run = out.state.last_run(media).unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.error.as_deref(), Some("translate_failed"));
    let log = ws.media("show/ep1.translate_failed.log").display().to_string();
    assert_eq!(run.log_ref.as_deref(), Some(log.as_str()));
}

#[test]
fn identity_is_stable_across_engines() {
    let ws = Workspace::new();
    ws.touch("a.mkv", 1);
    ws.touch("nested/b.webm", 2);
    ws.touch("notes.txt", 3);

    let first = ws.engine().reconcile().unwrap().state;
    let second = ws.engine().reconcile().unwrap().state;

    assert_eq!(first.media.len(), 2);
    similar_asserts::assert_eq!(first, second);
    assert!(first.media.contains_key(&ws.id_of("nested/b.webm")));
}

#[test]
fn media_outside_roots_survives_root_change() {
    let ws = Workspace::new();
    ws.touch("a.mkv", 1);
    ws.engine().reconcile().unwrap();

    let other = tempfile::tempdir().unwrap();
    let engine = Engine::new(
        EngineDeps {
            store: JsonFileStore::new(ws.state_file()),
            source: WalkdirScanner::new(),
            fs: RealFs,
        },
        ws.clock.clone(),
        WatchConfig::with_roots([other.path()]),
    );
    let out = engine.reconcile().unwrap();
    assert!(out.state.media.contains_key(&ws.id_of("a.mkv")));
}
