// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use autosub_core::test_support::{activity, media_at};
use autosub_core::{ActivityStatus, ActivityType, MediaStatus, RunStatus};

fn state_with(paths: &[&str]) -> StoreState {
    let mut state = StoreState::default();
    for p in paths {
        let m = media_at(p, MediaStatus::Pending, 1_000);
        state.media.insert(m.id.clone(), m);
    }
    state
}

// ── Lookup ───────────────────────────────────────────────────────────────────

#[test]
fn get_media_by_exact_id_and_unique_prefix() {
    let state = state_with(&["/m/a.mp4"]);
    let id = MediaId::for_path(Path::new("/m/a.mp4"));
    assert!(state.get_media(&id).is_some());
    assert!(state.get_media(id.short(8)).is_some());
    assert!(state.get_media("").is_none());
}

#[test]
fn ambiguous_prefix_resolves_nothing() {
    let mut state = StoreState::default();
    for id in ["abc1", "abc2"] {
        let m = autosub_core::MediaItem::builder().id(id).build();
        state.media.insert(m.id.clone(), m);
    }
    assert!(state.get_media("abc").is_none());
    assert!(state.get_media("abc2").is_some());
    assert!(state.get_media_mut("abc").is_none());
}

#[test]
fn media_by_path_finds_item() {
    let state = state_with(&["/m/a.mp4", "/m/b.mp4"]);
    assert_eq!(state.media_by_path(Path::new("/m/b.mp4")).unwrap().title, "b.mp4");
    assert!(state.media_by_path(Path::new("/m/c.mp4")).is_none());
}

// ── Runs ─────────────────────────────────────────────────────────────────────

#[test]
fn open_run_disambiguates_same_second() {
    let mut state = StoreState::default();
    let media = MediaId::new("m1");
    let first = state.open_run(&media, RunType::Pipeline, 50);
    let second = state.open_run(&media, RunType::Pipeline, 50);
    let third = state.open_run(&media, RunType::Pipeline, 50);
    assert_eq!(first, "m1-pipeline-50");
    assert_eq!(second, "m1-pipeline-50-2");
    assert_eq!(third, "m1-pipeline-50-3");
    assert_eq!(state.runs_for(&media).count(), 3);
    assert!(state.runs.values().all(|r| r.status == RunStatus::Running));
}

#[test]
fn last_run_follows_link() {
    let mut state = state_with(&["/m/a.mp4"]);
    let id = MediaId::for_path(Path::new("/m/a.mp4"));
    let run = state.open_run(&id, RunType::Pipeline, 5);
    state.get_media_mut(&id).unwrap().last_run_id = Some(run.clone());
    let media = state.media[&id].clone();
    assert_eq!(state.last_run(&media).unwrap().id, run);
}

// ── Activity ─────────────────────────────────────────────────────────────────

#[test]
fn push_activity_is_newest_first_and_capped() {
    let mut state = StoreState::default();
    for i in 0..(ACTIVITY_CAP as u64 + 10) {
        state.push_activity(activity("m", ActivityType::StatusChange, ActivityStatus::Done, i));
    }
    assert_eq!(state.activity.len(), ACTIVITY_CAP);
    assert_eq!(state.activity[0].created_at, ACTIVITY_CAP as u64 + 9);
    assert_eq!(state.activity.last().unwrap().created_at, 10);
}

// ── Cascade removal ──────────────────────────────────────────────────────────

#[test]
fn remove_media_cascades_to_runs_and_activity() {
    let mut state = state_with(&["/m/a.mp4", "/m/b.mp4"]);
    let a = MediaId::for_path(Path::new("/m/a.mp4"));
    let b = MediaId::for_path(Path::new("/m/b.mp4"));
    state.open_run(&a, RunType::Pipeline, 1);
    state.open_run(&b, RunType::Pipeline, 1);
    state.push_activity(activity(&a, ActivityType::MediaAdded, ActivityStatus::Info, 1));
    state.push_activity(activity(&b, ActivityType::MediaAdded, ActivityStatus::Info, 1));
    let mut unowned = activity("x", ActivityType::RunProgress, ActivityStatus::Running, 2);
    unowned.media_id = None;
    state.push_activity(unowned);

    state.remove_media(&BTreeSet::from([a.clone()]));

    assert!(!state.media.contains_key(&a));
    assert!(state.media.contains_key(&b));
    assert_eq!(state.runs.len(), 1);
    assert!(state.runs.values().all(|r| r.media_id == b));
    assert_eq!(state.activity.len(), 2);
    assert!(state.activity.iter().all(|i| i.media_id.as_ref() != Some(&a)));
}

#[test]
fn serialization_is_stable() {
    let mut state = state_with(&["/m/b.mp4", "/m/a.mp4", "/m/c.mp4"]);
    state.push_activity(activity("m", ActivityType::MediaAdded, ActivityStatus::Info, 1));
    let first = serde_json::to_string(&state).unwrap();
    let reparsed: StoreState = serde_json::from_str(&first).unwrap();
    assert_eq!(serde_json::to_string(&reparsed).unwrap(), first);
    assert_eq!(reparsed, state);
}

#[test]
fn missing_sections_default_to_empty() {
    let state: StoreState = serde_json::from_str("{}").unwrap();
    assert!(state.media.is_empty() && state.runs.is_empty() && state.activity.is_empty());
}
