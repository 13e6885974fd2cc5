// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::live::test_helpers::FakeSource;
use crate::live::Publisher;
use autosub_core::test_support::media_at;
use autosub_core::{MediaItem, MediaStatus, RunMeta, RunType};
use autosub_storage::StoreState;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

fn fixture() -> (Arc<FakeSource>, MediaItem, RunId) {
    let mut state = StoreState::default();
    let media = media_at("/m/movie.mkv", MediaStatus::Running, 10);
    state.media.insert(media.id.clone(), media.clone());
    let run_id = state.open_run(&media.id, RunType::Pipeline, 100);
    (Arc::new(FakeSource::new(state)), media, run_id)
}

fn publisher() -> Publisher {
    Publisher::new(Duration::from_secs(3600))
}

#[tokio::test]
async fn initial_payload_overlays_run_meta() {
    let (source, media, run_id) = fixture();
    source.set_meta(
        &media.id,
        RunMeta {
            stage: Some("translate".into()),
            progress: Some(0.6),
            asr_model: Some("large-v3".into()),
            ..RunMeta::default()
        },
    );
    let publisher = publisher();
    let mut sub = publisher.subscribe_run(source, run_id.clone());

    let payload = timeout(WAIT, sub.next()).await.unwrap().unwrap();
    assert_eq!(payload.run_id, run_id);
    assert_eq!(payload.status.as_deref(), Some("running"));
    assert_eq!(payload.stage.as_deref(), Some("translate"));
    assert_eq!(payload.progress, Some(0.6));
    assert_eq!(payload.asr_model.as_deref(), Some("large-v3"));
    assert_eq!(payload.ts, 9_000);
}

#[tokio::test]
async fn matching_message_is_relayed() {
    let (source, _, run_id) = fixture();
    let publisher = publisher();
    let mut sub = publisher.subscribe_run(source, run_id.clone());
    sub.next().await.unwrap();

    publisher.message(format!(
        r#"{{"event":"run_progress","run_id":"{run_id}","status":"running","stage":"asr","progress":0.25,"ts":120}}"#
    ));
    let payload = timeout(WAIT, sub.next()).await.unwrap().unwrap();
    assert_eq!(payload.stage.as_deref(), Some("asr"));
    assert_eq!(payload.progress, Some(0.25));
    assert_eq!(payload.ts, 120);
    assert!(payload.asr_model.is_none());
}

#[tokio::test]
async fn other_messages_rebuild_from_store() {
    let (source, _, run_id) = fixture();
    let publisher = publisher();
    let mut sub = publisher.subscribe_run(Arc::clone(&source), run_id.clone());
    sub.next().await.unwrap();

    source.update(|state| {
        if let Some(run) = state.runs.get_mut(&run_id) {
            run.stage = Some("segment".into());
        }
    });
    publisher.message(r#"{"event":"run_progress","run_id":"someone-else","progress":0.9}"#);

    let payload = timeout(WAIT, sub.next()).await.unwrap().unwrap();
    assert_eq!(payload.stage.as_deref(), Some("segment"));
    assert!(payload.progress.is_none());
}

#[tokio::test]
async fn unknown_run_waits_until_it_exists() {
    let (source, media, _) = fixture();
    let publisher = publisher();
    let mut sub = publisher.subscribe_run(Arc::clone(&source), "later-run");

    publisher.state_changed();
    source.update(|state| {
        let mut run = autosub_core::RunItem::open(RunId::new("later-run"), media.id.clone(), RunType::Asr, 500);
        run.stage = Some("asr".into());
        state.runs.insert(run.id.clone(), run);
    });
    publisher.state_changed();

    let payload = timeout(WAIT, sub.next()).await.unwrap().unwrap();
    assert_eq!(payload.run_id, "later-run");
    assert_eq!(payload.stage.as_deref(), Some("asr"));
}

#[tokio::test]
async fn closed_publisher_ends_run_subscription() {
    let (source, _, run_id) = fixture();
    let publisher = publisher();
    let mut sub = publisher.subscribe_run(source, run_id);
    sub.next().await.unwrap();
    drop(publisher);
    assert!(timeout(WAIT, sub.next()).await.unwrap().is_none());
}
