// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use autosub_core::{ActivityType, FakeClock, WatchConfig};
use autosub_engine::{EngineDeps, FakeFs};
use autosub_storage::MemoryStore;

#[test]
fn publish_without_subscribers_reaches_nobody() {
    let publisher = Publisher::new(Duration::from_secs(1));
    assert_eq!(publisher.state_changed(), 0);
    assert_eq!(publisher.message("{}"), 0);
}

#[tokio::test]
async fn dropping_a_subscription_unregisters_it() {
    let publisher = Publisher::new(Duration::from_secs(1));
    let source = Arc::new(test_helpers::FakeSource::new(StoreState::default()));
    let activity = publisher.subscribe_activity(Arc::clone(&source), ActivityQuery::default());
    let run = publisher.subscribe_run(source, "r");
    assert_eq!(publisher.subscriber_count(), 2);

    drop(activity);
    assert_eq!(publisher.subscriber_count(), 1);
    drop(run);
    assert_eq!(publisher.subscriber_count(), 0);
}

#[tokio::test]
async fn engine_feeds_subscribers() {
    let fs = FakeFs::new();
    fs.touch("/media/movie.mkv", 10);
    fs.put("/media/movie.run.json", r#"{"stage":"asr","progress":0.5}"#, 10);
    let clock = FakeClock::new();
    clock.set_epoch_secs(4_000);
    let engine = Arc::new(Engine::new(
        EngineDeps { store: MemoryStore::new(StoreState::default()), source: fs.clone(), fs },
        clock,
        WatchConfig::with_roots(["/media"]),
    ));
    engine.reconcile().unwrap();

    let publisher = Publisher::new(Duration::from_secs(3600));
    let mut sub = publisher.subscribe_activity(engine, ActivityQuery::default());
    let snapshot = sub.next().await.unwrap();

    let added = &snapshot.page.items[0];
    assert_eq!(added.item.kind, ActivityType::MediaAdded);
    assert_eq!(added.item.created_at, 4_000);
    assert_eq!(added.live.media_title.as_deref(), Some("movie.mkv"));
    assert_eq!(added.live.stage.as_deref(), Some("asr"));
    assert_eq!(added.live.progress, Some(0.5));
}
