// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity list subscriptions: a filtered snapshot per notice or tick.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use autosub_core::{
    ActivityId, ActivityItem, ActivityStatus, ActivityType, ChannelMessage, LiveFields,
    ProgressFields, RunId, RunMeta,
};
use autosub_engine::query::list_activity_with;
use autosub_wire::{ActivityQuery, ActivitySnapshot, ActivityView};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::{LiveSource, Notice};

/// Stream of activity snapshots for one filter.
pub struct ActivitySubscription<V> {
    source: Arc<V>,
    query: ActivityQuery,
    rx: broadcast::Receiver<Notice>,
    period: Duration,
    interval: Option<Interval>,
    sent_initial: bool,
    /// Latest progress event, shown at the head of the list
    pinned: Option<ActivityView>,
}

impl<V: LiveSource> ActivitySubscription<V> {
    pub(super) fn new(
        source: Arc<V>,
        query: ActivityQuery,
        rx: broadcast::Receiver<Notice>,
        period: Duration,
    ) -> Self {
        Self { source, query, rx, period, interval: None, sent_initial: false, pinned: None }
    }

    pub fn query(&self) -> &ActivityQuery {
        &self.query
    }

    /// The next snapshot: immediately on first call, then on every notice or
    /// tick. `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<ActivitySnapshot> {
        if !self.sent_initial {
            self.sent_initial = true;
            return Some(self.snapshot());
        }
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        tokio::select! {
            received = self.rx.recv() => match received {
                Ok(Notice::Message(raw)) => {
                    if let Some(fields) = ChannelMessage::parse(&raw).progress() {
                        self.pinned = Some(self.progress_view(fields));
                    }
                }
                Ok(Notice::StateChanged) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "activity subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            },
            _ = interval.tick() => {}
        }
        Some(self.snapshot())
    }

    fn snapshot(&self) -> ActivitySnapshot {
        let state = self.source.state();
        let source = &self.source;
        let mut snapshot =
            list_activity_with(&state, &self.query, |media| -> Option<RunMeta> { source.run_meta(media) });
        if let Some(pinned) = self.pinned.as_ref().filter(|p| self.query.matches(&p.item)) {
            let items = &mut snapshot.page.items;
            items.retain(|view| view.item.id != pinned.item.id);
            items.insert(0, pinned.clone());
        }
        snapshot
    }

    /// A synthetic entry for a progress message, keyed by run id or path.
    fn progress_view(&self, fields: &ProgressFields) -> ActivityView {
        let run_id = fields.run_id.as_deref().filter(|s| !s.is_empty());
        let path = fields.path.as_deref().filter(|s| !s.is_empty());
        let key = run_id.or(path).unwrap_or_default();
        let media_id = path.and_then(|p| {
            self.source.state().media_by_path(Path::new(p)).map(|m| m.id.clone())
        });
        let item = ActivityItem {
            id: ActivityId::new(format!("run-{key}")),
            media_id,
            run_id: run_id.map(RunId::from),
            kind: ActivityType::RunProgress,
            status: ActivityStatus::Running,
            message: "run progress updated".to_string(),
            created_at: fields.ts.unwrap_or_else(|| self.source.now()),
        };
        let live = LiveFields {
            stage: fields.stage.clone().filter(|s| !s.is_empty()),
            progress: fields.progress,
            ..LiveFields::default()
        };
        ActivityView { item, live }
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
