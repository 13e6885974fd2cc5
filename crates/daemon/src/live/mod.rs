// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live updates: a broadcast of change notices that subscribers turn into
//! fresh activity snapshots or run progress payloads.
//!
//! Delivery is latest-wins. A subscriber that falls behind skips the
//! backlog and rebuilds from the current state.

mod activity;
mod run;

#[cfg(test)]
mod test_helpers;

pub use activity::ActivitySubscription;
pub use run::RunSubscription;

use std::sync::Arc;
use std::time::Duration;

use autosub_core::{Clock, MediaItem, RunId, RunMeta};
use autosub_engine::{Engine, FileProbe, MarkerWriter, MediaSource};
use autosub_storage::{StateStore, StoreState};
use autosub_wire::ActivityQuery;
use tokio::sync::broadcast;

/// Notices buffered per subscriber before it starts lagging.
pub const CHANNEL_CAPACITY: usize = 64;

/// Something that may have changed what subscribers see.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Raw payload from the external side channel
    Message(String),
    /// The stored state was written
    StateChanged,
}

/// Read access subscribers need to build their payloads.
pub trait LiveSource: Send + Sync + 'static {
    fn state(&self) -> StoreState;
    fn run_meta(&self, media: &MediaItem) -> Option<RunMeta>;
    /// Unix seconds
    fn now(&self) -> u64;
}

impl<S, M, F, C> LiveSource for Engine<S, M, F, C>
where
    S: StateStore + 'static,
    M: MediaSource + 'static,
    F: FileProbe + MarkerWriter + 'static,
    C: Clock + 'static,
{
    fn state(&self) -> StoreState {
        self.snapshot()
    }

    fn run_meta(&self, media: &MediaItem) -> Option<RunMeta> {
        self.run_meta_for(media)
    }

    fn now(&self) -> u64 {
        self.clock().epoch_secs()
    }
}

/// Fan-out point for change notices.
#[derive(Debug, Clone)]
pub struct Publisher {
    tx: broadcast::Sender<Notice>,
    tick: Duration,
}

impl Publisher {
    /// `tick` is how often activity subscribers refresh without a notice.
    pub fn new(tick: Duration) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx, tick }
    }

    /// Send a notice; returns how many subscribers received it.
    pub fn publish(&self, notice: Notice) -> usize {
        self.tx.send(notice).unwrap_or(0)
    }

    pub fn message(&self, raw: impl Into<String>) -> usize {
        self.publish(Notice::Message(raw.into()))
    }

    pub fn state_changed(&self) -> usize {
        self.publish(Notice::StateChanged)
    }

    /// Raw notice stream, for consumers that build their own payloads.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn subscribe_activity<V: LiveSource>(
        &self,
        source: Arc<V>,
        query: ActivityQuery,
    ) -> ActivitySubscription<V> {
        ActivitySubscription::new(source, query, self.tx.subscribe(), self.tick)
    }

    pub fn subscribe_run<V: LiveSource>(
        &self,
        source: Arc<V>,
        run_id: impl Into<RunId>,
    ) -> RunSubscription<V> {
        RunSubscription::new(source, run_id.into(), self.tx.subscribe())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
