// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run progress subscriptions.

use std::sync::Arc;

use autosub_core::{ChannelMessage, RunId};
use autosub_wire::RunProgress;
use tokio::sync::broadcast::{self, error::RecvError};

use super::{LiveSource, Notice};

/// Stream of progress payloads for one run.
pub struct RunSubscription<V> {
    source: Arc<V>,
    run_id: RunId,
    rx: broadcast::Receiver<Notice>,
    sent_initial: bool,
}

impl<V: LiveSource> RunSubscription<V> {
    pub(super) fn new(source: Arc<V>, run_id: RunId, rx: broadcast::Receiver<Notice>) -> Self {
        Self { source, run_id, rx, sent_initial: false }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// The next payload. A progress message naming this run is relayed as
    /// is; anything else rebuilds from the store. Notices arriving while the
    /// run is unknown are skipped. `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<RunProgress> {
        if !self.sent_initial {
            self.sent_initial = true;
            if let Some(payload) = self.rebuild() {
                return Some(payload);
            }
        }
        loop {
            match self.rx.recv().await {
                Ok(Notice::Message(raw)) => {
                    let message = ChannelMessage::parse(&raw);
                    let direct = message
                        .progress()
                        .filter(|f| f.run_id.as_deref() == Some(self.run_id.as_str()));
                    if let Some(fields) = direct {
                        return Some(RunProgress::from_message(
                            self.run_id.clone(),
                            fields,
                            self.source.now(),
                        ));
                    }
                }
                Ok(Notice::StateChanged) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(run_id = %self.run_id, skipped, "run subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
            if let Some(payload) = self.rebuild() {
                return Some(payload);
            }
        }
    }

    fn rebuild(&self) -> Option<RunProgress> {
        let state = self.source.state();
        let run = state.runs.get(&self.run_id)?;
        let meta = state.media.get(&run.media_id).and_then(|m| self.source.run_meta(m));
        Some(RunProgress::from_run(run, meta.as_ref(), self.source.now()))
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
