// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciliation engine: the only writer of the stored state.

use crate::error::EngineError;
use crate::fs::{FileProbe, MarkerWriter};
use crate::reconcile::{apply_observations, observe, ReconcileReport};
use crate::scanner::MediaSource;
use autosub_core::{Clock, MediaItem, RunMeta, WatchConfig};
use autosub_storage::{StateStore, StoreState};
use parking_lot::{Mutex, MutexGuard};

/// Ports the engine is built from.
pub struct EngineDeps<S, M, F> {
    pub store: S,
    pub source: M,
    pub fs: F,
}

/// State after a reconcile pass, with what the pass changed.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub state: StoreState,
    pub report: ReconcileReport,
}

/// Serialises every load→mutate→save sequence against one store.
pub struct Engine<S, M, F, C: Clock> {
    pub(crate) store: S,
    source: M,
    pub(crate) fs: F,
    pub(crate) clock: C,
    pub(crate) config: WatchConfig,
    writer: Mutex<()>,
}

impl<S, M, F, C> Engine<S, M, F, C>
where
    S: StateStore,
    M: MediaSource,
    F: FileProbe + MarkerWriter,
    C: Clock,
{
    pub fn new(deps: EngineDeps<S, M, F>, clock: C, config: WatchConfig) -> Self {
        Self {
            store: deps.store,
            source: deps.source,
            fs: deps.fs,
            clock,
            config,
            writer: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current stored state, without reconciling.
    pub fn snapshot(&self) -> StoreState {
        self.store.load()
    }

    /// Scan, diff against the stored state and persist the result.
    ///
    /// The store is written only when the pass changed something.
    pub fn reconcile(&self) -> Result<Reconciled, EngineError> {
        let _guard = self.lock();
        let before = self.store.load();
        let observed = observe(&self.source, &self.fs, &self.config, &before);
        let mut state = before.clone();
        let report = apply_observations(&mut state, &observed, &self.config.roots, self.clock.epoch_secs());
        if state != before {
            self.store.save(&state)?;
        }
        tracing::debug!(
            media = state.media.len(),
            added = report.added.len(),
            changed = report.changed.len(),
            removed = report.removed.len(),
            "reconcile pass"
        );
        Ok(Reconciled { state, report })
    }

    /// The worker's run side-file for a media item, if present and valid.
    pub fn run_meta_for(&self, media: &MediaItem) -> Option<RunMeta> {
        let dir = self.config.output_dir_for(&media.path)?;
        let naming = self.config.naming_for(&media.path);
        let raw = self.fs.read_to_string(&dir.join(naming.run_meta_name()))?;
        RunMeta::parse(&raw)
    }

    /// Run `f` against the stored state under the writer lock and save it.
    pub(crate) fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState, u64) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let _guard = self.lock();
        let mut state = self.store.load();
        let out = f(&mut state, self.clock.epoch_secs())?;
        self.store.save(&state)?;
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
