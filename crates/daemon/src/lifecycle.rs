// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon wiring and the periodic reconcile loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use autosub_core::{Clock, SystemClock};
use autosub_engine::{
    CachedScanner, Engine, EngineDeps, EngineError, FileProbe, MarkerWriter, MediaSource, RealFs,
    ReconcileReport, WalkdirScanner,
};
use autosub_storage::{JsonFileStore, StateStore};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::Config;
use crate::live::Publisher;

/// Engine with the real filesystem and a JSON snapshot file
pub type DaemonEngine =
    Engine<JsonFileStore, CachedScanner<WalkdirScanner, SystemClock>, RealFs, SystemClock>;

/// A configured daemon, ready to run.
pub struct Daemon {
    pub config: Config,
    pub engine: Arc<DaemonEngine>,
    pub publisher: Publisher,
}

impl Daemon {
    pub fn new(config: Config) -> Self {
        let clock = SystemClock;
        let deps = EngineDeps {
            store: JsonFileStore::new(config.store_path()),
            source: CachedScanner::with_ttl(WalkdirScanner::new(), clock.clone(), config.scan_ttl()),
            fs: RealFs,
        };
        let engine = Arc::new(Engine::new(deps, clock, config.watch.clone()));
        let publisher = Publisher::new(config.live_tick());
        Self { config, engine, publisher }
    }

    /// Reconcile every tick and forward worker messages until `shutdown` resolves.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        info!(
            roots = ?self.config.watch.roots,
            store = %self.config.store_path().display(),
            tick_ms = self.config.tick_ms,
            "daemon started"
        );
        #[cfg(feature = "redis-bridge")]
        let bridge = tokio::spawn(crate::bridge::run(self.config.redis.clone(), self.publisher.clone()));

        reconcile_loop(Arc::clone(&self.engine), self.publisher.clone(), self.config.tick(), shutdown)
            .await;

        #[cfg(feature = "redis-bridge")]
        bridge.abort();
        info!("daemon stopped");
    }
}

/// One reconcile pass; subscribers are notified when it changed anything.
pub fn reconcile_once<S, M, F, C>(
    engine: &Engine<S, M, F, C>,
    publisher: &Publisher,
) -> Result<ReconcileReport, EngineError>
where
    S: StateStore,
    M: MediaSource,
    F: FileProbe + MarkerWriter,
    C: Clock,
{
    let out = engine.reconcile()?;
    if !out.report.is_empty() {
        info!(
            added = out.report.added.len(),
            changed = out.report.changed.len(),
            removed = out.report.removed.len(),
            "state changed"
        );
        publisher.state_changed();
    }
    Ok(out.report)
}

/// Run [`reconcile_once`] every `tick` on the blocking pool.
pub async fn reconcile_loop<S, M, F, C>(
    engine: Arc<Engine<S, M, F, C>>,
    publisher: Publisher,
    tick: Duration,
    shutdown: impl Future<Output = ()>,
) where
    S: StateStore + 'static,
    M: MediaSource + 'static,
    F: FileProbe + MarkerWriter + 'static,
    C: Clock + 'static,
{
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let engine = Arc::clone(&engine);
                let publisher = publisher.clone();
                match tokio::task::spawn_blocking(move || reconcile_once(&engine, &publisher)).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => warn!(error = %e, "reconcile failed"),
                    Err(e) => warn!(error = %e, "reconcile task failed"),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
