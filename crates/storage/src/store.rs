// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `StateStore` port and its implementations.

use crate::migration::{MigrationError, MigrationRegistry};
use crate::snapshot::{rotate_bak_path, tmp_path, Snapshot, CURRENT_SNAPSHOT_VERSION};
use crate::state::StoreState;
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Load/save access to the persisted [`StoreState`].
///
/// `load` never fails: a missing or unreadable snapshot is an empty state.
pub trait StateStore: Send + Sync {
    fn load(&self) -> StoreState;
    fn save(&self, state: &StoreState) -> Result<(), StoreError>;
}

/// Snapshot stored as pretty JSON in a single file.
pub struct JsonFileStore {
    path: PathBuf,
    seq: Mutex<u64>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), seq: Mutex::new(0) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequence number of the last snapshot read or written
    pub fn seq(&self) -> u64 {
        *self.seq.lock()
    }

    fn read_snapshot(&self, raw: &str) -> Result<Snapshot, StoreError> {
        let doc: serde_json::Value = serde_json::from_str(raw)?;
        let doc = MigrationRegistry::new().migrate_to(doc, CURRENT_SNAPSHOT_VERSION)?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Move an unparseable snapshot aside so the next save doesn't destroy it.
    fn quarantine(&self) {
        let bak = rotate_bak_path(&self.path);
        match fs::rename(&self.path, &bak) {
            Ok(()) => tracing::warn!(path = %bak.display(), "moved corrupt snapshot aside"),
            Err(e) => tracing::warn!(error = %e, "failed to move corrupt snapshot aside"),
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> StoreState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return StoreState::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable");
                return StoreState::default();
            }
        };
        match self.read_snapshot(&raw) {
            Ok(snapshot) => {
                *self.seq.lock() = snapshot.seq;
                tracing::debug!(
                    seq = snapshot.seq,
                    media = snapshot.state.media.len(),
                    "loaded snapshot"
                );
                snapshot.state
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt snapshot, starting empty");
                self.quarantine();
                StoreState::default()
            }
        }
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        let mut seq = self.seq.lock();
        let snapshot = Snapshot::new(*seq + 1, state.clone());
        let json = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        *seq = snapshot.seq;
        tracing::trace!(seq = *seq, "saved snapshot");
        Ok(())
    }
}

/// In-process store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    saves: Mutex<u64>,
}

impl MemoryStore {
    pub fn new(state: StoreState) -> Self {
        Self { state: Mutex::new(state), saves: Mutex::new(0) }
    }

    /// How many times `save` has been called
    pub fn saves(&self) -> u64 {
        *self.saves.lock()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> StoreState {
        self.state.lock().clone()
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        *self.state.lock() = state.clone();
        *self.saves.lock() += 1;
        Ok(())
    }
}

impl<T: StateStore + ?Sized> StateStore for std::sync::Arc<T> {
    fn load(&self) -> StoreState {
        (**self).load()
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
