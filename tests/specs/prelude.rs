// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: a temp watch root and an engine over it.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

pub use autosub_core::{
    ActivityType, FakeClock, MediaId, MediaItem, MediaStatus, RunStatus, WatchConfig,
};
pub use autosub_engine::{Engine, EngineDeps, RealFs, WalkdirScanner};
pub use autosub_storage::{JsonFileStore, StateStore, StoreState};

pub type SpecEngine = Engine<JsonFileStore, WalkdirScanner, RealFs, FakeClock>;

/// A temporary directory holding a watch root and a state file.
pub struct Workspace {
    dir: tempfile::TempDir,
    pub clock: FakeClock,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("media")).unwrap();
        let clock = FakeClock::new();
        clock.set_epoch_secs(1_000_000);
        Self { dir, clock }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.path().join("state").join("state.json")
    }

    pub fn media(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    pub fn config(&self) -> WatchConfig {
        WatchConfig::with_roots([self.root()])
    }

    pub fn engine(&self) -> SpecEngine {
        Engine::new(
            EngineDeps {
                store: JsonFileStore::new(self.state_file()),
                source: WalkdirScanner::new(),
                fs: RealFs,
            },
            self.clock.clone(),
            self.config(),
        )
    }

    /// Create (or overwrite) `name` under the root with the given mtime.
    pub fn write(&self, name: &str, contents: &str, mtime: u64) -> PathBuf {
        let path = self.media(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        set_mtime(&path, mtime);
        path
    }

    pub fn touch(&self, name: &str, mtime: u64) -> PathBuf {
        self.write(name, "", mtime)
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.media(name)).unwrap();
    }

    pub fn exists(&self, name: &str) -> bool {
        self.media(name).exists()
    }

    pub fn id_of(&self, name: &str) -> MediaId {
        MediaId::for_path(&self.media(name))
    }
}

pub fn set_mtime(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
}
