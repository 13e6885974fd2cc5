// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Mutex;

use autosub_core::{MediaId, MediaItem, RunMeta};
use autosub_storage::StoreState;

use super::LiveSource;

/// In-memory [`LiveSource`] with a fixed clock.
pub(crate) struct FakeSource {
    state: Mutex<StoreState>,
    meta: Mutex<HashMap<MediaId, RunMeta>>,
    pub now: u64,
}

impl FakeSource {
    pub fn new(state: StoreState) -> Self {
        Self { state: Mutex::new(state), meta: Mutex::new(HashMap::new()), now: 9_000 }
    }

    pub fn update(&self, f: impl FnOnce(&mut StoreState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn set_meta(&self, media: &MediaId, meta: RunMeta) {
        self.meta.lock().unwrap().insert(media.clone(), meta);
    }
}

impl LiveSource for FakeSource {
    fn state(&self) -> StoreState {
        self.state.lock().unwrap().clone()
    }

    fn run_meta(&self, media: &MediaItem) -> Option<RunMeta> {
        self.meta.lock().unwrap().get(&media.id).cloned()
    }

    fn now(&self) -> u64 {
        self.now
    }
}
