// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted aggregate: media, runs and the activity log.

mod helpers;

use autosub_core::{
    run_id_for, ActivityItem, MediaId, MediaItem, RunId, RunItem, RunType, ACTIVITY_CAP,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Aggregate root persisted as one snapshot.
///
/// Maps are ordered so equal states serialize to identical bytes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub media: BTreeMap<MediaId, MediaItem>,
    #[serde(default)]
    pub runs: BTreeMap<RunId, RunItem>,
    /// Newest first, at most [`ACTIVITY_CAP`] entries
    #[serde(default)]
    pub activity: Vec<ActivityItem>,
}

impl StoreState {
    /// Get a media item by exact id or unique prefix
    pub fn get_media(&self, id: &str) -> Option<&MediaItem> {
        helpers::find_by_prefix(&self.media, id)
    }

    pub fn get_media_mut(&mut self, id: &str) -> Option<&mut MediaItem> {
        let key = helpers::resolve_key(&self.media, id)?;
        self.media.get_mut(&key)
    }

    pub fn media_by_path(&self, path: &Path) -> Option<&MediaItem> {
        self.media.values().find(|m| m.path == path)
    }

    /// Get a run by exact id or unique prefix
    pub fn get_run(&self, id: &str) -> Option<&RunItem> {
        helpers::find_by_prefix(&self.runs, id)
    }

    /// The run a media item links to, if it still exists.
    pub fn last_run(&self, media: &MediaItem) -> Option<&RunItem> {
        media.last_run_id.as_ref().and_then(|id| self.runs.get(id))
    }

    pub fn runs_for<'a>(&'a self, media_id: &'a MediaId) -> impl Iterator<Item = &'a RunItem> + 'a {
        self.runs.values().filter(move |r| &r.media_id == media_id)
    }

    /// Insert a run, disambiguating its id if another run already holds it.
    pub fn insert_run(&mut self, mut run: RunItem) -> RunId {
        if self.runs.contains_key(&run.id) {
            let base = run.id.clone();
            let mut n = 2u32;
            while self.runs.contains_key(format!("{base}-{n}").as_str()) {
                n += 1;
            }
            run.id = RunId::new(format!("{base}-{n}"));
        }
        let id = run.id.clone();
        self.runs.insert(id.clone(), run);
        id
    }

    /// Open a new running run for a media item and return its id.
    pub fn open_run(&mut self, media_id: &MediaId, run_type: RunType, started_at: u64) -> RunId {
        let id = run_id_for(media_id, run_type, started_at);
        self.insert_run(RunItem::open(id, media_id.clone(), run_type, started_at))
    }

    /// Prepend an activity entry, dropping the oldest beyond the cap.
    pub fn push_activity(&mut self, item: ActivityItem) {
        self.activity.insert(0, item);
        self.activity.truncate(ACTIVITY_CAP);
    }

    /// Remove media items together with their runs and activity entries.
    pub fn remove_media(&mut self, ids: &BTreeSet<MediaId>) {
        if ids.is_empty() {
            return;
        }
        self.media.retain(|id, _| !ids.contains(id));
        self.runs.retain(|_, run| !ids.contains(&run.media_id));
        self.activity.retain(|item| !matches!(&item.media_id, Some(m) if ids.contains(m)));
    }
}

#[cfg(test)]
#[path = "../state_tests/mod.rs"]
mod tests;
