// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use autosub_core::{MediaItem, MediaStatus};
use autosub_storage::StoreState;
use autosub_wire::{StatusCounts, Summary};

/// How many recent failed/done items the summary lists.
pub const RECENT_LIMIT: usize = 5;

pub fn build_summary(state: &StoreState) -> Summary {
    let mut counts = StatusCounts { total: state.media.len(), ..StatusCounts::default() };
    for item in state.media.values() {
        match item.status {
            MediaStatus::Pending => counts.pending += 1,
            MediaStatus::Running => counts.running += 1,
            MediaStatus::Failed => counts.failed += 1,
            MediaStatus::Done => counts.done += 1,
            MediaStatus::Archived => counts.archived += 1,
        }
        if item.missing_zh() {
            counts.missing_zh += 1;
        }
    }
    Summary {
        counts,
        recent_failed: recent(state, MediaStatus::Failed),
        recent_done: recent(state, MediaStatus::Done),
    }
}

fn recent(state: &StoreState, status: MediaStatus) -> Vec<MediaItem> {
    let mut items: Vec<&MediaItem> = state.media.values().filter(|m| m.status == status).collect();
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
    items.into_iter().take(RECENT_LIMIT).cloned().collect()
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
