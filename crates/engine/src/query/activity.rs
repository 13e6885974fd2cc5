// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use autosub_core::{ActivityItem, LiveFields, MediaItem, RunMeta};
use autosub_storage::StoreState;
use autosub_wire::{ActivityCounts, ActivityPage, ActivityQuery, ActivityView, Page};

/// Filter and paginate the activity log, attaching media title and path.
pub fn list_activity(state: &StoreState, query: &ActivityQuery) -> ActivityPage {
    list_activity_with(state, query, |_| None)
}

/// As [`list_activity`], also attaching live fields from `run_meta`.
pub fn list_activity_with(
    state: &StoreState,
    query: &ActivityQuery,
    run_meta: impl Fn(&MediaItem) -> Option<RunMeta>,
) -> ActivityPage {
    let matching: Vec<&ActivityItem> = state.activity.iter().filter(|i| query.matches(i)).collect();
    let page = Page::from_slice(&matching, query.page).map(|item| view_for(state, item, &run_meta));
    ActivityPage { page, counts: activity_counts(state, query) }
}

/// Counts over the whole log; the status breakdown honours the type filter.
pub fn activity_counts(state: &StoreState, query: &ActivityQuery) -> ActivityCounts {
    let mut counts = ActivityCounts { total: state.activity.len(), ..ActivityCounts::default() };
    for item in &state.activity {
        *counts.by_type.entry(item.kind).or_default() += 1;
        if query.matches_kind(item.kind) {
            *counts.by_status.entry(item.status).or_default() += 1;
            if item.status.is_processing() {
                counts.processing += 1;
            }
        }
    }
    counts
}

/// Attach read-time fields to one entry.
pub fn view_for(
    state: &StoreState,
    item: &ActivityItem,
    run_meta: impl Fn(&MediaItem) -> Option<RunMeta>,
) -> ActivityView {
    let Some(media) = item.media_id.as_ref().and_then(|id| state.media.get(id)) else {
        return ActivityView::from(item.clone());
    };
    let meta = run_meta(media);
    ActivityView {
        item: item.clone(),
        live: LiveFields {
            media_title: Some(media.title.clone()),
            media_path: Some(media.path.display().to_string()),
            progress: meta.as_ref().and_then(|m| m.progress),
            stage: meta.as_ref().and_then(|m| m.stage.clone()),
            asr_model: meta.as_ref().and_then(|m| m.asr_model.clone()),
            llm_model: meta.as_ref().and_then(|m| m.llm_model.clone()),
        },
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
