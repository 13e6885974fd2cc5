// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use autosub_core::{LiveFields, MediaItem, RunItem, RunMeta};
use autosub_storage::StoreState;
use autosub_wire::RunView;

/// Runs, newest first, optionally only those of one media item.
pub fn list_runs(state: &StoreState, media_id: Option<&str>) -> Vec<RunItem> {
    let mut runs: Vec<RunItem> = state
        .runs
        .values()
        .filter(|r| media_id.map_or(true, |id| r.media_id == id))
        .cloned()
        .collect();
    runs.sort_by(|a, b| b.started_at.cmp(&a.started_at).then_with(|| b.id.cmp(&a.id)));
    runs
}

/// A run with its media's details and live progress attached.
pub fn run_view(
    state: &StoreState,
    run_id: &str,
    run_meta: impl Fn(&MediaItem) -> Option<RunMeta>,
) -> Option<RunView> {
    let run = state.get_run(run_id)?.clone();
    let Some(media) = state.media.get(&run.media_id) else {
        return Some(RunView { run, outputs: None, live: LiveFields::default() });
    };
    let meta = run_meta(media);
    let live = LiveFields {
        media_title: Some(media.title.clone()),
        media_path: Some(media.path.display().to_string()),
        progress: meta.as_ref().and_then(|m| m.progress),
        stage: meta.as_ref().and_then(|m| m.stage.clone()).or_else(|| run.stage.clone()),
        asr_model: meta.as_ref().and_then(|m| m.asr_model.clone()),
        llm_model: meta.as_ref().and_then(|m| m.llm_model.clone()),
    };
    Some(RunView { run, outputs: Some(media.outputs.clone()), live })
}

#[cfg(test)]
#[path = "runs_tests.rs"]
mod tests;
