// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation: observed filesystem reality merged into the stored model.
//!
//! Split in two halves. [`observe`] reads the filesystem ports and produces
//! plain data; [`apply_observations`] is a pure diff of that data against a
//! [`StoreState`]. Running the pair twice against an unchanged filesystem
//! leaves the state untouched the second time.

use crate::fs::FileProbe;
use crate::resolver::{resolve, Observation};
use crate::scanner::MediaSource;
use autosub_core::{
    ActivityItem, ActivityStatus, ActivityType, MediaId, MediaItem, MediaStatus, RunId, RunItem,
    RunMeta, RunStatus, RunType, WatchConfig,
};
use autosub_storage::StoreState;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One discovered media file and what its output directory says.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedMedia {
    pub id: MediaId,
    pub path: PathBuf,
    pub observation: Observation,
}

/// Result of one observation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations {
    /// Discovered files, newest first
    pub media: Vec<ObservedMedia>,
    /// Known media the scan did not list but whose file still exists
    /// (for example below a non-recursive root). These are never pruned.
    pub unlisted: BTreeSet<MediaId>,
}

/// What a reconcile pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<MediaId>,
    pub changed: Vec<MediaId>,
    pub removed: Vec<MediaId>,
    pub runs_opened: usize,
    pub runs_closed: usize,
    pub activity_added: usize,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.changed.is_empty()
            && self.removed.is_empty()
            && self.runs_opened == 0
            && self.runs_closed == 0
            && self.activity_added == 0
    }
}

/// Scan the roots and resolve every file found.
pub fn observe<M, P>(source: &M, probe: &P, config: &WatchConfig, state: &StoreState) -> Observations
where
    M: MediaSource + ?Sized,
    P: FileProbe + ?Sized,
{
    let mut seen = BTreeSet::new();
    let mut media = Vec::new();
    for file in source.scan(&config.roots, config.recursive) {
        let id = MediaId::for_path(&file.path);
        if !seen.insert(id.clone()) {
            continue;
        }
        let archived = state.media.get(&id).is_some_and(|m| m.archived);
        let naming = config.naming_for(&file.path);
        let output_dir = config.output_dir_for(&file.path);
        let observation = resolve(probe, &naming, output_dir.as_deref(), archived);
        media.push(ObservedMedia { id, path: file.path, observation });
    }

    let unlisted = state
        .media
        .values()
        .filter(|m| !seen.contains(&m.id) && config.contains(&m.path) && probe.is_file(&m.path))
        .map(|m| m.id.clone())
        .collect();

    Observations { media, unlisted }
}

/// Merge observations into `state`.
///
/// Media not observed are removed when they lie inside one of `roots`;
/// anything outside every root is left alone, as is everything when no
/// roots are configured.
pub fn apply_observations(
    state: &mut StoreState,
    observed: &Observations,
    roots: &[PathBuf],
    now: u64,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut seen = BTreeSet::new();

    for item in &observed.media {
        seen.insert(item.id.clone());
        if state.media.contains_key(&item.id) {
            apply_existing(state, item, now, &mut report);
        } else {
            apply_new(state, item, now, &mut report);
        }
    }

    prune(state, roots, &seen, &observed.unlisted, &mut report);
    report
}

fn apply_new(state: &mut StoreState, item: &ObservedMedia, now: u64, report: &mut ReconcileReport) {
    let obs = &item.observation;
    let media = MediaItem::discovered(item.path.clone(), obs.status, obs.outputs.clone(), now);
    tracing::info!(media_id = %media.id, path = %media.path.display(), status = %media.status, "media added");
    state.push_activity(ActivityItem::for_media(
        &media.id,
        "added",
        ActivityType::MediaAdded,
        ActivityStatus::Info,
        "new media discovered",
        now,
    ));
    state.media.insert(media.id.clone(), media);
    report.added.push(item.id.clone());
    report.activity_added += 1;
}

fn apply_existing(
    state: &mut StoreState,
    item: &ObservedMedia,
    now: u64,
    report: &mut ReconcileReport,
) {
    let obs = &item.observation;
    let Some(existing) = state.media.get(&item.id).cloned() else {
        return;
    };

    let status_changed = existing.status != obs.status;
    if !status_changed && !existing.outputs.differs_from(&obs.outputs) {
        if let Some(media) = state.media.get_mut(&item.id) {
            media.outputs = obs.outputs.clone();
        }
        if obs.status.is_terminal() {
            if let Some(run_id) = &existing.last_run_id {
                let target = obs.run_meta.as_ref().and_then(|m| nonzero(m.finished_at)).or(obs.completion_ts);
                if let (Some(target), Some(run)) = (target, state.runs.get_mut(run_id)) {
                    if run.tighten_finish(target) {
                        tracing::debug!(run_id = %run.id, finished_at = target, "run finish tightened");
                    }
                }
            }
        }
        return;
    }

    let finished_run = existing.status == MediaStatus::Running && obs.status.is_terminal();
    let asr_done = obs.outputs.raw.is_some() && (existing.outputs.raw.is_none() || finished_run);
    let translate_done = obs.outputs.zh.is_some() && (existing.outputs.zh.is_none() || finished_run);

    let last_run_id = sync_run_for_status(state, &existing, obs, now, report);
    if let Some(media) = state.media.get_mut(&item.id) {
        media.status = obs.status;
        media.outputs = obs.outputs.clone();
        media.updated_at = now;
        media.last_run_id = last_run_id.clone();
    }
    report.changed.push(item.id.clone());

    let id = &item.id;
    if status_changed {
        tracing::info!(media_id = %id, from = %existing.status, to = %obs.status, "media status changed");
        push(
            state,
            report,
            ActivityItem::for_media(
                id,
                "status",
                ActivityType::StatusChange,
                obs.status.into(),
                format!("status changed to {}", obs.status),
                now,
            )
            .with_run(last_run_id.clone()),
        );
    }
    if asr_done {
        push(
            state,
            report,
            ActivityItem::for_media(
                id,
                "stage-asr",
                ActivityType::StageAsrDone,
                ActivityStatus::Done,
                "ASR stage finished",
                now,
            )
            .with_run(last_run_id.clone()),
        );
    }
    if translate_done {
        push(
            state,
            report,
            ActivityItem::for_media(
                id,
                "stage-translate",
                ActivityType::StageTranslateDone,
                ActivityStatus::Done,
                "translation stage finished",
                now,
            )
            .with_run(last_run_id),
        );
    }
}

fn push(state: &mut StoreState, report: &mut ReconcileReport, item: ActivityItem) {
    state.push_activity(item);
    report.activity_added += 1;
}

/// Keep the run record in step with a status transition and return the
/// run the media should link to afterwards.
fn sync_run_for_status(
    state: &mut StoreState,
    media: &MediaItem,
    obs: &Observation,
    now: u64,
    report: &mut ReconcileReport,
) -> Option<RunId> {
    let meta = obs.run_meta.clone().unwrap_or_default();
    let meta_log = RunMeta::non_empty(&meta.log_path);
    let meta_stage = RunMeta::non_empty(&meta.stage);
    let meta_error = RunMeta::non_empty(&meta.error);
    let meta_started = nonzero(meta.started_at);
    let meta_finished = nonzero(meta.finished_at);
    let failed_log = obs.failed_marker.as_ref().map(|p| p.display().to_string());

    let run_status = match obs.status {
        MediaStatus::Running => {
            // A linked open run (still running, or opened by an action) is
            // kept; only what the worker reports is refreshed.
            let linked = media.last_run_id.as_ref().and_then(|id| state.runs.get_mut(id));
            if let Some(run) = linked.filter(|run| run.is_open()) {
                run.stage = meta_stage.or(run.stage.take());
                if let Some(log) = meta_log {
                    run.log_ref = Some(log);
                }
                return Some(run.id.clone());
            }
            let id = state.open_run(&media.id, RunType::Pipeline, now);
            if let Some(run) = state.runs.get_mut(&id) {
                if let Some(started) = meta_started {
                    run.started_at = started;
                }
                run.log_ref = meta_log.or(run.log_ref.take());
                run.stage = meta_stage.or(run.stage.take());
            }
            tracing::info!(media_id = %media.id, run_id = %id, "run opened");
            report.runs_opened += 1;
            return Some(id);
        }
        MediaStatus::Done => RunStatus::Done,
        MediaStatus::Failed => RunStatus::Failed,
        MediaStatus::Pending | MediaStatus::Archived => return media.last_run_id.clone(),
    };
    let failed = run_status == RunStatus::Failed;
    let error = failed.then(|| meta_error.clone().unwrap_or_else(|| "translate_failed".to_string()));

    if let Some(run) = media.last_run_id.as_ref().and_then(|id| state.runs.get_mut(id)) {
        if run.is_open() {
            let finished_at =
                meta_finished.unwrap_or_else(|| obs.completion_ts.map_or(now, |c| c.min(now)));
            run.close(run_status, finished_at);
            run.error = error;
            if let Some(log) = meta_log {
                run.log_ref = Some(log);
            } else if failed {
                run.log_ref = failed_log.or(run.log_ref.take());
            }
            run.stage = meta_stage.or(run.stage.take());
            tracing::info!(run_id = %run.id, status = %run.status, "run closed");
            report.runs_closed += 1;
        } else if let Some(completion) = obs.completion_ts {
            run.tighten_finish(completion);
        }
        return Some(run.id.clone());
    }

    // No linked run: record one after the fact.
    let started_at = meta_started.or(obs.completion_ts).unwrap_or(now);
    let finished_at = meta_finished
        .or(if meta_started.is_none() { obs.completion_ts } else { None })
        .unwrap_or(now);
    let mut run = RunItem::closed(
        autosub_core::run_id_for(&media.id, RunType::Pipeline, now),
        media.id.clone(),
        RunType::Pipeline,
        run_status,
        started_at,
        finished_at,
    );
    run.error = error;
    run.stage = meta_stage;
    if failed {
        run.log_ref = meta_log.or(failed_log);
    }
    let id = state.insert_run(run);
    tracing::info!(media_id = %media.id, run_id = %id, "closed run recorded");
    report.runs_closed += 1;
    Some(id)
}

fn prune(
    state: &mut StoreState,
    roots: &[PathBuf],
    seen: &BTreeSet<MediaId>,
    unlisted: &BTreeSet<MediaId>,
    report: &mut ReconcileReport,
) {
    if roots.is_empty() {
        return;
    }
    let stale: BTreeSet<MediaId> = state
        .media
        .values()
        .filter(|m| !seen.contains(&m.id) && !unlisted.contains(&m.id))
        .filter(|m| in_roots(roots, &m.path))
        .map(|m| m.id.clone())
        .collect();
    if stale.is_empty() {
        return;
    }
    for id in &stale {
        tracing::info!(media_id = %id, "media removed");
    }
    state.remove_media(&stale);
    report.removed.extend(stale);
}

fn in_roots(roots: &[PathBuf], path: &Path) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}

/// The worker writes 0 for "unknown".
fn nonzero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
