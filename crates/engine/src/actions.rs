// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-initiated media and run actions.
//!
//! Each action mutates the stored state under the engine's writer lock,
//! adjusts the marker files the worker reads, and then asks the worker to
//! rescan. A failed rescan request is reported as a warning, not an error.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::fs::{FileProbe, MarkerWriter};
use crate::scanner::MediaSource;
use autosub_core::{
    ActivityItem, ActivityStatus, ActivityType, Clock, MediaItem, MediaStatus, RunItem, RunType,
};
use autosub_storage::{StateStore, StoreState};
use serde::{Deserialize, Serialize};

/// Options for a forced rerun. Defaults match an unforced run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceOptions {
    pub force_asr: bool,
    pub force_translate: bool,
    pub ignore_simplified_subtitle: bool,
    pub use_existing_subtitle: bool,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            force_asr: false,
            force_translate: false,
            ignore_simplified_subtitle: true,
            use_existing_subtitle: true,
        }
    }
}

/// Contents of the `<base>.job.json` override file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOverrides {
    pub force_once: bool,
    pub force_asr: bool,
    pub force_translate: bool,
    pub ignore_simplified_subtitle: bool,
    pub use_existing_subtitle: bool,
}

impl ForceOptions {
    /// Forcing translation always ignores simplified subtitles; forcing
    /// ASR never reuses an existing subtitle.
    pub fn overrides(&self) -> JobOverrides {
        JobOverrides {
            force_once: true,
            force_asr: self.force_asr,
            force_translate: self.force_translate,
            ignore_simplified_subtitle: self.force_translate || self.ignore_simplified_subtitle,
            use_existing_subtitle: !self.force_asr && self.use_existing_subtitle,
        }
    }
}

/// Result of a media or run action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub media: MediaItem,
    pub run: Option<RunItem>,
    /// Set when the worker could not be asked to rescan
    pub warning: Option<String>,
}

impl<S, M, F, C> Engine<S, M, F, C>
where
    S: StateStore,
    M: MediaSource,
    F: FileProbe + MarkerWriter,
    C: Clock,
{
    /// Clear the media's markers and start a fresh pipeline run.
    pub fn retry_media(&self, id: &str) -> Result<ActionOutcome, EngineError> {
        let (media, run) = self.mutate(|state, now| {
            let (media, run) = start_run(state, id, RunType::Pipeline, now)?;
            state.push_activity(
                ActivityItem::for_media(
                    &media.id,
                    "retry",
                    ActivityType::Retry,
                    ActivityStatus::Running,
                    "retry requested",
                    now,
                )
                .with_run(Some(run.id.clone())),
            );
            self.clear_markers(&media);
            Ok((media, run))
        })?;
        tracing::info!(media_id = %media.id, run_id = %run.id, "retry requested");
        Ok(self.outcome(media, Some(run)))
    }

    /// Like [`Self::retry_media`], additionally writing job overrides for the worker.
    pub fn force_media(&self, id: &str, options: ForceOptions) -> Result<ActionOutcome, EngineError> {
        let (media, run) = self.mutate(|state, now| {
            let (media, run) = start_run(state, id, RunType::Pipeline, now)?;
            state.push_activity(
                ActivityItem::for_media(
                    &media.id,
                    "force",
                    ActivityType::Force,
                    ActivityStatus::Running,
                    "forced run requested",
                    now,
                )
                .with_run(Some(run.id.clone())),
            );
            self.write_job_overrides(&media, options.overrides());
            self.clear_markers(&media);
            Ok((media, run))
        })?;
        tracing::info!(media_id = %media.id, run_id = %run.id, ?options, "forced run requested");
        Ok(self.outcome(media, Some(run)))
    }

    /// Start a translation-only run. Markers are left alone; the worker
    /// picks the request up on its next scan.
    pub fn translate_media(&self, id: &str) -> Result<ActionOutcome, EngineError> {
        let (media, run) = self.mutate(|state, now| {
            let (media, run) = start_run(state, id, RunType::Translate, now)?;
            state.push_activity(
                ActivityItem::for_media(
                    &media.id,
                    "translate",
                    ActivityType::Translate,
                    ActivityStatus::Running,
                    "translation requested",
                    now,
                )
                .with_run(Some(run.id.clone())),
            );
            Ok((media, run))
        })?;
        tracing::info!(media_id = %media.id, run_id = %run.id, "translation requested");
        Ok(self.outcome(media, Some(run)))
    }

    /// Start a new run of the same type as `run_id` for its media.
    pub fn retry_run(&self, run_id: &str) -> Result<ActionOutcome, EngineError> {
        let (media, run) = self.mutate(|state, now| {
            let previous =
                state.get_run(run_id).cloned().ok_or_else(|| EngineError::RunNotFound(run_id.to_string()))?;
            let (media, run) = start_run(state, &previous.media_id, previous.run_type, now)?;
            state.push_activity(
                ActivityItem::for_media(
                    &media.id,
                    "run-retry",
                    ActivityType::Retry,
                    ActivityStatus::Running,
                    "run retry requested",
                    now,
                )
                .with_run(Some(run.id.clone())),
            );
            Ok((media, run))
        })?;
        tracing::info!(media_id = %media.id, run_id = %run.id, "run retry requested");
        Ok(self.outcome(media, Some(run)))
    }

    /// Mark the media archived; the worker skips archived files.
    pub fn archive_media(&self, id: &str) -> Result<ActionOutcome, EngineError> {
        self.set_archived(id, true)
    }

    /// Clear the archived flag; the media goes back to pending.
    pub fn unarchive_media(&self, id: &str) -> Result<ActionOutcome, EngineError> {
        self.set_archived(id, false)
    }

    /// Write the scan-trigger file into every watch root.
    pub fn trigger_scan(&self) -> Result<(), EngineError> {
        if self.config.roots.is_empty() {
            return Err(EngineError::NoRoots);
        }
        let errors: Vec<String> = self
            .config
            .roots
            .iter()
            .filter_map(|root| {
                let path = root.join(&self.config.trigger_file);
                self.fs.write(&path, "scan").err().map(|e| format!("{}: {e}", root.display()))
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Trigger(errors.join("; ")))
        }
    }

    fn set_archived(&self, id: &str, archived: bool) -> Result<ActionOutcome, EngineError> {
        let media = self.mutate(|state, now| {
            let media = state.get_media_mut(id).ok_or_else(|| EngineError::MediaNotFound(id.to_string()))?;
            media.archived = archived;
            media.status = if archived { MediaStatus::Archived } else { MediaStatus::Pending };
            media.updated_at = now;
            let media = media.clone();
            let (tag, kind, status, message) = if archived {
                ("archive", ActivityType::Archive, ActivityStatus::Archived, "media archived")
            } else {
                ("unarchive", ActivityType::Unarchive, ActivityStatus::Pending, "media unarchived")
            };
            state.push_activity(ActivityItem::for_media(&media.id, tag, kind, status, message, now));
            self.set_archived_marker(&media, archived);
            Ok(media)
        })?;
        tracing::info!(media_id = %media.id, archived, "archive flag changed");
        Ok(self.outcome(media, None))
    }

    fn outcome(&self, media: MediaItem, run: Option<RunItem>) -> ActionOutcome {
        let warning = match self.trigger_scan() {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(media_id = %media.id, error = %e, "scan trigger failed");
                Some(e.to_string())
            }
        };
        ActionOutcome { media, run, warning }
    }

    /// Remove done, lock and failure markers so the worker picks the file up again.
    fn clear_markers(&self, media: &MediaItem) {
        let Some(dir) = self.config.output_dir_for(&media.path) else {
            return;
        };
        let naming = self.config.naming_for(&media.path);
        let mut doomed = vec![dir.join(naming.done_name()), dir.join(naming.lock_name())];
        doomed.extend(
            self.fs
                .list_dir(&dir)
                .into_iter()
                .filter(|name| naming.is_failed_marker(name))
                .map(|name| dir.join(name)),
        );
        for path in doomed {
            if let Err(e) = self.fs.remove(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to clear marker");
            }
        }
    }

    fn write_job_overrides(&self, media: &MediaItem, overrides: JobOverrides) {
        let naming = self.config.naming_for(&media.path);
        let path = media.path.with_file_name(naming.job_override_name());
        let written = serde_json::to_string_pretty(&overrides)
            .map_err(std::io::Error::other)
            .and_then(|json| self.fs.write(&path, &json));
        if let Err(e) = written {
            tracing::warn!(path = %path.display(), error = %e, "failed to write job overrides");
        }
    }

    fn set_archived_marker(&self, media: &MediaItem, archived: bool) {
        let Some(dir) = self.config.output_dir_for(&media.path) else {
            return;
        };
        let path = dir.join(self.config.naming_for(&media.path).archived_name());
        let result = if archived { self.fs.write(&path, "archived") } else { self.fs.remove(&path) };
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "failed to update archived marker");
        }
    }
}

/// Open a running run of `run_type` for a media item and link it.
fn start_run(
    state: &mut StoreState,
    media_id: &str,
    run_type: RunType,
    now: u64,
) -> Result<(MediaItem, RunItem), EngineError> {
    let id = state
        .get_media(media_id)
        .map(|m| m.id.clone())
        .ok_or_else(|| EngineError::MediaNotFound(media_id.to_string()))?;
    let run_id = state.open_run(&id, run_type, now);
    let run = state.runs.get(&run_id).cloned().ok_or_else(|| EngineError::RunNotFound(run_id.to_string()))?;
    let media = state.get_media_mut(&id).ok_or_else(|| EngineError::MediaNotFound(media_id.to_string()))?;
    media.last_run_id = Some(run_id);
    media.status = MediaStatus::Running;
    media.updated_at = now;
    Ok((media.clone(), run))
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
