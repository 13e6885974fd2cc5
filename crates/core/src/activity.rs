// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only activity log entries.

use crate::id::{ActivityId, MediaId, RunId};
use crate::media::MediaStatus;
use serde::{Deserialize, Serialize};

/// Maximum number of activity entries kept; older entries are dropped.
pub const ACTIVITY_CAP: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    MediaAdded,
    StatusChange,
    StageAsrDone,
    StageTranslateDone,
    Retry,
    Force,
    Archive,
    Unarchive,
    Translate,
    /// Synthetic, live-only entry built from a progress message
    RunProgress,
    /// Any type this build does not know; keeps older or newer logs loadable
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    ActivityType {
        MediaAdded => "media_added",
        StatusChange => "status_change",
        StageAsrDone => "stage_asr_done",
        StageTranslateDone => "stage_translate_done",
        Retry => "retry",
        Force => "force",
        Archive => "archive",
        Unarchive => "unarchive",
        Translate => "translate",
        RunProgress => "run_progress",
        Unknown => "unknown",
    }
}

crate::simple_from_str! {
    ActivityType {
        MediaAdded => "media_added",
        StatusChange => "status_change",
        StageAsrDone => "stage_asr_done",
        StageTranslateDone => "stage_translate_done",
        Retry => "retry",
        Force => "force",
        Archive => "archive",
        Unarchive => "unarchive",
        Translate => "translate",
        RunProgress => "run_progress",
        Unknown => "unknown",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Info,
    Pending,
    Running,
    Done,
    Failed,
    Archived,
    #[serde(other)]
    Unknown,
}

impl ActivityStatus {
    /// Pending or running.
    pub fn is_processing(&self) -> bool {
        matches!(self, ActivityStatus::Pending | ActivityStatus::Running)
    }
}

impl From<MediaStatus> for ActivityStatus {
    fn from(s: MediaStatus) -> Self {
        match s {
            MediaStatus::Pending => ActivityStatus::Pending,
            MediaStatus::Running => ActivityStatus::Running,
            MediaStatus::Done => ActivityStatus::Done,
            MediaStatus::Failed => ActivityStatus::Failed,
            MediaStatus::Archived => ActivityStatus::Archived,
        }
    }
}

crate::simple_display! {
    ActivityStatus {
        Info => "info",
        Pending => "pending",
        Running => "running",
        Done => "done",
        Failed => "failed",
        Archived => "archived",
        Unknown => "unknown",
    }
}

crate::simple_from_str! {
    ActivityStatus {
        Info => "info",
        Pending => "pending",
        Running => "running",
        Done => "done",
        Failed => "failed",
        Archived => "archived",
        Unknown => "unknown",
    }
}

/// An immutable activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: ActivityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_id: Option<MediaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub status: ActivityStatus,
    pub message: String,
    pub created_at: u64,
}

impl ActivityItem {
    /// An entry about a media file; the id is `<media>-<tag>-<created_at>`.
    pub fn for_media(
        media_id: &MediaId,
        tag: &str,
        kind: ActivityType,
        status: ActivityStatus,
        message: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            id: ActivityId::new(format!("{media_id}-{tag}-{created_at}")),
            media_id: Some(media_id.clone()),
            run_id: None,
            kind,
            status,
            message: message.into(),
            created_at,
        }
    }

    pub fn with_run(mut self, run_id: Option<RunId>) -> Self {
        self.run_id = run_id;
        self
    }
}

/// Fields attached to an activity entry at read time, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asr_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
