// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processing attempts against a media file.

use crate::id::{MediaId, RunId};
use serde::{Deserialize, Serialize};

/// What a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    Pipeline,
    Asr,
    Translate,
    Segment,
    Scan,
    Export,
}

crate::simple_display! {
    RunType {
        Pipeline => "pipeline",
        Asr => "asr",
        Translate => "translate",
        Segment => "segment",
        Scan => "scan",
        Export => "export",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Done,
    Failed,
}

crate::simple_display! {
    RunStatus {
        Running => "running",
        Done => "done",
        Failed => "failed",
    }
}

/// One attempt to process a media file.
///
/// `finished_at` is only ever written through [`RunItem::close`],
/// [`RunItem::tighten_finish`] and [`RunItem::closed`], which all clamp it to
/// `started_at` so a run never reports a negative duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunItem {
    pub id: RunId,
    pub media_id: MediaId,
    #[serde(rename = "type")]
    pub run_type: RunType,
    pub status: RunStatus,
    pub started_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Last known pipeline phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Path to an associated log excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_ref: Option<String>,
}

impl RunItem {
    /// Open a run in the `running` state.
    pub fn open(id: RunId, media_id: MediaId, run_type: RunType, started_at: u64) -> Self {
        Self {
            id,
            media_id,
            run_type,
            status: RunStatus::Running,
            started_at,
            finished_at: None,
            error: None,
            stage: None,
            log_ref: None,
        }
    }

    /// A run recorded after the fact, already finished.
    pub fn closed(
        id: RunId,
        media_id: MediaId,
        run_type: RunType,
        status: RunStatus,
        started_at: u64,
        finished_at: u64,
    ) -> Self {
        let mut run = Self::open(id, media_id, run_type, started_at);
        run.status = status;
        run.finished_at = Some(finished_at.max(started_at));
        run
    }

    pub fn is_open(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Close the run with a terminal status.
    pub fn close(&mut self, status: RunStatus, finished_at: u64) {
        self.status = status;
        self.finished_at = Some(finished_at.max(self.started_at));
    }

    /// Pull `finished_at` earlier toward a known completion time; never later,
    /// never before `started_at`. Returns true if the value changed.
    pub fn tighten_finish(&mut self, completion: u64) -> bool {
        let Some(current) = self.finished_at else {
            return false;
        };
        let adjusted = completion.min(current).max(self.started_at);
        if adjusted == current {
            return false;
        }
        self.finished_at = Some(adjusted);
        true
    }

    /// Seconds between start and finish, if finished.
    pub fn duration_secs(&self) -> Option<u64> {
        self.finished_at.map(|f| f.saturating_sub(self.started_at))
    }
}

/// Compose a run id from its media, type and start second.
pub fn run_id_for(media_id: &MediaId, run_type: RunType, started_at: u64) -> RunId {
    RunId::new(format!("{media_id}-{run_type}-{started_at}"))
}

crate::builder! {
    pub struct RunItemBuilder => RunItem {
        into {
            id: RunId = "run-1",
            media_id: MediaId = "media-1",
        }
        set {
            run_type: RunType = RunType::Pipeline,
            status: RunStatus = RunStatus::Running,
            started_at: u64 = 1_000,
        }
        option {
            finished_at: u64 = None,
            error: String = None,
            stage: String = None,
            log_ref: String = None,
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
