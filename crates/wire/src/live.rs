// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payloads pushed to live subscribers.

use crate::response::ActivityPage;
use autosub_core::{ProgressFields, RunId, RunItem, RunMeta};
use serde::{Deserialize, Serialize};

/// Full activity view for one subscriber's filter.
pub type ActivitySnapshot = ActivityPage;

/// Progress of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProgress {
    pub run_id: RunId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asr_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
    pub ts: u64,
}

impl RunProgress {
    /// Stored run, overlaid with the worker's side-file when present.
    pub fn from_run(run: &RunItem, meta: Option<&RunMeta>, now: u64) -> Self {
        Self {
            run_id: run.id.clone(),
            status: meta
                .and_then(|m| m.status.clone())
                .or_else(|| Some(run.status.to_string())),
            stage: meta.and_then(|m| m.stage.clone()).or_else(|| run.stage.clone()),
            progress: meta.and_then(|m| m.progress),
            asr_model: meta.and_then(|m| m.asr_model.clone()),
            llm_model: meta.and_then(|m| m.llm_model.clone()),
            ts: now,
        }
    }

    /// Relay a progress message addressed to `run_id` as-is.
    pub fn from_message(run_id: RunId, fields: &ProgressFields, now: u64) -> Self {
        Self {
            run_id,
            status: fields.status.clone(),
            stage: fields.stage.clone(),
            progress: fields.progress,
            asr_model: None,
            llm_model: None,
            ts: fields.ts.unwrap_or(now),
        }
    }
}

#[cfg(test)]
#[path = "live_tests.rs"]
mod tests;
