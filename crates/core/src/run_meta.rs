// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side-channel metadata published by the worker.
//!
//! Two shapes arrive from the worker: the per-media run side-file
//! ([`RunMeta`]) and pub/sub messages ([`ChannelMessage`]). Both are parsed
//! leniently: unknown fields are ignored and a malformed document is treated
//! as absent rather than an error.

use serde::{Deserialize, Serialize};

/// Contents of the `<marker>.run.json` side-file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub started_at: Option<u64>,
    #[serde(default)]
    pub finished_at: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub log_path: Option<String>,
    #[serde(default)]
    pub asr_model: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
}

impl RunMeta {
    /// Parse a side-file body; anything that is not a JSON object yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        if !value.is_object() {
            return None;
        }
        // Per-field leniency: a wrongly typed field is dropped, not fatal.
        let field = |k: &str| value.get(k).cloned().unwrap_or(serde_json::Value::Null);
        Some(Self {
            status: serde_json::from_value(field("status")).ok().flatten(),
            stage: serde_json::from_value(field("stage")).ok().flatten(),
            progress: serde_json::from_value(field("progress")).ok().flatten(),
            started_at: serde_json::from_value(field("started_at")).ok().flatten(),
            finished_at: serde_json::from_value(field("finished_at")).ok().flatten(),
            error: serde_json::from_value(field("error")).ok().flatten(),
            log_path: serde_json::from_value(field("log_path")).ok().flatten(),
            asr_model: serde_json::from_value(field("asr_model")).ok().flatten(),
            llm_model: serde_json::from_value(field("llm_model")).ok().flatten(),
        })
    }

    /// Empty strings from the worker carry no information.
    pub fn non_empty(value: &Option<String>) -> Option<String> {
        value.as_ref().filter(|s| !s.is_empty()).cloned()
    }
}

/// Progress fields carried by `run_meta` / `run_progress` messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressFields {
    #[serde(default)]
    pub run_id: Option<String>,
    /// Media file path the message refers to
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Unix seconds at which the worker emitted the message
    #[serde(default)]
    pub ts: Option<u64>,
}

impl ProgressFields {
    /// Messages must name a run or a path to be attributable.
    pub fn is_addressable(&self) -> bool {
        self.run_id.as_deref().is_some_and(|s| !s.is_empty())
            || self.path.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A message received on the external activity channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChannelMessage {
    RunMeta(ProgressFields),
    RunProgress(ProgressFields),
    /// Any other event; only signals that state may have changed.
    #[serde(other)]
    Other,
}

impl ChannelMessage {
    /// Parse a raw payload. Unparseable payloads still count as a change
    /// signal, so they map to [`ChannelMessage::Other`].
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or(ChannelMessage::Other)
    }

    /// Progress fields when this is an addressable progress message.
    pub fn progress(&self) -> Option<&ProgressFields> {
        match self {
            ChannelMessage::RunMeta(p) | ChannelMessage::RunProgress(p) if p.is_addressable() => {
                Some(p)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "run_meta_tests.rs"]
mod tests;
