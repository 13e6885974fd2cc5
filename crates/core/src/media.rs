// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked media files and their generated outputs.

use crate::id::{MediaId, OutputId, RunId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Processing status of a media file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    #[default]
    Pending,
    Running,
    Done,
    Failed,
    /// Set only by explicit user action; overrides every marker.
    Archived,
}

impl MediaStatus {
    /// Done or failed: the worker has finished with this file.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MediaStatus::Done | MediaStatus::Failed)
    }
}

crate::simple_display! {
    MediaStatus {
        Pending => "pending",
        Running => "running",
        Done => "done",
        Failed => "failed",
        Archived => "archived",
    }
}

crate::simple_from_str! {
    MediaStatus {
        Pending => "pending",
        Running => "running",
        Done => "done",
        Failed => "failed",
        Archived => "archived",
    }
}

/// Classification of a subtitle file produced for a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Transcript in the source language
    Raw,
    /// Localized transcript
    Zh,
    /// Bilingual transcript
    Bi,
    Other,
}

crate::simple_display! {
    OutputKind {
        Raw => "raw",
        Zh => "zh",
        Bi => "bi",
        Other => "other",
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub id: OutputId,
    pub kind: OutputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub path: PathBuf,
    /// File mtime, Unix seconds
    pub updated_at: u64,
    pub size: u64,
}

impl Output {
    pub fn new(kind: OutputKind, path: PathBuf, updated_at: u64, size: u64) -> Self {
        Self { id: OutputId::for_path(&path), kind, lang: None, path, updated_at, size }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// The set of outputs of one media file: at most one each of raw, zh and bi.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi: Option<Output>,
    #[serde(default)]
    pub other: Vec<Output>,
}

impl MediaOutputs {
    /// True if any of the primary transcripts exists.
    pub fn has_primary(&self) -> bool {
        self.raw.is_some() || self.zh.is_some() || self.bi.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_primary() && self.other.is_empty()
    }

    /// All outputs in display order: raw, zh, bi, then others.
    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.raw.iter().chain(self.zh.iter()).chain(self.bi.iter()).chain(self.other.iter())
    }

    /// Freshest output mtime, if any output exists.
    pub fn latest_mtime(&self) -> Option<u64> {
        self.iter().map(|o| o.updated_at).max()
    }

    /// Whether two output sets differ in a way that counts as a media change.
    ///
    /// Primary outputs compare by path and mtime; others only by count, since
    /// their mtimes shift with unrelated edits.
    pub fn differs_from(&self, other: &MediaOutputs) -> bool {
        fn key(o: &Option<Output>) -> Option<(&PathBuf, u64)> {
            o.as_ref().map(|o| (&o.path, o.updated_at))
        }
        key(&self.raw) != key(&other.raw)
            || key(&self.zh) != key(&other.zh)
            || key(&self.bi) != key(&other.bi)
            || self.other.len() != other.other.len()
    }
}

/// One tracked media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub path: PathBuf,
    pub title: String,
    pub status: MediaStatus,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub outputs: MediaOutputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_id: Option<RunId>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl MediaItem {
    /// Create a newly discovered media item.
    pub fn discovered(path: PathBuf, status: MediaStatus, outputs: MediaOutputs, now: u64) -> Self {
        let title = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        Self {
            id: MediaId::for_path(&path),
            path,
            title,
            status,
            archived: false,
            outputs,
            last_run_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Localized transcript is absent.
    pub fn missing_zh(&self) -> bool {
        self.outputs.zh.is_none()
    }
}

crate::builder! {
    pub struct MediaItemBuilder => MediaItem {
        into {
            id: MediaId = "media-1",
            path: PathBuf = "/media/movie.mp4",
            title: String = "movie.mp4",
        }
        set {
            status: MediaStatus = MediaStatus::Pending,
            archived: bool = false,
            outputs: MediaOutputs = MediaOutputs::default(),
            created_at: u64 = 1_000,
            updated_at: u64 = 1_000,
        }
        option {
            last_run_id: RunId = None,
        }
    }
}

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
