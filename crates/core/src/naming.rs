// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File naming conventions shared with the external worker.
//!
//! Given a media file `movie.mp4`, an output-lang suffix `S` (normalised to
//! start with `.` when non-empty) and a localized language `L`, the worker
//! communicates through these names in the output directory:
//!
//! | File | Meaning |
//! |---|---|
//! | `movie{S}.lock` | processing in progress |
//! | `movie{S}.done` | processing finished |
//! | `movie.translate_failed*` | translation failed (any suffix) |
//! | `movie{S}.archived` | user archived the file; the worker skips it |
//! | `movie{S}.run.json` | run metadata side-file |
//! | `movie{S}.srt` | raw transcript |
//! | `movie.llm.{L}.srt`, `movie.{L}.srt` | localized transcript (first wins) |
//! | `movie.bi.srt` | bilingual transcript |
//! | `movie.*.srt` | anything else is an "other" output |
//!
//! The job-override file `movie.job.json` lives beside the source file.

use crate::media::OutputKind;
use std::path::{Path, PathBuf};

const FAILED_MARKER: &str = ".translate_failed";

/// Naming scheme for one media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingScheme {
    base: String,
    suffix: String,
    lang: String,
}

impl NamingScheme {
    pub fn new(media_path: &Path, lang_suffix: &str, localized_lang: &str) -> Self {
        let base =
            media_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        Self { base, suffix: normalize_suffix(lang_suffix), lang: localized_lang.trim().to_string() }
    }

    /// File stem of the media file.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Localized language code (may be empty when localization is disabled).
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Stem shared by all status markers.
    pub fn marker(&self) -> String {
        format!("{}{}", self.base, self.suffix)
    }

    pub fn lock_name(&self) -> String {
        format!("{}.lock", self.marker())
    }

    pub fn done_name(&self) -> String {
        format!("{}.done", self.marker())
    }

    pub fn archived_name(&self) -> String {
        format!("{}.archived", self.marker())
    }

    pub fn run_meta_name(&self) -> String {
        format!("{}.run.json", self.marker())
    }

    pub fn job_override_name(&self) -> String {
        format!("{}.job.json", self.base)
    }

    /// True if a directory entry is a translation-failure marker.
    pub fn is_failed_marker(&self, file_name: &str) -> bool {
        file_name.starts_with(&format!("{}{}", self.base, FAILED_MARKER))
    }

    pub fn raw_name(&self) -> String {
        format!("{}.srt", self.marker())
    }

    /// Localized transcript candidates, preferred first.
    pub fn localized_names(&self) -> Vec<String> {
        if self.lang.is_empty() {
            return Vec::new();
        }
        vec![format!("{}.llm.{}.srt", self.base, self.lang), format!("{}.{}.srt", self.base, self.lang)]
    }

    pub fn bilingual_name(&self) -> String {
        format!("{}.bi.srt", self.base)
    }

    /// True if a directory entry belongs to this media as some subtitle.
    pub fn is_subtitle_for(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(".srt") && file_name.starts_with(&format!("{}.", self.base))
    }

    /// Classify a file name by the fixed names alone. Localized names are
    /// both reported as `Zh`; the caller decides which candidate wins.
    pub fn classify(&self, file_name: &str) -> Option<OutputKind> {
        if file_name == self.raw_name() {
            Some(OutputKind::Raw)
        } else if self.localized_names().iter().any(|n| n == file_name) {
            Some(OutputKind::Zh)
        } else if file_name == self.bilingual_name() {
            Some(OutputKind::Bi)
        } else if self.is_subtitle_for(file_name) {
            Some(OutputKind::Other)
        } else {
            None
        }
    }
}

/// Where outputs and markers for a media file live.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "path")]
pub enum OutputPlacement {
    /// In the source file's directory
    #[default]
    BesideSource,
    /// Under a single configured output root
    OutputRoot(PathBuf),
}

impl OutputPlacement {
    /// Resolve the output directory for a media file, if one can be determined.
    pub fn output_dir(&self, media_path: &Path) -> Option<PathBuf> {
        match self {
            OutputPlacement::BesideSource => media_path.parent().map(Path::to_path_buf),
            OutputPlacement::OutputRoot(root) if root.as_os_str().is_empty() => None,
            OutputPlacement::OutputRoot(root) => Some(root.clone()),
        }
    }
}

fn normalize_suffix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
