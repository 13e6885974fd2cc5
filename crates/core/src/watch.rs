// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What to watch and where outputs land.

use crate::naming::{NamingScheme, OutputPlacement};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Watch roots and naming parameters consumed by scanning and reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub roots: Vec<PathBuf>,
    pub recursive: bool,
    pub placement: OutputPlacement,
    pub lang_suffix: String,
    pub localized_lang: String,
    /// File written into each root to ask the worker for an immediate scan
    pub trigger_file: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            recursive: true,
            placement: OutputPlacement::BesideSource,
            lang_suffix: String::new(),
            localized_lang: "zh".to_string(),
            trigger_file: ".scan_now".to_string(),
        }
    }
}

impl WatchConfig {
    pub fn with_roots(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self { roots: roots.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn naming_for(&self, media_path: &Path) -> NamingScheme {
        NamingScheme::new(media_path, &self.lang_suffix, &self.localized_lang)
    }

    pub fn output_dir_for(&self, media_path: &Path) -> Option<PathBuf> {
        self.placement.output_dir(media_path)
    }

    /// True if `path` equals or lies beneath one of the configured roots.
    ///
    /// Comparison is component-wise, so `/media2/x` is not inside `/media`.
    pub fn contains(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| path.starts_with(root))
    }
}

/// Split a comma-separated directory list, trimming whitespace and one pair
/// of surrounding quotes from each entry.
pub fn parse_dir_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
            let s = s.strip_suffix(['"', '\'']).unwrap_or(s);
            PathBuf::from(s)
        })
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
