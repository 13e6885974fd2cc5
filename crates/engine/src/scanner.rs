// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Media discovery under the watched roots.

use autosub_core::{system_time_secs, Clock};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Lowercased extensions treated as media files.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "webm", "mov", "avi"];

/// Default lifetime of a cached scan.
pub const DEFAULT_SCAN_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
    pub mtime: u64,
}

pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Newest mtime first; path breaks ties so the order is stable.
pub fn sort_newest_first(files: &mut [ScannedFile]) {
    files.sort_by(|a, b| b.mtime.cmp(&a.mtime).then_with(|| a.path.cmp(&b.path)));
}

/// Lists media files under a set of roots.
pub trait MediaSource: Send + Sync {
    /// Media files under `roots`, newest first. Missing roots are skipped.
    fn scan(&self, roots: &[PathBuf], recursive: bool) -> Vec<ScannedFile>;
}

impl<T: MediaSource + ?Sized> MediaSource for std::sync::Arc<T> {
    fn scan(&self, roots: &[PathBuf], recursive: bool) -> Vec<ScannedFile> {
        (**self).scan(roots, recursive)
    }
}

/// Scans the real filesystem with `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirScanner {
    pub follow_links: bool,
}

impl WalkdirScanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_root(&self, root: &Path, recursive: bool, out: &mut Vec<ScannedFile>) {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "skipping missing watch root");
            return;
        }
        let mut walker = WalkDir::new(root).follow_links(self.follow_links).min_depth(1);
        if !recursive {
            walker = walker.max_depth(1);
        }
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_video(entry.path()) {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            out.push(ScannedFile {
                path: entry.into_path(),
                size: meta.len(),
                mtime: meta.modified().map(system_time_secs).unwrap_or(0),
            });
        }
    }
}

impl MediaSource for WalkdirScanner {
    fn scan(&self, roots: &[PathBuf], recursive: bool) -> Vec<ScannedFile> {
        let mut files = Vec::new();
        for root in roots {
            self.scan_root(root, recursive, &mut files);
        }
        sort_newest_first(&mut files);
        tracing::debug!(roots = roots.len(), found = files.len(), "scan complete");
        files
    }
}

type ScanKey = (Vec<PathBuf>, bool);

struct CachedScan {
    at: Instant,
    files: Vec<ScannedFile>,
}

/// Serves repeated scans of the same roots from memory for `ttl`.
pub struct CachedScanner<S, C> {
    inner: S,
    clock: C,
    ttl: Duration,
    cache: Mutex<HashMap<ScanKey, CachedScan>>,
}

impl<S: MediaSource, C: Clock> CachedScanner<S, C> {
    pub fn new(inner: S, clock: C) -> Self {
        Self::with_ttl(inner, clock, DEFAULT_SCAN_TTL)
    }

    pub fn with_ttl(inner: S, clock: C, ttl: Duration) -> Self {
        Self { inner, clock, ttl, cache: Mutex::new(HashMap::new()) }
    }

    /// Drop every cached listing.
    pub fn invalidate(&self) {
        self.cache.lock().clear();
    }
}

impl<S: MediaSource, C: Clock> MediaSource for CachedScanner<S, C> {
    fn scan(&self, roots: &[PathBuf], recursive: bool) -> Vec<ScannedFile> {
        let key = (roots.to_vec(), recursive);
        let now = self.clock.now();
        if let Some(hit) = self.cache.lock().get(&key) {
            if now.saturating_duration_since(hit.at) < self.ttl {
                return hit.files.clone();
            }
        }
        let files = self.inner.scan(roots, recursive);
        self.cache.lock().insert(key, CachedScan { at: now, files: files.clone() });
        files
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
