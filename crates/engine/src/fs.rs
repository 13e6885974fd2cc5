// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem ports.
//!
//! Reads go through [`FileProbe`], marker writes through [`MarkerWriter`].
//! Read failures are absorbed here: a path that cannot be stat'ed is absent.

use autosub_core::system_time_secs;
use std::fs;
use std::io;
use std::path::Path;

/// What reconciliation needs to know about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    /// Modification time, Unix seconds
    pub mtime: u64,
    pub is_file: bool,
}

/// Read-only view of the filesystem.
pub trait FileProbe: Send + Sync {
    fn stat(&self, path: &Path) -> Option<FileStat>;
    /// Entry names in `dir`; empty when it cannot be read.
    fn list_dir(&self, dir: &Path) -> Vec<String>;
    fn read_to_string(&self, path: &Path) -> Option<String>;

    fn is_file(&self, path: &Path) -> bool {
        self.stat(path).is_some_and(|s| s.is_file)
    }
}

/// Writes the marker and trigger files the worker watches.
pub trait MarkerWriter: Send + Sync {
    /// Write `contents` to `path`, creating parent directories.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
    /// Remove a file; removing a missing file is not an error.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileProbe for RealFs {
    fn stat(&self, path: &Path) -> Option<FileStat> {
        let meta = fs::metadata(path).ok()?;
        let mtime = meta.modified().map(system_time_secs).unwrap_or(0);
        Some(FileStat { size: meta.len(), mtime, is_file: meta.is_file() })
    }

    fn list_dir(&self, dir: &Path) -> Vec<String> {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect(),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "list_dir failed");
                Vec::new()
            }
        }
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

impl MarkerWriter for RealFs {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{FileProbe, FileStat, MarkerWriter};
    use crate::scanner::{is_video, sort_newest_first, MediaSource, ScannedFile};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct FakeFile {
        contents: String,
        mtime: u64,
    }

    /// In-memory filesystem. Directories exist implicitly when a file is
    /// below them.
    #[derive(Clone, Default)]
    pub struct FakeFs {
        files: Arc<Mutex<BTreeMap<PathBuf, FakeFile>>>,
        scans: Arc<Mutex<usize>>,
        write_mtime: Arc<Mutex<u64>>,
    }

    impl FakeFs {
        pub fn new() -> Self {
            Self::default()
        }

        /// Create or overwrite a file.
        pub fn put(&self, path: impl Into<PathBuf>, contents: &str, mtime: u64) {
            self.files
                .lock()
                .insert(path.into(), FakeFile { contents: contents.to_string(), mtime });
        }

        /// Create an empty file.
        pub fn touch(&self, path: impl Into<PathBuf>, mtime: u64) {
            self.put(path, "", mtime);
        }

        pub fn delete(&self, path: impl AsRef<Path>) {
            self.files.lock().remove(path.as_ref());
        }

        pub fn exists(&self, path: impl AsRef<Path>) -> bool {
            self.files.lock().contains_key(path.as_ref())
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.lock().get(path.as_ref()).map(|f| f.contents.clone())
        }

        /// Mtime given to files created through [`MarkerWriter`]
        pub fn set_write_mtime(&self, mtime: u64) {
            *self.write_mtime.lock() = mtime;
        }

        /// Number of times `scan` has been called
        pub fn scan_count(&self) -> usize {
            *self.scans.lock()
        }
    }

    impl FileProbe for FakeFs {
        fn stat(&self, path: &Path) -> Option<FileStat> {
            let files = self.files.lock();
            if let Some(f) = files.get(path) {
                return Some(FileStat { size: f.contents.len() as u64, mtime: f.mtime, is_file: true });
            }
            files
                .keys()
                .any(|p| p.starts_with(path))
                .then_some(FileStat { size: 0, mtime: 0, is_file: false })
        }

        fn list_dir(&self, dir: &Path) -> Vec<String> {
            let files = self.files.lock();
            let mut names: Vec<String> = files
                .keys()
                .filter_map(|p| p.strip_prefix(dir).ok())
                .filter_map(|rest| rest.components().next())
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.dedup();
            names
        }

        fn read_to_string(&self, path: &Path) -> Option<String> {
            self.contents(path)
        }
    }

    impl MarkerWriter for FakeFs {
        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            let mtime = *self.write_mtime.lock();
            self.put(path, contents, mtime);
            Ok(())
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            self.delete(path);
            Ok(())
        }
    }

    impl MediaSource for FakeFs {
        fn scan(&self, roots: &[PathBuf], recursive: bool) -> Vec<ScannedFile> {
            *self.scans.lock() += 1;
            let files = self.files.lock();
            let mut found: Vec<ScannedFile> = files
                .iter()
                .filter(|(path, _)| is_video(path))
                .filter(|(path, _)| {
                    roots.iter().any(|root| {
                        if recursive {
                            path.starts_with(root) && path.as_path() != root.as_path()
                        } else {
                            path.parent() == Some(root.as_path())
                        }
                    })
                })
                .map(|(path, f)| ScannedFile {
                    path: path.clone(),
                    size: f.contents.len() as u64,
                    mtime: f.mtime,
                })
                .collect();
            sort_newest_first(&mut found);
            found
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFs;

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
