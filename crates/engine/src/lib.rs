// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! autosub-engine: scans watched directories, infers processing status from
//! marker files and keeps the stored media/run/activity model in step.

mod actions;
mod engine;
mod error;
pub mod fs;
pub mod query;
pub mod reconcile;
pub mod resolver;
pub mod scanner;

pub use actions::{ActionOutcome, ForceOptions, JobOverrides};
pub use engine::{Engine, EngineDeps, Reconciled};
pub use error::EngineError;
pub use fs::{FileProbe, FileStat, MarkerWriter, RealFs};
pub use reconcile::{apply_observations, observe, ObservedMedia, Observations, ReconcileReport};
pub use resolver::{resolve, Observation};
pub use scanner::{CachedScanner, MediaSource, ScannedFile, WalkdirScanner, DEFAULT_SCAN_TTL};

#[cfg(any(test, feature = "test-support"))]
pub use fs::FakeFs;
