// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use autosub_storage::StoreError;
use thiserror::Error;

/// Errors returned by engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("media not found: {0}")]
    MediaNotFound(String),
    #[error("run not found: {0}")]
    RunNotFound(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("no watch roots configured")]
    NoRoots,
    #[error("scan trigger failed: {0}")]
    Trigger(String),
}
