// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Keys read by [`crate::config::Config::apply_env`], named after the
/// worker's own environment so both sides can share one `.env` file.
pub mod keys {
    pub const MEDIA_DIRS: &str = "WEB_MEDIA_DIRS";
    pub const WATCH_DIRS: &str = "WATCH_DIRS";
    pub const WATCH_RECURSIVE: &str = "WATCH_RECURSIVE";
    pub const OUTPUT_TO_SOURCE_DIR: &str = "OUTPUT_TO_SOURCE_DIR";
    pub const OUT_DIR: &str = "OUT_DIR";
    pub const OUTPUT_LANG_SUFFIX: &str = "OUTPUT_LANG_SUFFIX";
    pub const SIMPLIFIED_LANG: &str = "SIMPLIFIED_LANG";
    pub const TRIGGER_SCAN_FILE: &str = "TRIGGER_SCAN_FILE";
    pub const REDIS_URL: &str = "REDIS_URL";
    pub const REDIS_CHANNEL: &str = "REDIS_CHANNEL";
}

/// Resolve state directory: AUTOSUB_STATE_DIR > XDG_STATE_HOME/autosub > ~/.local/state/autosub
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = var("AUTOSUB_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("autosub"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/autosub"))
}

/// Explicit config file location, if set.
pub fn config_path() -> Option<PathBuf> {
    var("AUTOSUB_CONFIG").map(PathBuf::from)
}

/// Log filter directive: AUTOSUB_LOG, then RUST_LOG.
pub fn log_filter() -> Option<String> {
    var("AUTOSUB_LOG").or_else(|| var("RUST_LOG"))
}

/// A non-empty environment variable.
pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}
