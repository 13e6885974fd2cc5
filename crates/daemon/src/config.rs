// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: a TOML file overlaid with environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use autosub_core::{parse_dir_list, OutputPlacement, WatchConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::{self, keys};

/// Default redis channel the worker publishes progress on.
pub const DEFAULT_CHANNEL: &str = "autosub:activity";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory")]
    NoStateDir,
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Redis pub/sub side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Unset disables the bridge
    pub url: Option<String>,
    pub channel: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: None, channel: DEFAULT_CHANNEL.to_string() }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/autosub)
    #[serde(skip)]
    pub state_dir: PathBuf,
    /// Snapshot file; relative paths are resolved against `state_dir`
    pub store_file: PathBuf,
    /// Directory for daily log files; defaults to `<state_dir>/logs`
    pub log_dir: Option<PathBuf>,
    /// Filter used when neither AUTOSUB_LOG nor RUST_LOG is set
    pub log_filter: String,
    /// Reconcile loop period
    pub tick_ms: u64,
    /// How long a directory listing is reused
    pub scan_ttl_ms: u64,
    /// Refresh period for live activity subscribers
    pub live_tick_ms: u64,
    pub watch: WatchConfig,
    pub redis: RedisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::new(),
            store_file: PathBuf::from("state.json"),
            log_dir: None,
            log_filter: "info".to_string(),
            tick_ms: 5_000,
            scan_ttl_ms: 3_000,
            live_tick_ms: 2_000,
            watch: WatchConfig::default(),
            redis: RedisConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration for the user-level daemon.
    ///
    /// Reads `$AUTOSUB_CONFIG` or `<state_dir>/config.toml` when present,
    /// then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = env::state_dir()?;
        let path = env::config_path().unwrap_or_else(|| state_dir.join("config.toml"));
        let mut config = Self::from_file(&path)?.unwrap_or_default();
        config.state_dir = state_dir;
        config.apply_env(env::var);
        Ok(config)
    }

    /// Parse a config file; a missing file is `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        toml::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Overlay values from `lookup`, which returns non-empty values only.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(keys::MEDIA_DIRS).or_else(|| lookup(keys::WATCH_DIRS)) {
            self.watch.roots = parse_dir_list(&raw);
        }
        if let Some(flag) = lookup(keys::WATCH_RECURSIVE).and_then(|v| parse_bool(&v)) {
            self.watch.recursive = flag;
        }
        let to_source = lookup(keys::OUTPUT_TO_SOURCE_DIR).and_then(|v| parse_bool(&v));
        let out_dir = lookup(keys::OUT_DIR);
        match (to_source, out_dir) {
            (Some(true), _) => self.watch.placement = OutputPlacement::BesideSource,
            (Some(false), dir) => {
                self.watch.placement = OutputPlacement::OutputRoot(dir.map(PathBuf::from).unwrap_or_default())
            }
            (None, Some(dir)) if self.watch.placement != OutputPlacement::BesideSource => {
                self.watch.placement = OutputPlacement::OutputRoot(PathBuf::from(dir))
            }
            (None, _) => {}
        }
        if let Some(suffix) = lookup(keys::OUTPUT_LANG_SUFFIX) {
            self.watch.lang_suffix = suffix.trim().to_string();
        }
        if let Some(lang) = lookup(keys::SIMPLIFIED_LANG) {
            self.watch.localized_lang = lang.trim().to_string();
        }
        if let Some(name) = lookup(keys::TRIGGER_SCAN_FILE) {
            self.watch.trigger_file = name;
        }
        if let Some(url) = lookup(keys::REDIS_URL) {
            self.redis.url = Some(url);
        }
        if let Some(channel) = lookup(keys::REDIS_CHANNEL) {
            self.redis.channel = channel;
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.state_dir.join(&self.store_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| self.state_dir.join("logs"))
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn scan_ttl(&self) -> Duration {
        Duration::from_millis(self.scan_ttl_ms)
    }

    pub fn live_tick(&self) -> Duration {
        Duration::from_millis(self.live_tick_ms.max(1))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
