// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the `autosubd` binary.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::env;

pub const LOG_FILE_PREFIX: &str = "autosubd.log";

/// Filter directive: environment first, then the configured default.
pub fn filter_directive(configured: &str) -> String {
    env::log_filter().unwrap_or_else(|| configured.to_string())
}

/// Install a subscriber writing to a daily rolling file in `log_dir` and to
/// stderr. Keep the returned guard alive to flush the file writer.
pub fn init(log_dir: &Path, directive: &str) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(guard)
}
