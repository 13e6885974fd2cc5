// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! autosubd: keeps the media/run model in step with the watched directories.

use anyhow::Context;
use autosub_daemon::{logging, Config, Daemon};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let _guard = logging::init(&config.log_dir(), &logging::filter_directive(&config.log_filter))
        .context("initialising logging")?;

    if config.watch.roots.is_empty() {
        tracing::warn!("no watch roots configured; nothing will be scanned");
    }

    Daemon::new(config)
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}
