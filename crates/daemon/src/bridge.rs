// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis pub/sub bridge: forwards worker messages to the [`Publisher`].

use std::time::Duration;

use futures_util::StreamExt;
use thiserror::Error;

use crate::config::RedisConfig;
use crate::live::Publisher;

/// Pause before resubscribing after the connection drops.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("subscription stream ended")]
    StreamEnded,
}

/// Subscribe once and forward messages until the connection fails.
pub async fn forward(url: &str, channel: &str, publisher: &Publisher) -> Result<(), BridgeError> {
    let client = redis::Client::open(url)?;
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.subscribe(channel).await?;
    tracing::info!(channel, "subscribed to worker channel");

    let mut messages = pubsub.on_message();
    while let Some(msg) = messages.next().await {
        match msg.get_payload::<String>() {
            Ok(payload) => {
                publisher.message(payload);
            }
            Err(e) => tracing::warn!(channel, error = %e, "dropping undecodable message"),
        }
    }
    Err(BridgeError::StreamEnded)
}

/// Keep the bridge alive, reconnecting after failures. Returns immediately
/// when no redis url is configured.
pub async fn run(config: RedisConfig, publisher: Publisher) {
    let Some(url) = config.url else {
        tracing::info!("redis url not configured, live bridge disabled");
        return;
    };
    loop {
        if let Err(e) = forward(&url, &config.channel, &publisher).await {
            tracing::warn!(channel = %config.channel, error = %e, "redis bridge disconnected");
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
