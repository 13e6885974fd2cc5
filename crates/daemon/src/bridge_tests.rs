// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::time::timeout;

#[tokio::test]
async fn disabled_without_url() {
    let publisher = Publisher::new(Duration::from_secs(1));
    timeout(Duration::from_secs(1), run(RedisConfig::default(), publisher)).await.unwrap();
}

#[tokio::test]
async fn invalid_url_is_an_error() {
    let publisher = Publisher::new(Duration::from_secs(1));
    let result = forward("not-a-redis-url", "autosub:activity", &publisher).await;
    assert!(matches!(result, Err(BridgeError::Redis(_))));
}
