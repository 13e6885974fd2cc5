// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! autosub daemon: configuration, live updates and the reconcile loop.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

#[cfg(feature = "redis-bridge")]
pub mod bridge;
pub mod config;
pub mod env;
pub mod lifecycle;
pub mod live;
pub mod logging;

pub use config::{Config, ConfigError, RedisConfig};
pub use lifecycle::{reconcile_loop, reconcile_once, Daemon, DaemonEngine};
pub use live::{ActivitySubscription, LiveSource, Notice, Publisher, RunSubscription};
