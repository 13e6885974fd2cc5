// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! autosub-core: domain model for the subtitle pipeline dashboard

pub mod macros;

pub mod activity;
pub mod clock;
pub mod id;
pub mod media;
pub mod naming;
pub mod run;
pub mod run_meta;
pub mod watch;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use activity::{ActivityItem, ActivityStatus, ActivityType, LiveFields, ACTIVITY_CAP};
pub use clock::{system_time_secs, Clock, FakeClock, SystemClock};
pub use id::{path_hash, ActivityId, MediaId, OutputId, RunId};
pub use media::{MediaItem, MediaOutputs, MediaStatus, Output, OutputKind};
pub use naming::{NamingScheme, OutputPlacement};
pub use run::{run_id_for, RunItem, RunStatus, RunType};
pub use run_meta::{ChannelMessage, ProgressFields, RunMeta};
pub use watch::{parse_dir_list, WatchConfig};

/// A string that names no variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);
