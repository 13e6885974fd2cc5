// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only projections over a [`StoreState`](autosub_storage::StoreState).
//!
//! None of these touch the filesystem or trigger reconciliation; live
//! fields come from a caller-supplied lookup.

mod activity;
mod media;
mod runs;
mod summary;

pub use activity::{activity_counts, list_activity, list_activity_with, view_for};
pub use media::{find_output, get_media, list_media, media_outputs};
pub use runs::{list_runs, run_view};
pub use summary::{build_summary, RECENT_LIMIT};
