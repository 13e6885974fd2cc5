// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query and response types shared by the engine and its callers.
//!
//! Everything here serializes to the JSON shapes the dashboard consumes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod live;
mod query;
mod response;

pub use live::{ActivitySnapshot, RunProgress};
pub use query::{
    ActivityQuery, MediaFilter, MediaQuery, MediaSort, PageRequest, StatusFilter, TypeFilter,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use response::{
    ActivityCounts, ActivityPage, ActivityView, MediaPage, Page, RunView, StatusCounts, Summary,
};
