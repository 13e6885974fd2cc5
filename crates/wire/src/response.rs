// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-side response payloads.

use crate::query::PageRequest;
use autosub_core::{
    ActivityItem, ActivityStatus, ActivityType, LiveFields, MediaItem, MediaOutputs, RunItem,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page of results plus the post-filter total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T: Clone> Page<T> {
    /// Cut the window described by `req` out of the full filtered list.
    pub fn from_slice(all: &[T], req: PageRequest) -> Self {
        let req = req.normalized();
        Self {
            items: req.window(all).to_vec(),
            total: all.len(),
            page: req.page,
            page_size: req.page_size,
        }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

pub type MediaPage = Page<MediaItem>;

/// An activity entry as shown to clients, with read-time fields attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub item: ActivityItem,
    #[serde(flatten)]
    pub live: LiveFields,
}

impl From<ActivityItem> for ActivityView {
    fn from(item: ActivityItem) -> Self {
        Self { item, live: LiveFields::default() }
    }
}

/// Aggregate activity counts.
///
/// `total` covers the whole log; `status` counts only entries matching the
/// type filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounts {
    pub total: usize,
    #[serde(rename = "type")]
    pub by_type: BTreeMap<ActivityType, usize>,
    #[serde(rename = "status")]
    pub by_status: BTreeMap<ActivityStatus, usize>,
    pub processing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPage {
    #[serde(flatten)]
    pub page: Page<ActivityView>,
    pub counts: ActivityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub failed: usize,
    pub done: usize,
    pub archived: usize,
    pub missing_zh: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: StatusCounts,
    pub recent_failed: Vec<MediaItem>,
    pub recent_done: Vec<MediaItem>,
}

/// A run with its media's title, path, outputs and live progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunView {
    #[serde(flatten)]
    pub run: RunItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<MediaOutputs>,
    #[serde(flatten)]
    pub live: LiveFields,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
