// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-side query parameters.

use autosub_core::{ActivityItem, ActivityStatus, ActivityType, MediaItem, MediaStatus};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 200;

/// 1-based page window. Zero values mean "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// Page at least 1; size defaulted when zero, then clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn normalized(self) -> Self {
        let page_size = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        Self { page: self.page.max(1), page_size }
    }

    /// Slice of `items` covered by this (normalized) window.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFilter {
    MissingZh,
    Archived,
    Failed,
    Running,
    Pending,
    Done,
}

autosub_core::simple_display! {
    MediaFilter {
        MissingZh => "missing_zh",
        Archived => "archived",
        Failed => "failed",
        Running => "running",
        Pending => "pending",
        Done => "done",
    }
}

autosub_core::simple_from_str! {
    MediaFilter {
        MissingZh => "missing_zh",
        Archived => "archived",
        Failed => "failed",
        Running => "running",
        Pending => "pending",
        Done => "done",
    }
}

impl MediaFilter {
    /// Parse a comma-separated list; unknown names are dropped.
    pub fn parse_list(raw: &str) -> Vec<MediaFilter> {
        let mut filters: Vec<MediaFilter> =
            raw.split(',').filter_map(|s| s.trim().parse().ok()).collect();
        filters.sort();
        filters.dedup();
        filters
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        match self {
            MediaFilter::MissingZh => item.missing_zh(),
            MediaFilter::Archived => item.archived,
            MediaFilter::Failed => item.status == MediaStatus::Failed,
            MediaFilter::Running => item.status == MediaStatus::Running,
            MediaFilter::Pending => item.status == MediaStatus::Pending,
            MediaFilter::Done => item.status == MediaStatus::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSort {
    #[default]
    UpdatedDesc,
    CreatedDesc,
    FailedFirst,
}

autosub_core::simple_display! {
    MediaSort {
        UpdatedDesc => "updated_desc",
        CreatedDesc => "created_desc",
        FailedFirst => "failed_first",
    }
}

autosub_core::simple_from_str! {
    MediaSort {
        UpdatedDesc => "updated_desc",
        CreatedDesc => "created_desc",
        FailedFirst => "failed_first",
    }
}

impl MediaSort {
    /// Unknown or empty sort keys fall back to the default order.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaQuery {
    /// Case-insensitive substring matched against title and path
    #[serde(default)]
    pub query: String,
    /// AND-combined
    #[serde(default)]
    pub filters: Vec<MediaFilter>,
    #[serde(default)]
    pub sort: MediaSort,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl MediaQuery {
    /// Build from raw request parameters, as the dashboard sends them.
    pub fn from_params(query: &str, filter: &str, sort: &str, page: usize, page_size: usize) -> Self {
        Self {
            query: query.to_string(),
            filters: MediaFilter::parse_list(filter),
            sort: MediaSort::parse_or_default(sort),
            page: PageRequest::new(page, page_size),
        }
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        let needle = self.query.to_lowercase();
        let text_ok = needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.path.to_string_lossy().to_lowercase().contains(&needle);
        text_ok && self.filters.iter().all(|f| f.matches(item))
    }
}

/// Activity type filter. A name that is not a known type matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    Is(ActivityType),
    Unmatched(String),
}

impl TypeFilter {
    pub fn matches(&self, kind: ActivityType) -> bool {
        matches!(self, TypeFilter::Is(k) if *k == kind)
    }
}

/// Activity status filter; `processing` covers pending and running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Is(ActivityStatus),
    Processing,
    Unmatched(String),
}

impl StatusFilter {
    pub fn matches(&self, status: ActivityStatus) -> bool {
        match self {
            StatusFilter::Is(s) => *s == status,
            StatusFilter::Processing => status.is_processing(),
            StatusFilter::Unmatched(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub kind: Option<TypeFilter>,
    #[serde(default)]
    pub status: Option<StatusFilter>,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl ActivityQuery {
    /// Build from raw request parameters; empty strings mean "no filter".
    pub fn from_params(kind: &str, status: &str, page: usize, page_size: usize) -> Self {
        let kind = match kind.trim() {
            "" => None,
            k => Some(k.parse().map(TypeFilter::Is).unwrap_or_else(|_| TypeFilter::Unmatched(k.into()))),
        };
        let status = match status.trim() {
            "" => None,
            "processing" => Some(StatusFilter::Processing),
            s => Some(
                s.parse().map(StatusFilter::Is).unwrap_or_else(|_| StatusFilter::Unmatched(s.into())),
            ),
        };
        Self { kind, status, page: PageRequest::new(page, page_size) }
    }

    pub fn matches_kind(&self, kind: ActivityType) -> bool {
        self.kind.as_ref().map_or(true, |f| f.matches(kind))
    }

    pub fn matches_status(&self, status: ActivityStatus) -> bool {
        self.status.as_ref().map_or(true, |f| f.matches(status))
    }

    pub fn matches(&self, item: &ActivityItem) -> bool {
        self.matches_kind(item.kind) && self.matches_status(item.status)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
