// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use autosub_core::{MediaItem, MediaStatus, Output};
use autosub_storage::StoreState;
use autosub_wire::{MediaPage, MediaQuery, MediaSort, Page};
use std::cmp::Ordering;

/// Filter, sort and paginate media.
pub fn list_media(state: &StoreState, query: &MediaQuery) -> MediaPage {
    let mut items: Vec<MediaItem> = state.media.values().filter(|m| query.matches(m)).cloned().collect();
    items.sort_by(|a, b| compare(query.sort, a, b));
    Page::from_slice(&items, query.page)
}

fn compare(sort: MediaSort, a: &MediaItem, b: &MediaItem) -> Ordering {
    let primary = match sort {
        MediaSort::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        MediaSort::CreatedDesc => b.created_at.cmp(&a.created_at),
        MediaSort::FailedFirst => {
            let failed = |m: &MediaItem| m.status == MediaStatus::Failed;
            failed(b).cmp(&failed(a)).then_with(|| b.updated_at.cmp(&a.updated_at))
        }
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Media by exact id or unique prefix.
pub fn get_media<'a>(state: &'a StoreState, id: &str) -> Option<&'a MediaItem> {
    state.get_media(id)
}

/// All outputs of a media item: raw, zh, bi, then the others.
pub fn media_outputs(media: &MediaItem) -> Vec<&Output> {
    media.outputs.iter().collect()
}

pub fn find_output<'a>(media: &'a MediaItem, output_id: &str) -> Option<&'a Output> {
    media.outputs.iter().find(|o| o.id == output_id)
}

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
