// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    ActivityItem, ActivityStatus, ActivityType, MediaId, MediaItem, MediaOutputs, MediaStatus,
    Output, OutputKind,
};
use std::path::PathBuf;

/// A media item whose id is derived from `path`, as reconciliation would.
pub fn media_at(path: &str, status: MediaStatus, updated_at: u64) -> MediaItem {
    let mut item = MediaItem::discovered(PathBuf::from(path), status, MediaOutputs::default(), 1_000);
    item.updated_at = updated_at;
    item
}

pub fn output(kind: OutputKind, path: &str, mtime: u64) -> Output {
    Output::new(kind, PathBuf::from(path), mtime, 1)
}

/// Outputs with only the given kinds present, named after `base`.
pub fn outputs_with(base: &str, kinds: &[OutputKind], mtime: u64) -> MediaOutputs {
    let mut outputs = MediaOutputs::default();
    for kind in kinds {
        match kind {
            OutputKind::Raw => outputs.raw = Some(output(*kind, &format!("{base}.srt"), mtime)),
            OutputKind::Zh => {
                outputs.zh = Some(output(*kind, &format!("{base}.zh.srt"), mtime).with_lang("zh"))
            }
            OutputKind::Bi => outputs.bi = Some(output(*kind, &format!("{base}.bi.srt"), mtime)),
            OutputKind::Other => {
                let n = outputs.other.len();
                outputs.other.push(output(*kind, &format!("{base}.x{n}.srt"), mtime));
            }
        }
    }
    outputs
}

pub fn activity(media: &str, kind: ActivityType, status: ActivityStatus, at: u64) -> ActivityItem {
    ActivityItem::for_media(&MediaId::new(media), &kind.to_string(), kind, status, "test", at)
}
