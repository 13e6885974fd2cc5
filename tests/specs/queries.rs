// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query projections over a reconciled store.

use crate::prelude::*;
use autosub_engine::query::{build_summary, list_activity, list_media};
use autosub_wire::{ActivityQuery, MediaQuery};

#[test]
fn pages_and_summary_agree_with_the_store() {
    let ws = Workspace::new();
    for i in 0..12u64 {
        ws.touch(&format!("ep{i:02}.mkv"), 100 + i);
    }
    ws.touch("ep00.srt", 200);
    ws.touch("ep01.translate_failed", 200);
    let state = ws.engine().reconcile().unwrap().state;

    let summary = build_summary(&state);
    assert_eq!(summary.counts.total, 12);
    assert_eq!(summary.counts.done, 1);
    assert_eq!(summary.counts.failed, 1);
    assert_eq!(summary.counts.pending, 10);
    assert_eq!(summary.counts.missing_zh, 12);

    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = list_media(&state, &MediaQuery::from_params("", "", "created_desc", page, 5));
        assert_eq!(result.total, 12);
        seen.extend(result.items.into_iter().map(|m| m.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 12);

    let failed = list_media(&state, &MediaQuery::from_params("EP01", "failed", "", 1, 50));
    assert_eq!(failed.items.len(), 1);

    let added = list_activity(&state, &ActivityQuery::from_params("media_added", "", 1, 5));
    assert_eq!(added.page.total, 12);
    assert_eq!(added.page.items.len(), 5);
    assert_eq!(added.counts.total, 12);
}
