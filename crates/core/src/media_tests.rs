// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn out(kind: OutputKind, path: &str, mtime: u64) -> Output {
    Output::new(kind, PathBuf::from(path), mtime, 10)
}

#[test]
fn discovered_media_uses_file_name_as_title() {
    let item = MediaItem::discovered(
        PathBuf::from("/m/show/ep01.mkv"),
        MediaStatus::Pending,
        MediaOutputs::default(),
        50,
    );
    assert_eq!(item.title, "ep01.mkv");
    assert_eq!(item.id, MediaId::for_path(&item.path));
    assert_eq!(item.created_at, 50);
    assert_eq!(item.updated_at, 50);
    assert!(item.missing_zh());
}

#[test]
fn outputs_differ_on_primary_mtime() {
    let a = MediaOutputs { raw: Some(out(OutputKind::Raw, "/m/a.srt", 1)), ..Default::default() };
    let b = MediaOutputs { raw: Some(out(OutputKind::Raw, "/m/a.srt", 2)), ..Default::default() };
    assert!(a.differs_from(&b));
    assert!(!a.differs_from(&a.clone()));
}

#[test]
fn outputs_ignore_other_mtime_but_not_count() {
    let a = MediaOutputs { other: vec![out(OutputKind::Other, "/m/a.en.srt", 1)], ..Default::default() };
    let b = MediaOutputs { other: vec![out(OutputKind::Other, "/m/a.en.srt", 9)], ..Default::default() };
    assert!(!a.differs_from(&b));
    assert!(a.differs_from(&MediaOutputs::default()));
}

#[test]
fn latest_mtime_spans_all_outputs() {
    let outputs = MediaOutputs {
        raw: Some(out(OutputKind::Raw, "/m/a.srt", 5)),
        bi: Some(out(OutputKind::Bi, "/m/a.bi.srt", 3)),
        other: vec![out(OutputKind::Other, "/m/a.x.srt", 8)],
        ..Default::default()
    };
    assert_eq!(outputs.latest_mtime(), Some(8));
    assert_eq!(outputs.iter().count(), 3);
    assert_eq!(MediaOutputs::default().latest_mtime(), None);
}

#[yare::parameterized(
    pending  = { MediaStatus::Pending,  "pending"  },
    running  = { MediaStatus::Running,  "running"  },
    done     = { MediaStatus::Done,     "done"     },
    failed   = { MediaStatus::Failed,   "failed"   },
    archived = { MediaStatus::Archived, "archived" },
)]
fn status_text_matches_serde(status: MediaStatus, text: &str) {
    assert_eq!(status.to_string(), text);
    assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{text}\""));
    assert_eq!(text.parse::<MediaStatus>().unwrap(), status);
}

#[test]
fn unknown_status_is_rejected() {
    let err = "bogus".parse::<MediaStatus>().unwrap_err();
    assert_eq!(err.0, "bogus");
}
