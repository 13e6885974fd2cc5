// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fs::FakeFs;
use autosub_core::FakeClock;
use std::fs;
use tempfile::tempdir;

#[yare::parameterized(
    mp4        = { "a.mp4",  true  },
    upper_mkv  = { "A.MKV",  true  },
    webm       = { "a.webm", true  },
    mov        = { "a.Mov",  true  },
    avi        = { "a.avi",  true  },
    subtitle   = { "a.srt",  false },
    no_ext     = { "mp4",    false },
    marker     = { "a.done", false },
)]
fn video_extensions(name: &str, expected: bool) {
    assert_eq!(is_video(Path::new(name)), expected);
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"x").unwrap();
}

#[test]
fn walkdir_scan_respects_recursion() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    touch(&root.join("top.mp4"));
    touch(&root.join("notes.txt"));
    touch(&root.join("season1/ep1.MKV"));
    touch(&root.join("season1/deep/ep2.avi"));

    let scanner = WalkdirScanner::new();
    let recursive = scanner.scan(&[root.clone()], true);
    let mut names: Vec<_> = recursive.iter().map(|f| f.path.clone()).collect();
    names.sort();
    assert_eq!(
        names,
        vec![root.join("season1/deep/ep2.avi"), root.join("season1/ep1.MKV"), root.join("top.mp4")]
    );

    let flat = scanner.scan(&[root.clone()], false);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].path, root.join("top.mp4"));
    assert_eq!(flat[0].size, 1);
}

#[test]
fn walkdir_scan_skips_missing_and_file_roots() {
    let dir = tempdir().unwrap();
    let file_root = dir.path().join("file.mp4");
    touch(&file_root);
    let found = WalkdirScanner::new().scan(&[dir.path().join("nope"), file_root], true);
    assert!(found.is_empty());
}

#[test]
fn results_are_newest_first_with_stable_ties() {
    let mut files = vec![
        ScannedFile { path: "/b.mp4".into(), size: 1, mtime: 5 },
        ScannedFile { path: "/a.mp4".into(), size: 1, mtime: 5 },
        ScannedFile { path: "/c.mp4".into(), size: 1, mtime: 9 },
    ];
    sort_newest_first(&mut files);
    let order: Vec<_> = files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
    assert_eq!(order, vec!["/c.mp4", "/a.mp4", "/b.mp4"]);
}

#[test]
fn fake_scan_matches_walkdir_semantics() {
    let fake = FakeFs::new();
    fake.touch("/m/a.mp4", 1);
    fake.touch("/m/sub/b.mkv", 2);
    fake.touch("/m/a.srt", 3);
    fake.touch("/other/c.mp4", 4);

    let roots = [PathBuf::from("/m")];
    let all: Vec<_> = fake.scan(&roots, true).into_iter().map(|f| f.path).collect();
    assert_eq!(all, vec![PathBuf::from("/m/sub/b.mkv"), PathBuf::from("/m/a.mp4")]);
    let flat: Vec<_> = fake.scan(&roots, false).into_iter().map(|f| f.path).collect();
    assert_eq!(flat, vec![PathBuf::from("/m/a.mp4")]);
}

#[test]
fn cached_scanner_serves_within_ttl_and_refreshes_after() {
    let fake = FakeFs::new();
    fake.touch("/m/a.mp4", 1);
    let clock = FakeClock::new();
    let cached = CachedScanner::new(fake.clone(), clock.clone());
    let roots = [PathBuf::from("/m")];

    assert_eq!(cached.scan(&roots, true).len(), 1);
    fake.touch("/m/b.mp4", 2);
    assert_eq!(cached.scan(&roots, true).len(), 1);
    assert_eq!(fake.scan_count(), 1);

    clock.advance(DEFAULT_SCAN_TTL);
    assert_eq!(cached.scan(&roots, true).len(), 2);
    assert_eq!(fake.scan_count(), 2);
}

#[test]
fn cached_scanner_keys_on_roots_and_recursion() {
    let fake = FakeFs::new();
    fake.touch("/m/sub/a.mp4", 1);
    let cached = CachedScanner::new(fake.clone(), FakeClock::new());
    let roots = [PathBuf::from("/m")];

    assert_eq!(cached.scan(&roots, true).len(), 1);
    assert_eq!(cached.scan(&roots, false).len(), 0);
    assert_eq!(fake.scan_count(), 2);

    cached.invalidate();
    cached.scan(&roots, true);
    assert_eq!(fake.scan_count(), 3);
}
