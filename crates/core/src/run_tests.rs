// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn close_clamps_to_started_at() {
    let mut run = RunItem::builder().started_at(500).build();
    run.close(RunStatus::Done, 100);
    assert_eq!(run.status, RunStatus::Done);
    assert_eq!(run.finished_at, Some(500));
    assert_eq!(run.duration_secs(), Some(0));
}

#[test]
fn tighten_only_moves_earlier() {
    let mut run = RunItem::builder().status(RunStatus::Done).started_at(100).finished_at(300u64).build();
    assert!(!run.tighten_finish(400));
    assert_eq!(run.finished_at, Some(300));
    assert!(run.tighten_finish(200));
    assert_eq!(run.finished_at, Some(200));
    assert!(run.tighten_finish(50));
    assert_eq!(run.finished_at, Some(100));
}

#[test]
fn tighten_ignores_open_run() {
    let mut run = RunItem::builder().build();
    assert!(!run.tighten_finish(10));
    assert_eq!(run.finished_at, None);
}

#[test]
fn run_id_composition() {
    let id = run_id_for(&MediaId::new("abc"), RunType::Pipeline, 77);
    assert_eq!(id, "abc-pipeline-77");
}

#[test]
fn run_type_serializes_under_type_key() {
    let run = RunItem::builder().run_type(RunType::Translate).build();
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["type"], "translate");
    assert!(json.get("finished_at").is_none());
}

proptest! {
    #[test]
    fn finished_never_precedes_started(
        started in 0u64..10_000,
        finish in 0u64..10_000,
        completion in 0u64..10_000,
    ) {
        let mut run = RunItem::builder().started_at(started).build();
        run.close(RunStatus::Failed, finish);
        run.tighten_finish(completion);
        let finished = run.finished_at.unwrap();
        prop_assert!(finished >= run.started_at);

        let synthetic = RunItem::closed(
            RunId::new("r"), MediaId::new("m"), RunType::Pipeline, RunStatus::Done, started, finish,
        );
        prop_assert!(synthetic.finished_at.unwrap() >= synthetic.started_at);
    }
}
