//! Scheduler state machine tests exercised through the public API.

use std::time::{Duration, Instant};

use dupelens::collection::FileDescriptor;
use dupelens::engine::{Completion, Engine, EngineState, RequestOutcome, LATENCY_FLOOR};
use dupelens::similarity::{AnalysisResult, AnalyzeError};

const FLOOR: Duration = Duration::from_millis(200);

fn descriptors(names: &[&str]) -> Vec<FileDescriptor> {
    names
        .iter()
        .map(|name| FileDescriptor::new(*name, 1024))
        .collect()
}

#[test]
fn default_latency_floor_is_1500ms() {
    assert_eq!(LATENCY_FLOOR, Duration::from_millis(1500));
}

#[test]
fn busy_state_is_observable_before_any_work() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();

    let outcome = engine
        .request_analysis(descriptors(&["a.txt", "b.txt"]), start)
        .unwrap();

    // Synchronous transition: no tick has happened yet
    assert_eq!(outcome, RequestOutcome::Started);
    assert_eq!(engine.state(), EngineState::Running);
    assert!(engine.latest_result().is_none());
}

#[test]
fn below_minimum_collection_never_starts() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();

    for names in [&[][..], &["only.txt"][..]] {
        let err = engine.request_analysis(descriptors(names), start).unwrap_err();
        assert!(matches!(err, AnalyzeError::TooFewFiles(_)));
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.latest_result().is_none());
    }
}

#[test]
fn completion_waits_for_the_floor() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();
    engine
        .request_analysis(descriptors(&["a.txt", "b.txt"]), start)
        .unwrap();

    for offset_ms in [0, 50, 199] {
        let now = start + Duration::from_millis(offset_ms);
        assert!(engine.tick(2, now).is_none());
        assert_eq!(engine.state(), EngineState::Running);
    }

    assert_eq!(engine.tick(2, start + FLOOR), Some(Completion::Published));
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn exactly_one_result_per_run() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();
    engine
        .request_analysis(descriptors(&["a.txt", "b.txt"]), start)
        .unwrap();

    assert!(engine.tick(2, start + FLOOR).is_some());
    // Further ticks are no-ops until the next request
    assert!(engine.tick(2, start + FLOOR * 2).is_none());
    assert!(engine.tick(2, start + FLOOR * 3).is_none());
}

#[test]
fn repeated_request_while_running_is_ignored_not_queued() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();
    engine
        .request_analysis(descriptors(&["a.txt", "b.txt"]), start)
        .unwrap();

    let outcome = engine
        .request_analysis(descriptors(&["c.txt", "d.txt", "e.txt"]), start)
        .unwrap();
    assert_eq!(outcome, RequestOutcome::AlreadyRunning);

    // Only the first snapshot's completion is ever published
    assert_eq!(engine.tick(2, start + FLOOR), Some(Completion::Published));
    assert!(engine.tick(3, start + FLOOR * 2).is_none());
}

#[test]
fn mid_flight_removal_discards_the_result() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();
    engine
        .request_analysis(descriptors(&["report.pdf", "report_v2.pdf", "readme.txt"]), start)
        .unwrap();

    // Live collection shrank from 3 to 2 while the analysis was pending
    let completion = engine.tick(2, start + FLOOR).unwrap();
    assert_eq!(completion, Completion::DiscardedStale);
    assert_eq!(engine.latest_result(), Some(&AnalysisResult::NoDuplicates));
}

#[test]
fn mid_flight_addition_also_discards() {
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();
    engine
        .request_analysis(descriptors(&["a.txt", "b.txt"]), start)
        .unwrap();

    let completion = engine.tick(3, start + FLOOR).unwrap();
    assert_eq!(completion, Completion::DiscardedStale);
}

#[test]
fn idempotent_runs_over_unchanged_collection() {
    let files = descriptors(&["report.pdf", "report_v2.pdf"]);
    let mut engine = Engine::with_floor(FLOOR);
    let start = Instant::now();

    engine.request_analysis(files.clone(), start).unwrap();
    engine.tick(2, start + FLOOR);
    let first = engine.latest_result().cloned().unwrap();

    engine.request_analysis(files, start + FLOOR).unwrap();
    engine.tick(2, start + FLOOR * 2);
    let second = engine.latest_result().cloned().unwrap();

    assert_eq!(first, second);
}
