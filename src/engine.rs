//! Analysis execution engine and scheduler.
//!
//! # Overview
//!
//! The engine runs the pairwise similarity analysis without blocking the
//! caller. It is a two-state machine:
//!
//! ```text
//! Idle --request(n >= 2)--> Running --tick after floor--> Idle
//! ```
//!
//! Entering `Running` happens synchronously so the UI can show a busy
//! indicator before any work is done. The comparison itself runs later,
//! once a fixed minimum-latency floor has elapsed, driven by [`Engine::tick`]
//! calls from the caller's event loop. No threads are involved: the engine
//! suspends cooperatively between `request_analysis` and the completing
//! `tick`.
//!
//! # Scheduling contract
//!
//! - A request while `Running` is ignored, not queued.
//! - A request with fewer than two files fails synchronously and the
//!   engine stays `Idle`.
//! - Once started, an analysis always completes and publishes exactly one
//!   result, replacing any previous one. There is no cancellation.
//! - The collection is snapshotted at request time. If the live collection's
//!   size has changed by the time the analysis completes, the computed pairs
//!   are discarded and `NoDuplicates` is published instead of output that no
//!   longer matches what the user sees.
//!
//! Time is injected as `Instant` arguments, so the latency floor and the
//! comparison algorithm are testable independently and deterministically.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use dupelens::collection::FileDescriptor;
//! use dupelens::engine::{Engine, EngineState};
//!
//! let mut engine = Engine::with_floor(Duration::from_millis(100));
//! let snapshot = vec![
//!     FileDescriptor::new("report.pdf", 1024),
//!     FileDescriptor::new("report_v2.pdf", 2048),
//! ];
//!
//! let start = Instant::now();
//! engine.request_analysis(snapshot, start).unwrap();
//! assert_eq!(engine.state(), EngineState::Running);
//!
//! // Before the floor elapses, ticking does nothing
//! assert!(engine.tick(2, start).is_none());
//!
//! // After the floor, the result is published
//! engine.tick(2, start + Duration::from_millis(100)).unwrap();
//! assert!(engine.latest_result().is_some());
//! ```

use std::time::{Duration, Instant};

use crate::collection::FileDescriptor;
use crate::similarity::{analyze, AnalysisResult, AnalyzeError};

/// Fixed minimum delay before an analysis completes.
///
/// This is a UX floor guaranteeing the busy indicator is perceptible, not
/// a deadline on the work: the metadata comparison itself is effectively
/// instantaneous at practical collection sizes.
pub const LATENCY_FLOOR: Duration = Duration::from_millis(1500);

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No analysis in flight; requests are accepted.
    #[default]
    Idle,
    /// An analysis is pending completion; further requests are ignored.
    Running,
}

/// Outcome of a `request_analysis` call that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The engine transitioned to `Running`.
    Started,
    /// An analysis was already in flight; the request was ignored.
    AlreadyRunning,
}

/// Outcome of a `tick` call that completed an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The computed result was published.
    Published,
    /// The live collection changed while the analysis was in flight; the
    /// computed pairs were discarded and `NoDuplicates` published instead.
    DiscardedStale,
}

/// Internal run state. `Running` carries the snapshot taken at request
/// time and the instant the latency floor elapses.
#[derive(Debug)]
enum Phase {
    Idle,
    Running {
        snapshot: Vec<FileDescriptor>,
        ready_at: Instant,
    },
}

/// Analysis engine: owns the scheduler state and the latest published
/// result.
///
/// The engine is an explicit state object driven by method calls; it holds
/// no ambient or global state and spawns no threads. It must be ticked
/// periodically (the TUI does this once per frame) for in-flight analyses
/// to complete.
#[derive(Debug)]
pub struct Engine {
    phase: Phase,
    latest: Option<AnalysisResult>,
    floor: Duration,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the default latency floor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_floor(LATENCY_FLOOR)
    }

    /// Create an engine with a custom latency floor (used by tests to keep
    /// the scheduler deterministic and fast).
    #[must_use]
    pub fn with_floor(floor: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            latest: None,
            floor,
        }
    }

    /// Current scheduler state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        match self.phase {
            Phase::Idle => EngineState::Idle,
            Phase::Running { .. } => EngineState::Running,
        }
    }

    /// The most recently published result, if any.
    #[must_use]
    pub fn latest_result(&self) -> Option<&AnalysisResult> {
        self.latest.as_ref()
    }

    /// Discard the published result.
    ///
    /// Called by the collection owner whenever the collection is mutated:
    /// a result is tied to the exact contents it was computed over and must
    /// never be shown against a different collection.
    pub fn invalidate_result(&mut self) {
        if self.latest.take().is_some() {
            log::debug!("Published result invalidated by collection change");
        }
    }

    /// Request an analysis over `snapshot`.
    ///
    /// On success the engine transitions to `Running` synchronously and the
    /// analysis completes on the first `tick` at or after `now + floor`.
    /// A request while `Running` returns `Ok(AlreadyRunning)` and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::TooFewFiles`] or [`AnalyzeError::EmptyName`]
    /// without leaving `Idle`; validation failures are surfaced to the
    /// caller immediately.
    pub fn request_analysis(
        &mut self,
        snapshot: Vec<FileDescriptor>,
        now: Instant,
    ) -> Result<RequestOutcome, AnalyzeError> {
        if matches!(self.phase, Phase::Running { .. }) {
            log::debug!("Analysis request ignored: already running");
            return Ok(RequestOutcome::AlreadyRunning);
        }

        crate::similarity::analyzer::validate(&snapshot)?;

        log::info!("Analysis started over {} files", snapshot.len());
        self.phase = Phase::Running {
            snapshot,
            ready_at: now + self.floor,
        };
        Ok(RequestOutcome::Started)
    }

    /// Advance the engine.
    ///
    /// Completes the in-flight analysis if the latency floor has elapsed,
    /// publishing its result (or discarding it as stale when `live_len`
    /// differs from the snapshot length). Returns `None` while `Idle` or
    /// still waiting on the floor.
    pub fn tick(&mut self, live_len: usize, now: Instant) -> Option<Completion> {
        let Phase::Running { ready_at, .. } = &self.phase else {
            return None;
        };
        if now < *ready_at {
            return None;
        }

        let snapshot = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running { snapshot, .. } => snapshot,
            Phase::Idle => unreachable!("phase checked above"),
        };

        if snapshot.len() != live_len {
            log::warn!(
                "Collection changed during analysis ({} -> {} files); discarding stale result",
                snapshot.len(),
                live_len
            );
            self.latest = Some(AnalysisResult::NoDuplicates);
            return Some(Completion::DiscardedStale);
        }

        match analyze(&snapshot) {
            Ok(result) => {
                self.latest = Some(result);
                Some(Completion::Published)
            }
            Err(e) => {
                // Unreachable with a snapshot validated at request time.
                log::error!("Analysis failed on validated snapshot: {}", e);
                self.latest = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: Duration = Duration::from_millis(100);

    fn descriptors(names: &[&str]) -> Vec<FileDescriptor> {
        names
            .iter()
            .map(|name| FileDescriptor::new(*name, 1024))
            .collect()
    }

    fn running_engine(names: &[&str], start: Instant) -> Engine {
        let mut engine = Engine::with_floor(FLOOR);
        let outcome = engine
            .request_analysis(descriptors(names), start)
            .expect("valid request");
        assert_eq!(outcome, RequestOutcome::Started);
        engine
    }

    #[test]
    fn test_engine_starts_idle() {
        let engine = Engine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.latest_result().is_none());
    }

    #[test]
    fn test_request_transitions_to_running_synchronously() {
        let engine = running_engine(&["a.txt", "b.txt"], Instant::now());
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn test_request_with_too_few_files_stays_idle() {
        let mut engine = Engine::with_floor(FLOOR);
        let err = engine
            .request_analysis(descriptors(&["alone.txt"]), Instant::now())
            .unwrap_err();
        assert_eq!(err, AnalyzeError::TooFewFiles(1));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_request_with_empty_name_stays_idle() {
        let mut engine = Engine::with_floor(FLOOR);
        let err = engine
            .request_analysis(descriptors(&["ok.txt", ""]), Instant::now())
            .unwrap_err();
        assert_eq!(err, AnalyzeError::EmptyName(1));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_concurrent_request_is_ignored() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt"], start);

        let outcome = engine
            .request_analysis(descriptors(&["c.txt", "d.txt"]), start)
            .unwrap();
        assert_eq!(outcome, RequestOutcome::AlreadyRunning);

        // The original snapshot completes, not the ignored one
        engine.tick(2, start + FLOOR);
        assert_eq!(
            engine.latest_result().unwrap().pairs().len(),
            1,
            "a.txt/b.txt score 100"
        );
    }

    #[test]
    fn test_tick_before_floor_does_nothing() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt"], start);

        assert!(engine.tick(2, start).is_none());
        assert!(engine
            .tick(2, start + FLOOR - Duration::from_millis(1))
            .is_none());
        assert_eq!(engine.state(), EngineState::Running);
        assert!(engine.latest_result().is_none());
    }

    #[test]
    fn test_tick_after_floor_publishes_and_returns_to_idle() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt"], start);

        let completion = engine.tick(2, start + FLOOR).unwrap();
        assert_eq!(completion, Completion::Published);
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.latest_result().unwrap().has_duplicates());

        // Exactly one publication per run
        assert!(engine.tick(2, start + FLOOR * 2).is_none());
    }

    #[test]
    fn test_new_result_replaces_previous() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt"], start);
        engine.tick(2, start + FLOOR);
        assert!(engine.latest_result().unwrap().has_duplicates());

        engine
            .request_analysis(descriptors(&["x.md", "longer_name_here.tar.gz"]), start)
            .unwrap();
        engine.tick(2, start + FLOOR * 2);
        assert!(!engine.latest_result().unwrap().has_duplicates());
    }

    #[test]
    fn test_stale_snapshot_is_discarded() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt", "c.txt"], start);

        // A file was removed from the live collection mid-flight
        let completion = engine.tick(2, start + FLOOR).unwrap();
        assert_eq!(completion, Completion::DiscardedStale);
        assert_eq!(
            engine.latest_result(),
            Some(&AnalysisResult::NoDuplicates)
        );
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_invalidate_result() {
        let start = Instant::now();
        let mut engine = running_engine(&["a.txt", "b.txt"], start);
        engine.tick(2, start + FLOOR);
        assert!(engine.latest_result().is_some());

        engine.invalidate_result();
        assert!(engine.latest_result().is_none());
    }

    #[test]
    fn test_default_floor_constant() {
        let engine = Engine::new();
        assert_eq!(engine.floor, LATENCY_FLOOR);
        assert_eq!(LATENCY_FLOOR.as_millis(), 1500);
    }
}
