//! Integration tests for trace replay.
//!
//! These tests drive whole runs from trace files on disk, through both the
//! streaming and the in-memory cursor.

use std::fs;
use std::path::{Path, PathBuf};

use pagereplay::common::{Error, Lookahead, LruMode, PolicyKind, RunConfig, DEFAULT_HORIZON};
use pagereplay::sim::{self, SweepPlan, SweepReport};
use pagereplay::trace::{ReaderCursor, Trace, TraceCursor};
use tempfile::tempdir;

fn write_trace(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A trace with some locality: a hot set of five pages plus a cold stream.
fn synthetic_trace(len: usize) -> String {
    let mut out = String::new();
    for i in 0..len {
        let page = if i % 3 == 0 { 100 + (i * 7) % 23 } else { i % 5 };
        out.push_str(&format!("{:05x}deadbeef\n", page));
    }
    out
}

fn all_policies(period: u64) -> Vec<PolicyKind> {
    vec![
        PolicyKind::Lru(LruMode::Timestamp),
        PolicyKind::Lru(LruMode::Periodic { period }),
        PolicyKind::SecondChance,
        PolicyKind::Optimal {
            horizon: DEFAULT_HORIZON,
            lookahead: Lookahead::Exact,
        },
        PolicyKind::Optimal {
            horizon: DEFAULT_HORIZON,
            lookahead: Lookahead::Collapsed,
        },
    ]
}

/// The worked example from a file, for every cursor.
#[test]
fn test_worked_example_from_file() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "example.trace", "A\nB\nA\nB\nC\nA\n");
    let config = RunConfig::new(2, PolicyKind::Lru(LruMode::Timestamp)).unwrap();

    let streamed = sim::run(&config, &mut ReaderCursor::open(&path).unwrap()).unwrap();
    let loaded = sim::run(&config, &mut Trace::load(&path).unwrap().cursor()).unwrap();

    assert_eq!(streamed.counters.faults, 4);
    assert_eq!(streamed.counters.accesses, 6);
    assert_eq!(streamed, loaded);
}

/// Streaming and in-memory cursors must produce identical counts.
#[test]
fn test_streaming_matches_in_memory() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "synthetic.trace", &synthetic_trace(1500));
    let trace = Trace::load(&path).unwrap();
    assert_eq!(trace.len(), 1500);

    for frames in [1, 3, 8] {
        for policy in all_policies(25) {
            let config = RunConfig::new(frames, policy).unwrap();
            let streamed = sim::run(&config, &mut ReaderCursor::open(&path).unwrap()).unwrap();
            let loaded = sim::run(&config, &mut trace.cursor()).unwrap();
            assert_eq!(streamed.counters, loaded.counters, "{}", config);
        }
    }
}

/// Long lines collapse to their first five bytes; CRLF endings are ignored.
#[test]
fn test_line_truncation_and_endings() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "crlf.trace", "12345AAA\r\n12345BBB\r\n-1\r\n-1\n");
    let config = RunConfig::new(4, PolicyKind::SecondChance).unwrap();

    let report = sim::run(&config, &mut ReaderCursor::open(&path).unwrap()).unwrap();
    // "12345" twice, "-1" twice: two distinct pages.
    assert_eq!(report.counters.faults, 2);
    assert_eq!(report.counters.accesses, 4);
}

/// A file without a trailing newline still yields its last reference.
#[test]
fn test_missing_final_newline() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "tail.trace", "A\nB\nA");

    let mut cursor = ReaderCursor::open(&path).unwrap();
    let mut count = 0;
    while cursor.next_reference().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 3);
}

/// Unreadable trace paths are reported, not panicked on.
#[test]
fn test_missing_trace_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.trace");

    assert!(matches!(ReaderCursor::open(&path), Err(Error::TraceOpen { .. })));
    assert!(matches!(Trace::load(&path), Err(Error::TraceOpen { .. })));
}

/// Each sweep configuration opens its own stream.
#[test]
fn test_streaming_sweep_in_parallel() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "sweep.trace", &synthetic_trace(400));
    let trace = Trace::load(&path).unwrap();
    let plan = SweepPlan::from_args(0, 0, DEFAULT_HORIZON, Lookahead::Exact).unwrap();

    let streamed = sim::execute(&plan, 4, || ReaderCursor::open(&path));
    let loaded = sim::execute(&plan, 1, || Ok(trace.cursor()));

    assert_eq!(streamed.len(), plan.len());
    for (s, l) in streamed.iter().zip(&loaded) {
        assert_eq!(s.config, l.config);
        assert_eq!(s.outcome.as_ref().unwrap(), l.outcome.as_ref().unwrap());
    }

    let report = SweepReport::new(&streamed);
    assert_eq!(report.failures(), 0);
    let text = report.to_string();
    for heading in ["LRU - Timestamp", "LRU - Counter", "Second Chance", "Optimal"] {
        assert_eq!(text.matches(&format!("\n{}\n", heading)).count(), 1, "{}", heading);
    }
}

/// A sweep over a vanished file fails every configuration but still returns.
#[test]
fn test_sweep_with_missing_file_reports_failures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.trace");
    let plan = SweepPlan::from_args(4, 10, DEFAULT_HORIZON, Lookahead::Exact).unwrap();

    let results = sim::execute(&plan, 2, || ReaderCursor::open(&path));
    assert_eq!(SweepReport::new(&results).failures(), plan.len());
}

/// More frames never hurt the optimal policy when the horizon covers the trace.
#[test]
fn test_optimal_improves_with_frames() {
    let trace: Trace = Trace::from_reader(synthetic_trace(DEFAULT_HORIZON).as_bytes()).unwrap();

    let mut previous = u64::MAX;
    for frames in [1, 2, 4, 8, 16, 32] {
        let config = RunConfig::new(frames, PolicyKind::optimal()).unwrap();
        let faults = sim::run(&config, &mut trace.cursor()).unwrap().counters.faults;
        assert!(faults <= previous, "{} frames: {} > {}", frames, faults, previous);
        previous = faults;
    }
}

/// Collapsed optimal fault counts for a 60-reference trace whose lookaheads
/// run into the end of the file, for 1 through 6 frames.
#[test]
fn test_collapsed_optimal_near_end_of_trace() {
    const EXPECTED: [u64; 6] = [60, 51, 43, 42, 35, 32];

    let text: String = (0..60)
        .map(|i| format!("p{}\n", (i * 7 + i / 3) % 9))
        .collect();
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "tail.trace", &text);
    let trace = Trace::load(&path).unwrap();

    for (frames, expected) in (1..=6).zip(EXPECTED) {
        let policy = PolicyKind::Optimal {
            horizon: DEFAULT_HORIZON,
            lookahead: Lookahead::Collapsed,
        };
        let config = RunConfig::new(frames, policy).unwrap();

        let streamed = sim::run(&config, &mut ReaderCursor::open(&path).unwrap()).unwrap();
        let loaded = sim::run(&config, &mut trace.cursor()).unwrap();

        assert_eq!(streamed.counters.faults, expected, "{}", config);
        assert_eq!(loaded.counters, streamed.counters, "{}", config);
        assert_eq!(loaded.counters.accesses, 60);
    }
}
