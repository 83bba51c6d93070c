//! pagereplay - replays page-reference traces against replacement policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          pagereplay                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Simulation (sim/)                         │   │
//! │  │     SweepPlan → execute (worker threads) → SweepReport   │   │
//! │  │                 run / replay per config                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Resident Set (buffer/)                        │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Replacers: LRU | CLOCK | OPTIMAL               │   │   │
//! │  │   │        (one Replacer trait, per-slot state)     │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │          ResidentSet + Slot + single-pass Probe          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Trace (trace/)                           │   │
//! │  │   TraceCursor: ReaderCursor (seek) | TraceReplay (Arc)   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ReferenceId, FrameId, Error, config)
//! - [`trace`] - Trace cursors and bounded lookahead
//! - [`buffer`] - Resident set and replacement policies
//! - [`sim`] - Run driver, sweeps and reports
//!
//! # Quick Start
//! ```
//! use pagereplay::common::{LruMode, PolicyKind, RunConfig};
//! use pagereplay::trace::Trace;
//!
//! let trace = Trace::from_reader("A\nB\nA\nB\nC\nA\n".as_bytes()).unwrap();
//! let config = RunConfig::new(2, PolicyKind::Lru(LruMode::Timestamp)).unwrap();
//!
//! let report = pagereplay::sim::run(&config, &mut trace.cursor()).unwrap();
//! assert_eq!(report.counters.faults, 4);
//! assert_eq!(report.counters.accesses, 6);
//! ```

pub mod buffer;
pub mod common;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, FrameId, PolicyKind, ReferenceId, Result, RunConfig, RunCounters};

pub use buffer::replacer::{ClockReplacer, LruReplacer, OptimalReplacer};
pub use buffer::{Access, Replacer, ResidentSet};
pub use sim::{RunReport, SweepPlan, SweepReport};
pub use trace::{ReaderCursor, Trace, TraceCursor};
