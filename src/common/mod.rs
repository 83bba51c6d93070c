//! Common types and utilities shared across pagereplay.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Run configuration ([`RunConfig`], [`PolicyKind`])
//! - Error types
//! - Identifiers (ReferenceId, FrameId) and run counters

pub mod config;

pub use config::{Lookahead, LruMode, PolicyKind, RunConfig};
pub use pagereplay_core::config::{
    DEFAULT_HORIZON, REFERENCE_WIDTH, SWEEP_FRAME_COUNTS, SWEEP_PERIODS,
};
pub use pagereplay_core::{Error, FrameId, ReferenceId, Result, RunCounters};
