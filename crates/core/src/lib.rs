//! Core types and constants for pagereplay.
//!
//! This crate provides the primitives shared by the replay engine:
//!
//! # Types
//! - [`ReferenceId`] - One page reference taken from a trace line
//! - [`FrameId`] - Index of a slot in the resident set
//! - [`RunCounters`] - Fault/access counters for one run
//!
//! # Constants
//! - [`REFERENCE_WIDTH`] - Significant bytes per trace line (5)
//! - [`DEFAULT_HORIZON`] - Optimal policy lookahead bound (500)
//!
//! # Error Handling
//! - [`Error`] - Unified error type
//! - [`Result<T>`] - Convenient result alias
//!
//! # Example
//! ```
//! use pagereplay_core::{ReferenceId, RunCounters, REFERENCE_WIDTH};
//!
//! let id = ReferenceId::from_line(b"deadbeef\n");
//! assert_eq!(id.len(), REFERENCE_WIDTH);
//!
//! let counters = RunCounters::new();
//! assert_eq!(counters.accesses, 0);
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::{DEFAULT_HORIZON, REFERENCE_WIDTH};
pub use error::{Error, Result};
pub use types::{FrameId, ReferenceId, RunCounters};
