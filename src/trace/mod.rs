//! Trace layer - sequential access to page references.
//!
//! This module turns trace text into [`ReferenceId`]s:
//! - [`TraceCursor`] - The cursor contract every run reads through
//! - [`Occurrence`] - What a bounded lookahead found
//! - [`ReaderCursor`] - Streams a file, looks ahead by seeking back
//! - [`Trace`] / [`TraceReplay`] - Tokenize once, replay many times
//!
//! [`ReferenceId`]: crate::common::ReferenceId

mod cursor;
mod memory;

pub use cursor::{Occurrence, ReaderCursor, TraceCursor};
pub use memory::{Trace, TraceReplay};
