//! Core type definitions for pagereplay.

use crate::config::REFERENCE_WIDTH;
use std::fmt;

// ============================================================================
// REFERENCE IDENTIFIERS
// ============================================================================

/// A page reference read from one trace line.
///
/// Only the first [`REFERENCE_WIDTH`] bytes of a line are significant. The
/// token is stored inline, so a `ReferenceId` is `Copy` and comparing two of
/// them never touches the heap.
///
/// There is no reserved "empty" token: an empty frame is represented by
/// `Option::None` in the resident set, so every token a trace can contain
/// (including `-1`) is a legitimate reference.
///
/// # Example
/// ```
/// use pagereplay_core::ReferenceId;
///
/// let id = ReferenceId::from_line(b"0041a7f3\n");
/// assert_eq!(id.as_bytes(), b"0041a");
/// assert_eq!(id, ReferenceId::from("0041a"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId {
    bytes: [u8; REFERENCE_WIDTH],
    len: u8,
}

impl ReferenceId {
    /// Build a reference from a raw trace line.
    ///
    /// The line terminator (`\n` or `\r\n`) is dropped first, then the token
    /// is truncated to [`REFERENCE_WIDTH`] bytes. Shorter lines are kept as-is.
    pub fn from_line(line: &[u8]) -> Self {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let len = line.len().min(REFERENCE_WIDTH);
        let mut bytes = [0u8; REFERENCE_WIDTH];
        bytes[..len].copy_from_slice(&line[..len]);

        Self {
            bytes,
            len: len as u8,
        }
    }

    /// The significant bytes of the token.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of significant bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the token produced by a blank line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<&str> for ReferenceId {
    fn from(token: &str) -> Self {
        Self::from_line(token.as_bytes())
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

// ============================================================================
// FRAME IDENTIFIERS
// ============================================================================

/// Identifies a slot in the resident set.
///
/// Slots are stored in a `Vec`, so the id doubles as an index:
/// `slots[frame_id.0]`. Index order is also scan order, which is what every
/// policy uses to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

// ============================================================================
// RUN COUNTERS
// ============================================================================

/// Fault and access counts for a single run.
///
/// Counters only ever go up, and a fresh set is created for every run. A run
/// is single-threaded, so these are plain integers rather than atomics.
///
/// # Example
/// ```
/// use pagereplay_core::RunCounters;
///
/// let mut counters = RunCounters::new();
/// counters.record_access(true, false);
/// counters.record_access(false, false);
/// assert_eq!(counters.faults, 1);
/// assert_eq!(counters.hits(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// References that were not resident.
    pub faults: u64,

    /// Total references processed.
    pub accesses: u64,

    /// Faults that had to displace a resident page.
    pub evictions: u64,
}

impl RunCounters {
    /// Create a new counter set with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one processed reference.
    #[inline]
    pub fn record_access(&mut self, fault: bool, evicted: bool) {
        self.accesses += 1;
        if fault {
            self.faults += 1;
        }
        if evicted {
            self.evictions += 1;
        }
    }

    /// References that were already resident.
    pub fn hits(&self) -> u64 {
        self.accesses - self.faults
    }

    /// Fault rate (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.faults as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for RunCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There were a total of {} faults in {} total memory accesses.",
            self.faults, self.accesses
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
