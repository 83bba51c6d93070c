//! Streaming trace cursor.
//!
//! [`ReaderCursor`] reads one line per reference from any `BufRead + Seek`
//! source. Lookahead reads forward and then seeks back to where it started.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::common::{Error, ReferenceId, Result};

/// Outcome of a bounded lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Found after skipping this many references.
    At(usize),

    /// The trace ended after this many references without a match.
    EndOfTrace(usize),

    /// Not among the next `horizon` references.
    BeyondHorizon,
}

impl Occurrence {
    /// Distance to the match, if there was one.
    #[inline]
    pub fn distance(self) -> Option<usize> {
        match self {
            Occurrence::At(distance) => Some(distance),
            Occurrence::EndOfTrace(_) | Occurrence::BeyondHorizon => None,
        }
    }
}

/// A sequential source of references with bounded, non-consuming lookahead.
///
/// The Optimal policy is the only caller of
/// [`next_occurrence`](TraceCursor::next_occurrence); the other policies
/// only ever see references handed to them by the run driver.
pub trait TraceCursor {
    /// Consume and return the next reference, or `None` at end of trace.
    fn next_reference(&mut self) -> Result<Option<ReferenceId>>;

    /// Look for `id` among the next `horizon` references.
    ///
    /// Scanning starts at the reference `next_reference` would return next,
    /// so `At(0)` means that very reference is `id`. A trace that runs out
    /// before `horizon` references without a match gives `EndOfTrace` with
    /// the number of references it did see. At most `horizon` references are
    /// examined, and the cursor is left exactly where it was on every path,
    /// including errors.
    ///
    /// # Errors
    /// - `Error::Reposition` if the position could not be restored
    /// - `Error::Io` if reading ahead failed
    fn next_occurrence(&mut self, id: &ReferenceId, horizon: usize) -> Result<Occurrence>;

    /// Count how many references are skipped before `id` shows up again.
    ///
    /// `None` when `id` is not within `horizon` references, whether or not
    /// the trace ends first.
    fn distance_to_next_occurrence(
        &mut self,
        id: &ReferenceId,
        horizon: usize,
    ) -> Result<Option<usize>> {
        Ok(self.next_occurrence(id, horizon)?.distance())
    }

    /// Number of references consumed so far.
    fn position(&self) -> u64;
}

impl<C: TraceCursor + ?Sized> TraceCursor for &mut C {
    fn next_reference(&mut self) -> Result<Option<ReferenceId>> {
        (**self).next_reference()
    }

    fn next_occurrence(&mut self, id: &ReferenceId, horizon: usize) -> Result<Occurrence> {
        (**self).next_occurrence(id, horizon)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }
}

/// Cursor over a seekable line-oriented source.
///
/// # File Layout
/// One reference per line; only the first
/// [`REFERENCE_WIDTH`](crate::common::REFERENCE_WIDTH) bytes count:
/// ```text
/// 0041a7f3\n   -> "0041a"
/// 7ffe\n       -> "7ffe"
/// 0041a000\n   -> "0041a"
/// ```
///
/// # Thread Safety
/// A `ReaderCursor` owns its reader and is used by exactly one run. Runs that
/// stream the same file each open their own cursor.
pub struct ReaderCursor<R> {
    reader: R,
    /// Reused line buffer.
    line: Vec<u8>,
    /// References returned by `next_reference`.
    consumed: u64,
}

impl ReaderCursor<BufReader<File>> {
    /// Open a trace file for streaming.
    ///
    /// # Errors
    /// Returns `Error::TraceOpen` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead + Seek> ReaderCursor<R> {
    /// Wrap an already-open source positioned at its first reference.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(16),
            consumed: 0,
        }
    }

    fn read_reference(&mut self) -> Result<Option<ReferenceId>> {
        self.line.clear();
        let n = self.reader.read_until(b'\n', &mut self.line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(ReferenceId::from_line(&self.line)))
    }

    fn scan_for(&mut self, id: &ReferenceId, horizon: usize) -> Result<Occurrence> {
        for skipped in 0..horizon {
            match self.read_reference()? {
                Some(next) if next == *id => return Ok(Occurrence::At(skipped)),
                Some(_) => {}
                None => return Ok(Occurrence::EndOfTrace(skipped)),
            }
        }
        Ok(Occurrence::BeyondHorizon)
    }
}

impl<R: BufRead + Seek> TraceCursor for ReaderCursor<R> {
    fn next_reference(&mut self) -> Result<Option<ReferenceId>> {
        let reference = self.read_reference()?;
        if reference.is_some() {
            self.consumed += 1;
        }
        Ok(reference)
    }

    fn next_occurrence(&mut self, id: &ReferenceId, horizon: usize) -> Result<Occurrence> {
        let origin = self.reader.stream_position()?;

        // Restore before looking at the scan result so a read error
        // mid-scan still leaves the cursor where it was.
        let scanned = self.scan_for(id, horizon);
        self.reader
            .seek(SeekFrom::Start(origin))
            .map_err(|source| Error::Reposition {
                offset: origin,
                source,
            })?;

        scanned
    }

    fn position(&self) -> u64 {
        self.consumed
    }
}
