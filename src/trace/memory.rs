//! In-memory traces.
//!
//! A [`Trace`] is tokenized once and shared behind an `Arc`, so a sweep can
//! hand every configuration its own [`TraceReplay`] cursor without reopening
//! or re-reading the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::common::{Error, ReferenceId, Result};
use crate::trace::{Occurrence, TraceCursor};

/// An immutable, cheaply clonable sequence of references.
///
/// # Example
/// ```
/// use pagereplay::trace::{Trace, TraceCursor};
///
/// let trace = Trace::from_reader("A\nB\nA\n".as_bytes()).unwrap();
/// assert_eq!(trace.len(), 3);
///
/// let mut replay = trace.cursor();
/// let first = replay.next_reference().unwrap().unwrap();
/// assert_eq!(replay.distance_to_next_occurrence(&first, 500).unwrap(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trace {
    references: Arc<[ReferenceId]>,
}

impl Trace {
    /// Read and tokenize a whole trace file.
    ///
    /// # Errors
    /// - `Error::TraceOpen` if the file cannot be opened
    /// - `Error::Io` if reading fails part way
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Tokenize every line of `reader`.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut references = Vec::new();
        let mut line = Vec::with_capacity(16);

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            references.push(ReferenceId::from_line(&line));
        }

        log::debug!("loaded trace with {} references", references.len());
        Ok(Self {
            references: references.into(),
        })
    }

    /// Number of references in the trace.
    pub fn len(&self) -> usize {
        self.references.len()
    }

    /// True if the trace holds no references.
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// The references, in trace order.
    pub fn references(&self) -> &[ReferenceId] {
        &self.references
    }

    /// A fresh cursor positioned at the first reference.
    pub fn cursor(&self) -> TraceReplay {
        TraceReplay {
            references: Arc::clone(&self.references),
            position: 0,
        }
    }
}

impl FromIterator<ReferenceId> for Trace {
    fn from_iter<I: IntoIterator<Item = ReferenceId>>(iter: I) -> Self {
        Self {
            references: iter.into_iter().collect(),
        }
    }
}

/// Cursor over a shared [`Trace`].
///
/// Lookahead is a slice scan, so the position never moves and there is
/// nothing to restore.
#[derive(Debug, Clone)]
pub struct TraceReplay {
    references: Arc<[ReferenceId]>,
    position: usize,
}

impl TraceCursor for TraceReplay {
    fn next_reference(&mut self) -> Result<Option<ReferenceId>> {
        let reference = self.references.get(self.position).copied();
        if reference.is_some() {
            self.position += 1;
        }
        Ok(reference)
    }

    fn next_occurrence(&mut self, id: &ReferenceId, horizon: usize) -> Result<Occurrence> {
        let rest = &self.references[self.position..];
        let occurrence = match rest.iter().take(horizon).position(|r| r == id) {
            Some(distance) => Occurrence::At(distance),
            None if rest.len() < horizon => Occurrence::EndOfTrace(rest.len()),
            None => Occurrence::BeyondHorizon,
        };
        Ok(occurrence)
    }

    fn position(&self) -> u64 {
        self.position as u64
    }
}
