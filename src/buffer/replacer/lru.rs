//! LRU (Least Recently Used) replacement policy.
//!
//! Each slot remembers the tick at which its page was last referenced. On a
//! fault with no empty slot, the slot with the smallest tick is replaced;
//! equal ticks go to the lowest index.
//!
//! Two tick sources are supported (see [`LruMode`]):
//! - `Timestamp`: the tick grows for the whole run.
//! - `Periodic`: every `period` references, the tick and every slot's
//!   recency drop back to 0, so only the current window is remembered.

use crate::buffer::replacer::{Access, Replacer};
use crate::buffer::{Probe, ResidentSet};
use crate::common::{FrameId, LruMode, ReferenceId, Result};
use crate::trace::TraceCursor;

/// LRU policy state.
#[derive(Debug, Clone)]
pub struct LruReplacer {
    mode: LruMode,

    /// Tick stamped on the reference being classified.
    tick: u64,
}

impl LruReplacer {
    /// Create an LRU replacer with the given tick source.
    pub fn new(mode: LruMode) -> Self {
        Self { mode, tick: 0 }
    }

    /// LRU with an unbounded timestamp.
    pub fn timestamp() -> Self {
        Self::new(LruMode::Timestamp)
    }

    /// LRU whose history is wiped every `period` references.
    pub fn periodic(period: u64) -> Self {
        Self::new(LruMode::Periodic { period })
    }

    /// The tick the next reference will be stamped with.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

impl Default for LruReplacer {
    fn default() -> Self {
        Self::timestamp()
    }
}

impl Replacer for LruReplacer {
    /// Last-used tick.
    type State = u64;

    fn classify<C>(
        &mut self,
        reference: ReferenceId,
        frames: &mut ResidentSet<u64>,
        _cursor: &mut C,
    ) -> Result<Access>
    where
        C: TraceCursor + ?Sized,
    {
        let tick = self.tick;
        let probe = frames.probe(&reference, |last_used, best| {
            best.map_or(true, |b| last_used < b)
        });

        let access = match probe {
            Probe::Resident(frame) => {
                frames.slot_mut(frame).set_state(tick);
                Access::Hit { frame }
            }
            Probe::Vacant(frame) => {
                frames.slot_mut(frame).load(reference, tick);
                Access::Fault {
                    frame,
                    evicted: None,
                }
            }
            Probe::Full { candidate } => {
                let frame = candidate.unwrap_or(FrameId::new(0));
                let evicted = frames.slot_mut(frame).load(reference, tick);
                log::trace!("lru: {:?} replaces {:?} in {}", reference, evicted, frame);
                Access::Fault { frame, evicted }
            }
        };

        Ok(access)
    }

    fn advance(&mut self, frames: &mut ResidentSet<u64>) {
        self.tick += 1;

        if let LruMode::Periodic { period } = self.mode {
            if self.tick >= period {
                self.tick = 0;
                frames.reset_states(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn run(replacer: &mut LruReplacer, frames: &mut ResidentSet<u64>, tokens: &[&str]) -> Vec<Access> {
        let trace: Trace = tokens.iter().copied().map(ReferenceId::from).collect();
        let mut cursor = trace.cursor();
        let mut accesses = vec![];

        while let Some(reference) = cursor.next_reference().unwrap() {
            accesses.push(replacer.classify(reference, frames, &mut cursor).unwrap());
            replacer.advance(frames);
        }
        accesses
    }

    fn fault(frame: usize, evicted: Option<&str>) -> Access {
        Access::Fault {
            frame: FrameId::new(frame),
            evicted: evicted.map(ReferenceId::from),
        }
    }

    fn hit(frame: usize) -> Access {
        Access::Hit {
            frame: FrameId::new(frame),
        }
    }

    #[test]
    fn test_lru_worked_example() {
        let mut replacer = LruReplacer::timestamp();
        let mut frames = ResidentSet::new(2);

        let accesses = run(&mut replacer, &mut frames, &["A", "B", "A", "B", "C", "A"]);

        assert_eq!(
            accesses,
            vec![
                fault(0, None),
                fault(1, None),
                hit(0),
                hit(1),
                fault(0, Some("A")),
                fault(1, Some("B")),
            ]
        );
        assert_eq!(*frames.slot(FrameId::new(0)).state(), 4);
        assert_eq!(*frames.slot(FrameId::new(1)).state(), 5);
        assert_eq!(replacer.tick(), 6);
    }

    #[test]
    fn test_lru_hit_refreshes_recency() {
        let mut replacer = LruReplacer::timestamp();
        let mut frames = ResidentSet::new(3);

        // A is touched again, so B becomes the oldest.
        let accesses = run(&mut replacer, &mut frames, &["A", "B", "C", "A", "D"]);
        assert_eq!(accesses[4], fault(1, Some("B")));
    }

    #[test]
    fn test_lru_single_frame() {
        let mut replacer = LruReplacer::timestamp();
        let mut frames = ResidentSet::new(1);

        let accesses = run(&mut replacer, &mut frames, &["A", "A", "B", "A"]);
        assert_eq!(
            accesses,
            vec![fault(0, None), hit(0), fault(0, Some("A")), fault(0, Some("B"))]
        );
    }

    #[test]
    fn test_periodic_reset_clears_all_recency() {
        let mut replacer = LruReplacer::periodic(3);
        let mut frames = ResidentSet::new(3);

        run(&mut replacer, &mut frames, &["A", "B", "C"]);

        assert_eq!(replacer.tick(), 0);
        assert!(frames.slots().iter().all(|s| *s.state() == 0));
        assert_eq!(frames.occupied_count(), 3);
    }

    #[test]
    fn test_periodic_ties_break_by_index() {
        let mut replacer = LruReplacer::periodic(3);
        let mut frames = ResidentSet::new(3);

        // After the reset A, B and C all sit at tick 0. C is referenced at
        // tick 0 too, so D still evicts the lowest index: A.
        let accesses = run(&mut replacer, &mut frames, &["A", "B", "C", "C", "D"]);
        assert_eq!(accesses[3], hit(2));
        assert_eq!(accesses[4], fault(0, Some("A")));
    }

    #[test]
    fn test_timestamp_and_periodic_diverge() {
        let tokens = ["A", "B", "A", "C"];

        let mut ts = LruReplacer::timestamp();
        let mut ts_frames = ResidentSet::new(2);
        let ts_accesses = run(&mut ts, &mut ts_frames, &tokens);

        // Period 2: the reset after "B" forgets that B is older than A.
        let mut periodic = LruReplacer::periodic(2);
        let mut p_frames = ResidentSet::new(2);
        let p_accesses = run(&mut periodic, &mut p_frames, &tokens);

        assert_eq!(ts_accesses[3], fault(1, Some("B")));
        assert_eq!(p_accesses[3], fault(0, Some("A")));
    }
}
