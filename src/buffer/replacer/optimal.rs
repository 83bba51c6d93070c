//! Optimal (Belady MIN) replacement policy.
//!
//! Each slot keeps a [`Countdown`]: how many references remain until its page
//! is needed again, as far as the lookahead horizon can tell. Every reference
//! runs one full pass over the table. The pass classifies the reference and
//! ticks every countdown, so it cannot stop early on a hit or an empty slot.
//! On a fault with no empty slot, the page needed furthest in the future is
//! replaced.
//!
//! # Lookahead modes
//! - [`Lookahead::Exact`]: "not seen within the horizon" stays distinct from
//!   "needed next". A hit re-reads the page's next use, and a slot filled
//!   this reference is not ticked until the next one. With a horizon that
//!   covers the rest of the trace this is exact MIN.
//! - [`Lookahead::Collapsed`]: both cases read as 0, and 0 is the strongest
//!   eviction target. A trace that ends inside the horizon instead reads as
//!   the number of references left. Hits leave the countdown alone, and a
//!   slot filled during the pass is ticked in that same pass.

use crate::buffer::replacer::{Access, Replacer};
use crate::buffer::ResidentSet;
use crate::common::{FrameId, Lookahead, ReferenceId, Result, DEFAULT_HORIZON};
use crate::trace::{Occurrence, TraceCursor};

/// References remaining until a resident page is needed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Countdown {
    /// Not referenced again within the horizon.
    #[default]
    Beyond,

    /// Referenced again after this many other references.
    Within(usize),
}

impl Countdown {
    /// One reference has gone by.
    #[inline]
    fn elapse(&mut self) {
        if let Countdown::Within(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// Countdown with `Beyond` folded into 0.
    #[inline]
    fn collapsed(self) -> usize {
        match self {
            Countdown::Within(n) => n,
            Countdown::Beyond => 0,
        }
    }
}

/// Optimal policy configuration.
#[derive(Debug, Clone)]
pub struct OptimalReplacer {
    /// Maximum references a lookahead may examine.
    horizon: usize,
    lookahead: Lookahead,
}

impl OptimalReplacer {
    /// Create an Optimal replacer.
    ///
    /// # Panics
    /// Panics if `horizon` is 0.
    pub fn new(horizon: usize, lookahead: Lookahead) -> Self {
        assert!(horizon > 0, "horizon must be > 0");
        Self { horizon, lookahead }
    }

    /// The lookahead horizon.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Countdown for `reference`, read from the cursor's current position.
    fn countdown<C>(&self, reference: &ReferenceId, cursor: &mut C) -> Result<Countdown>
    where
        C: TraceCursor + ?Sized,
    {
        let occurrence = cursor.next_occurrence(reference, self.horizon)?;
        let countdown = match (occurrence, self.lookahead) {
            (Occurrence::At(distance), _) => Countdown::Within(distance),
            (_, Lookahead::Exact) => Countdown::Beyond,
            // The rest of the trace is shorter than the horizon: its length
            // stands in for the distance.
            (Occurrence::EndOfTrace(remaining), Lookahead::Collapsed) => {
                Countdown::Within(remaining)
            }
            (Occurrence::BeyondHorizon, Lookahead::Collapsed) => Countdown::Within(0),
        };
        Ok(countdown)
    }

    /// Whether `countdown` should replace the current eviction candidate.
    fn prefers(&self, countdown: Countdown, best: Option<Countdown>) -> bool {
        let Some(best) = best else {
            return true;
        };

        match self.lookahead {
            Lookahead::Exact => match (countdown, best) {
                (Countdown::Beyond, Countdown::Within(_)) => true,
                (Countdown::Within(n), Countdown::Within(b)) => n > b,
                _ => false,
            },
            Lookahead::Collapsed => {
                let (n, b) = (countdown.collapsed(), best.collapsed());
                // Once a zero is found nothing displaces it.
                b != 0 && (n > b || n == 0)
            }
        }
    }
}

impl Default for OptimalReplacer {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON, Lookahead::Exact)
    }
}

impl Replacer for OptimalReplacer {
    type State = Countdown;

    fn classify<C>(
        &mut self,
        reference: ReferenceId,
        frames: &mut ResidentSet<Countdown>,
        cursor: &mut C,
    ) -> Result<Access>
    where
        C: TraceCursor + ?Sized,
    {
        let exact = self.lookahead == Lookahead::Exact;
        let mut access: Option<Access> = None;
        let mut candidate: Option<(FrameId, Countdown)> = None;

        for (idx, slot) in frames.slots_mut().iter_mut().enumerate() {
            let frame = FrameId::new(idx);
            let mut refreshed = false;

            if access.is_none() {
                match slot.occupant() {
                    Some(occupant) if occupant == reference => {
                        if exact {
                            slot.set_state(self.countdown(&reference, cursor)?);
                            refreshed = true;
                        }
                        access = Some(Access::Hit { frame });
                    }
                    None => {
                        slot.load(reference, self.countdown(&reference, cursor)?);
                        refreshed = exact;
                        access = Some(Access::Fault {
                            frame,
                            evicted: None,
                        });
                    }
                    Some(_) => {
                        let countdown = *slot.state();
                        if self.prefers(countdown, candidate.map(|(_, c)| c)) {
                            candidate = Some((frame, countdown));
                        }
                    }
                }
            }

            if !refreshed {
                slot.state_mut().elapse();
            }
        }

        if let Some(access) = access {
            return Ok(access);
        }

        let frame = candidate.map_or(FrameId::new(0), |(frame, _)| frame);
        let countdown = self.countdown(&reference, cursor)?;
        let evicted = frames.slot_mut(frame).load(reference, countdown);
        log::trace!(
            "optimal: {:?} replaces {:?} in {} ({:?})",
            reference,
            evicted,
            frame,
            countdown
        );

        Ok(Access::Fault { frame, evicted })
    }
}
