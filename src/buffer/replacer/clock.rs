//! CLOCK (second chance) replacement policy.
//!
//! Every slot carries a reference bit. Loading or hitting a page sets its bit.
//! On a fault with no empty slot the sweep starts at slot 0:
//! - The first slot whose bit is clear is the victim, and every slot the
//!   sweep passed before it loses its bit.
//! - If every bit is set, all bits are cleared and slot 0 is the victim.
//!
//! There is no persistent hand: each fault sweeps from index 0 again.

use crate::buffer::replacer::{Access, Replacer};
use crate::buffer::{Probe, ResidentSet};
use crate::common::{FrameId, ReferenceId, Result};
use crate::trace::TraceCursor;

/// Second-chance policy. Stateless apart from the per-slot bits.
#[derive(Debug, Clone, Default)]
pub struct ClockReplacer;

impl ClockReplacer {
    /// Create a new second-chance replacer.
    pub fn new() -> Self {
        Self
    }
}

impl Replacer for ClockReplacer {
    /// Reference bit: `true` once used since the sweep last passed.
    type State = bool;

    fn classify<C>(
        &mut self,
        reference: ReferenceId,
        frames: &mut ResidentSet<bool>,
        _cursor: &mut C,
    ) -> Result<Access>
    where
        C: TraceCursor + ?Sized,
    {
        // First clear bit wins; later ones never replace it.
        let probe = frames.probe(&reference, |referenced, best| best.is_none() && !*referenced);

        let access = match probe {
            Probe::Resident(frame) => {
                frames.slot_mut(frame).set_state(true);
                Access::Hit { frame }
            }
            Probe::Vacant(frame) => {
                frames.slot_mut(frame).load(reference, true);
                Access::Fault {
                    frame,
                    evicted: None,
                }
            }
            Probe::Full { candidate } => {
                let (frame, swept) = match candidate {
                    Some(frame) => (frame, frame.0),
                    None => (FrameId::new(0), frames.frame_count()),
                };

                for slot in &mut frames.slots_mut()[..swept] {
                    slot.set_state(false);
                }

                let evicted = frames.slot_mut(frame).load(reference, true);
                log::trace!(
                    "clock: {:?} replaces {:?} in {} after sweeping {} slots",
                    reference,
                    evicted,
                    frame,
                    swept
                );
                Access::Fault { frame, evicted }
            }
        };

        Ok(access)
    }
}
