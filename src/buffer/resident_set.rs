//! Resident set - the fixed table of frames a run replays into.

use crate::buffer::Slot;
use crate::common::{FrameId, ReferenceId};

/// Result of a single left-to-right probe for a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The reference is resident in this frame.
    Resident(FrameId),

    /// The reference is absent and this is the first empty frame.
    Vacant(FrameId),

    /// The reference is absent and every frame is occupied.
    ///
    /// `candidate` is the frame the caller's preference settled on, or
    /// `None` if it never accepted one.
    Full { candidate: Option<FrameId> },
}

/// A fixed number of slots, indexed `0..frame_count`.
///
/// Index order is scan order. Every policy walks the slots from index 0, so
/// the lowest index wins any tie.
///
/// # Invariants
/// - The number of slots never changes after construction.
/// - A reference occupies at most one slot.
///
/// No policy logic lives here: policies drive the table through
/// [`probe`](ResidentSet::probe) and direct slot access.
#[derive(Debug, Clone)]
pub struct ResidentSet<S> {
    slots: Vec<Slot<S>>,
}

impl<S: Default> ResidentSet<S> {
    /// Create a resident set with every slot empty.
    ///
    /// # Panics
    /// Panics if `frame_count` is 0.
    pub fn new(frame_count: usize) -> Self {
        assert!(frame_count > 0, "frame_count must be > 0");

        Self {
            slots: (0..frame_count).map(|_| Slot::new(S::default())).collect(),
        }
    }
}

impl<S> ResidentSet<S> {
    /// Number of slots (fixed for the life of the set).
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a page.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// All slots, in scan order.
    #[inline]
    pub fn slots(&self) -> &[Slot<S>] {
        &self.slots
    }

    /// Mutable access to all slots, in scan order.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [Slot<S>] {
        &mut self.slots
    }

    /// A single slot.
    ///
    /// # Panics
    /// Panics if `frame_id` is out of range.
    #[inline]
    pub fn slot(&self, frame_id: FrameId) -> &Slot<S> {
        &self.slots[frame_id.0]
    }

    /// A single slot, mutably.
    ///
    /// # Panics
    /// Panics if `frame_id` is out of range.
    #[inline]
    pub fn slot_mut(&mut self, frame_id: FrameId) -> &mut Slot<S> {
        &mut self.slots[frame_id.0]
    }

    /// Resident pages in scan order (empty slots skipped).
    pub fn occupants(&self) -> impl Iterator<Item = ReferenceId> + '_ {
        self.slots.iter().filter_map(Slot::occupant)
    }

    /// The lowest-index empty slot.
    pub fn first_empty(&self) -> Option<FrameId> {
        self.slots.iter().position(Slot::is_empty).map(FrameId::new)
    }

    /// The slot holding `reference`.
    pub fn find(&self, reference: &ReferenceId) -> Option<FrameId> {
        self.slots
            .iter()
            .position(|s| s.holds(reference))
            .map(FrameId::new)
    }

    /// Look up `reference` and pick an eviction candidate in one pass.
    ///
    /// Slots are visited from index 0 and the scan stops at the first slot
    /// that either holds `reference` or is empty. Every occupied slot passed
    /// over before that is offered to `prefer(state, best)`, where `best` is
    /// the state of the current candidate (`None` until one is accepted);
    /// returning `true` makes that slot the new candidate.
    pub fn probe<F>(&self, reference: &ReferenceId, mut prefer: F) -> Probe
    where
        F: FnMut(&S, Option<&S>) -> bool,
    {
        let mut candidate: Option<usize> = None;

        for (idx, slot) in self.slots.iter().enumerate() {
            match slot.occupant() {
                Some(occupant) if occupant == *reference => {
                    return Probe::Resident(FrameId::new(idx));
                }
                None => return Probe::Vacant(FrameId::new(idx)),
                Some(_) => {
                    let best = candidate.map(|c| self.slots[c].state());
                    if prefer(slot.state(), best) {
                        candidate = Some(idx);
                    }
                }
            }
        }

        Probe::Full {
            candidate: candidate.map(FrameId::new),
        }
    }

    /// Overwrite every slot's state, occupied or not.
    pub fn reset_states(&mut self, state: S)
    where
        S: Clone,
    {
        for slot in &mut self.slots {
            slot.set_state(state.clone());
        }
    }
}
