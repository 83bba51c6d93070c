//! Slot - one frame of the resident set.
//!
//! A [`Slot`] holds at most one page reference plus whatever bookkeeping the
//! active policy keeps for it:
//! - Which page is resident (if any)
//! - Policy state (last-used tick, reference bit, or countdown)

use crate::common::ReferenceId;

/// A frame in the resident set.
///
/// An empty slot has `occupant == None`; there is no magic token for
/// "empty", so every trace token can be resident.
///
/// `S` is the policy's per-slot state. Its value in an empty slot carries no
/// meaning and is overwritten when the slot is filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot<S> {
    /// Which page is resident, or None if the slot is empty.
    occupant: Option<ReferenceId>,

    /// Policy bookkeeping for the occupant.
    state: S,
}

impl<S> Slot<S> {
    /// Create a new empty slot.
    pub fn new(state: S) -> Self {
        Self {
            occupant: None,
            state,
        }
    }

    // ========================================================================
    // Occupant
    // ========================================================================

    /// The resident page, if any.
    #[inline]
    pub fn occupant(&self) -> Option<ReferenceId> {
        self.occupant
    }

    /// Check if no page is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Check if `reference` is the resident page.
    #[inline]
    pub fn holds(&self, reference: &ReferenceId) -> bool {
        self.occupant.as_ref() == Some(reference)
    }

    /// Make `reference` resident with fresh state.
    ///
    /// Returns the page that was displaced, if the slot was occupied.
    pub fn load(&mut self, reference: ReferenceId, state: S) -> Option<ReferenceId> {
        self.state = state;
        self.occupant.replace(reference)
    }

    // ========================================================================
    // Policy state
    // ========================================================================

    /// The policy state for this slot.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable access to the policy state.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Overwrite the policy state, keeping the occupant.
    #[inline]
    pub fn set_state(&mut self, state: S) {
        self.state = state;
    }
}
