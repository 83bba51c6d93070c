//! Eviction policy implementations (replacers).
//!
//! Every policy implements [`Replacer`], so the run driver treats them the
//! same way:
//! - [`LruReplacer`] - Least Recently Used, timestamp or periodic ticks
//! - [`ClockReplacer`] - Second chance with a reference bit per slot
//! - [`OptimalReplacer`] - Belady's MIN using bounded trace lookahead

mod clock;
mod lru;
mod optimal;

pub use clock::ClockReplacer;
pub use lru::LruReplacer;
pub use optimal::{Countdown, OptimalReplacer};

use std::fmt;

use crate::buffer::ResidentSet;
use crate::common::{FrameId, ReferenceId, Result};
use crate::trace::TraceCursor;

/// What happened to one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The page was already resident in `frame`.
    Hit { frame: FrameId },

    /// The page was loaded into `frame`, displacing `evicted` if the frame
    /// was occupied.
    Fault {
        frame: FrameId,
        evicted: Option<ReferenceId>,
    },
}

impl Access {
    /// Check if the reference missed.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Fault { .. })
    }

    /// The page pushed out by this reference, if any.
    #[inline]
    pub fn evicted(&self) -> Option<ReferenceId> {
        match self {
            Access::Fault { evicted, .. } => *evicted,
            Access::Hit { .. } => None,
        }
    }

    /// The frame that now holds the referenced page.
    #[inline]
    pub fn frame(&self) -> FrameId {
        match self {
            Access::Hit { frame } | Access::Fault { frame, .. } => *frame,
        }
    }
}

/// A page replacement policy.
///
/// The run driver calls [`classify`](Replacer::classify) once per reference
/// and then [`advance`](Replacer::advance), so per-reference bookkeeping
/// (tick increments, periodic resets) lives in `advance`.
pub trait Replacer {
    /// Per-slot bookkeeping kept in the resident set.
    type State: Clone + Default + fmt::Debug;

    /// Decide hit or fault for `reference` and update `frames` accordingly.
    ///
    /// `cursor` is positioned just past `reference`; only policies that need
    /// to see the future read from it.
    ///
    /// # Errors
    /// Propagates trace errors raised while looking ahead.
    fn classify<C>(
        &mut self,
        reference: ReferenceId,
        frames: &mut ResidentSet<Self::State>,
        cursor: &mut C,
    ) -> Result<Access>
    where
        C: TraceCursor + ?Sized;

    /// Called after every reference has been classified.
    fn advance(&mut self, _frames: &mut ResidentSet<Self::State>) {}
}
