//! Resident set management.
//!
//! The resident set is the fixed table of frames a run replays references
//! into. Which page leaves on a fault is up to the active replacer.
//!
//! # Components
//! - [`ResidentSet`] - The table of slots, with a single-pass probe
//! - [`Slot`] - One frame: an optional occupant plus policy state
//! - [`replacer`] - Eviction policy implementations

mod resident_set;
pub mod replacer;
mod slot;

pub use replacer::{Access, Replacer};
pub use resident_set::{Probe, ResidentSet};
pub use slot::Slot;
