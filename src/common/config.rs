//! Run configuration for pagereplay.
//!
//! A [`RunConfig`] pins down everything one run needs apart from the trace:
//! how many frames the resident set has and which policy (with its
//! parameters) decides evictions.

use std::fmt;

use pagereplay_core::config::DEFAULT_HORIZON;
use pagereplay_core::{Error, Result};

/// Tick source for the LRU policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LruMode {
    /// The tick grows for the whole run.
    Timestamp,

    /// The tick, and every slot's recency, drops back to 0 after `period`
    /// references.
    Periodic { period: u64 },
}

/// How the Optimal policy treats a reference with no reuse in sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookahead {
    /// Keep "not within the horizon" distinct from "due next".
    #[default]
    Exact,

    /// Fold "not within the horizon" into a countdown of 0, and an early end
    /// of trace into the number of references left. A 0 pins victim
    /// selection to the first slot holding it.
    Collapsed,
}

/// Replacement policy plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Lru(LruMode),
    SecondChance,
    Optimal { horizon: usize, lookahead: Lookahead },
}

impl PolicyKind {
    /// Optimal with the default horizon and exact lookahead.
    pub fn optimal() -> Self {
        PolicyKind::Optimal {
            horizon: DEFAULT_HORIZON,
            lookahead: Lookahead::Exact,
        }
    }

    /// Section heading used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Lru(LruMode::Timestamp) => "LRU - Timestamp",
            PolicyKind::Lru(LruMode::Periodic { .. }) => "LRU - Counter",
            PolicyKind::SecondChance => "Second Chance",
            PolicyKind::Optimal { .. } => "Optimal",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Lru(LruMode::Periodic { period }) => {
                write!(f, "{} (period {})", self.name(), period)
            }
            PolicyKind::Optimal { horizon, lookahead } => {
                write!(f, "{} (horizon {}, {:?})", self.name(), horizon, lookahead)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Parameters for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of slots in the resident set.
    pub frame_count: usize,

    /// Policy deciding hits, fills and evictions.
    pub policy: PolicyKind,
}

impl RunConfig {
    /// Create a config, rejecting parameters no run could use.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `frame_count` is 0
    /// - `Error::InvalidPeriod` for a periodic LRU with period 0
    /// - `Error::InvalidHorizon` for an Optimal policy with horizon 0
    pub fn new(frame_count: usize, policy: PolicyKind) -> Result<Self> {
        let config = Self {
            frame_count,
            policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the config without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(Error::InvalidFrameCount(self.frame_count));
        }

        match self.policy {
            PolicyKind::Lru(LruMode::Periodic { period: 0 }) => Err(Error::InvalidPeriod(0)),
            PolicyKind::Optimal { horizon: 0, .. } => Err(Error::InvalidHorizon),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {} frames", self.policy, self.frame_count)
    }
}
