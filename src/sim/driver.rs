//! Run driver - replays one trace through one policy.

use std::fmt;

use crate::buffer::replacer::{ClockReplacer, LruReplacer, OptimalReplacer};
use crate::buffer::{Replacer, ResidentSet};
use crate::common::{PolicyKind, Result, RunConfig, RunCounters};
use crate::trace::TraceCursor;

/// Outcome of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub config: RunConfig,
    pub counters: RunCounters,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.config, self.counters)
    }
}

/// Replay every remaining reference in `cursor` through `replacer`.
///
/// The resident set starts cold with `frame_count` empty slots and is
/// dropped when the trace runs out.
///
/// # Errors
/// Any trace error ends the run; no partial counters are returned.
///
/// # Panics
/// Panics if `frame_count` is 0.
pub fn replay<P, C>(replacer: &mut P, cursor: &mut C, frame_count: usize) -> Result<RunCounters>
where
    P: Replacer,
    C: TraceCursor + ?Sized,
{
    let mut frames: ResidentSet<P::State> = ResidentSet::new(frame_count);
    let mut counters = RunCounters::new();

    while let Some(reference) = cursor.next_reference()? {
        let access = replacer.classify(reference, &mut frames, cursor)?;
        counters.record_access(access.is_fault(), access.evicted().is_some());
        replacer.advance(&mut frames);
    }

    Ok(counters)
}

/// Run one configuration to the end of `cursor`.
///
/// # Errors
/// - Configuration errors from [`RunConfig::validate`]
/// - Trace errors raised while reading or looking ahead
pub fn run<C>(config: &RunConfig, cursor: &mut C) -> Result<RunReport>
where
    C: TraceCursor + ?Sized,
{
    config.validate()?;
    log::debug!("starting run: {}", config);

    let counters = match config.policy {
        PolicyKind::Lru(mode) => replay(&mut LruReplacer::new(mode), cursor, config.frame_count)?,
        PolicyKind::SecondChance => {
            replay(&mut ClockReplacer::new(), cursor, config.frame_count)?
        }
        PolicyKind::Optimal { horizon, lookahead } => replay(
            &mut OptimalReplacer::new(horizon, lookahead),
            cursor,
            config.frame_count,
        )?,
    };

    log::debug!(
        "finished run: {} -> faults={} accesses={} evictions={}",
        config,
        counters.faults,
        counters.accesses,
        counters.evictions
    );

    Ok(RunReport {
        config: *config,
        counters,
    })
}
