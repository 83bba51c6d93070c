//! Human-readable sweep reports.

use std::fmt;

use crate::common::{LruMode, PolicyKind};
use crate::sim::sweep::SweepResult;

const RULE: &str = "-------------------------------------";

/// Formats sweep results grouped by policy.
///
/// Consecutive results with the same policy name share a section. When the
/// results span more than one frame count, a `With N frames:` line starts
/// each new frame count inside a section and counter-mode LRU results are
/// further labelled with their period:
///
/// ```text
/// LRU - Counter
/// -------------------------------------
///
/// With 8 frames:
///     With a period of 25:
///         There were a total of 12 faults in 40 total memory accesses.
/// -------------------------------------
/// ```
///
/// A single-frame-count run prints each result directly under its section
/// rule.
pub struct SweepReport<'a> {
    results: &'a [SweepResult],
    /// Whether results carry frame and period headings.
    labelled: bool,
}

impl<'a> SweepReport<'a> {
    pub fn new(results: &'a [SweepResult]) -> Self {
        let labelled = results
            .windows(2)
            .any(|pair| pair[0].config.frame_count != pair[1].config.frame_count);
        Self { results, labelled }
    }

    /// Number of configurations that did not complete.
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }
}

impl fmt::Display for SweepReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section: Option<&str> = None;
        let mut frames: Option<usize> = None;

        for result in self.results {
            let name = result.config.policy.name();
            if section != Some(name) {
                if section.is_some() {
                    writeln!(f, "{}", RULE)?;
                }
                writeln!(f)?;
                writeln!(f, "{}", name)?;
                writeln!(f, "{}", RULE)?;
                section = Some(name);
                frames = None;
            }

            if self.labelled && frames != Some(result.config.frame_count) {
                writeln!(f)?;
                writeln!(f, "With {} frames:", result.config.frame_count)?;
                frames = Some(result.config.frame_count);
            }

            let indent = match result.config.policy {
                PolicyKind::Lru(LruMode::Periodic { period }) if self.labelled => {
                    writeln!(f, "\tWith a period of {}:", period)?;
                    "\t\t"
                }
                _ => "\t",
            };

            match &result.outcome {
                Ok(counters) => writeln!(f, "{}{}", indent, counters)?,
                Err(e) => writeln!(f, "{}ERROR: {}", indent, e)?,
            }
        }

        if section.is_some() {
            writeln!(f, "{}", RULE)?;
        }
        Ok(())
    }
}
