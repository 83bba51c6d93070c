//! Simulation layer - runs, sweeps and reports.
//!
//! - [`run`] / [`replay`] - Drive one configuration to the end of a trace
//! - [`SweepPlan`] / [`execute`] - Many independent configurations, optionally in parallel
//! - [`SweepReport`] - Grouped, human-readable output

mod driver;
mod report;
mod sweep;

pub use driver::{replay, run, RunReport};
pub use report::SweepReport;
pub use sweep::{execute, SweepPlan, SweepResult};
