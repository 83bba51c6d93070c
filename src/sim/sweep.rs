//! Sweep planning and execution.
//!
//! A sweep is a list of independent [`RunConfig`]s over the same trace.
//! Every configuration gets its own cursor and its own cold resident set, so
//! runs share nothing and can be spread across worker threads.

use std::thread;

use parking_lot::Mutex;

use crate::common::{
    Lookahead, LruMode, PolicyKind, Result, RunConfig, RunCounters, SWEEP_FRAME_COUNTS,
    SWEEP_PERIODS,
};
use crate::sim::driver;
use crate::trace::TraceCursor;

/// An ordered list of configurations to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepPlan {
    configs: Vec<RunConfig>,
}

impl SweepPlan {
    /// Build the plan the command line asks for.
    ///
    /// - `frame_count > 0`: timestamp LRU, counter LRU (only if
    ///   `period > 0`), second chance and optimal, each with that many
    ///   frames.
    /// - `frame_count <= 0`: every policy over [`SWEEP_FRAME_COUNTS`], with
    ///   counter LRU also run for every entry of [`SWEEP_PERIODS`]; `period`
    ///   is ignored.
    ///
    /// # Errors
    /// Returns `Error::InvalidHorizon` if `horizon` is 0.
    pub fn from_args(
        frame_count: i64,
        period: i64,
        horizon: usize,
        lookahead: Lookahead,
    ) -> Result<Self> {
        let optimal = PolicyKind::Optimal { horizon, lookahead };
        let mut configs = Vec::new();

        if frame_count > 0 {
            let frames = frame_count as usize;
            configs.push(RunConfig::new(frames, PolicyKind::Lru(LruMode::Timestamp))?);
            if period > 0 {
                let mode = LruMode::Periodic {
                    period: period as u64,
                };
                configs.push(RunConfig::new(frames, PolicyKind::Lru(mode))?);
            }
            configs.push(RunConfig::new(frames, PolicyKind::SecondChance)?);
            configs.push(RunConfig::new(frames, optimal)?);
        } else {
            for frames in SWEEP_FRAME_COUNTS {
                configs.push(RunConfig::new(frames, PolicyKind::Lru(LruMode::Timestamp))?);
            }
            for frames in SWEEP_FRAME_COUNTS {
                for period in SWEEP_PERIODS {
                    let mode = LruMode::Periodic { period };
                    configs.push(RunConfig::new(frames, PolicyKind::Lru(mode))?);
                }
            }
            for frames in SWEEP_FRAME_COUNTS {
                configs.push(RunConfig::new(frames, PolicyKind::SecondChance)?);
            }
            for frames in SWEEP_FRAME_COUNTS {
                configs.push(RunConfig::new(frames, optimal)?);
            }
        }

        Ok(Self { configs })
    }

    /// The configurations, in run and report order.
    pub fn configs(&self) -> &[RunConfig] {
        &self.configs
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl FromIterator<RunConfig> for SweepPlan {
    fn from_iter<I: IntoIterator<Item = RunConfig>>(iter: I) -> Self {
        Self {
            configs: iter.into_iter().collect(),
        }
    }
}

/// Result of one configuration in a sweep.
#[derive(Debug)]
pub struct SweepResult {
    pub config: RunConfig,
    pub outcome: Result<RunCounters>,
}

/// Run every configuration in `plan`.
///
/// `open` is called once per configuration to produce a fresh cursor, so a
/// failing trace only takes down the configuration that hit it. Up to `jobs`
/// configurations run at once; `jobs <= 1` runs them in order on the calling
/// thread. Results come back in plan order either way.
pub fn execute<F, C>(plan: &SweepPlan, jobs: usize, open: F) -> Vec<SweepResult>
where
    F: Fn() -> Result<C> + Sync,
    C: TraceCursor,
{
    let run_one = |config: &RunConfig| -> SweepResult {
        let outcome = open()
            .and_then(|mut cursor| driver::run(config, &mut cursor))
            .map(|report| report.counters);

        if let Err(e) = &outcome {
            log::warn!("run failed: {}: {}", config, e);
        }

        SweepResult {
            config: *config,
            outcome,
        }
    };

    let workers = jobs.min(plan.len());
    if workers <= 1 {
        return plan.configs().iter().map(&run_one).collect();
    }

    let next = Mutex::new(0usize);
    let slots: Mutex<Vec<Option<SweepResult>>> =
        Mutex::new((0..plan.len()).map(|_| None).collect());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let idx = {
                    let mut next = next.lock();
                    if *next >= plan.len() {
                        break;
                    }
                    *next += 1;
                    *next - 1
                };

                let result = run_one(&plan.configs()[idx]);
                slots.lock()[idx] = Some(result);
            });
        }
    });

    slots.into_inner().into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, ReferenceId, DEFAULT_HORIZON};
    use crate::trace::Trace;

    fn trace(tokens: &[&str]) -> Trace {
        tokens.iter().copied().map(ReferenceId::from).collect()
    }

    #[test]
    fn test_plan_single_frame_count_with_period() {
        let plan = SweepPlan::from_args(4, 10, DEFAULT_HORIZON, Lookahead::Exact).unwrap();
        let policies: Vec<&str> = plan.configs().iter().map(|c| c.policy.name()).collect();

        assert_eq!(
            policies,
            vec!["LRU - Timestamp", "LRU - Counter", "Second Chance", "Optimal"]
        );
        assert!(plan.configs().iter().all(|c| c.frame_count == 4));
        assert_eq!(
            plan.configs()[1].policy,
            PolicyKind::Lru(LruMode::Periodic { period: 10 })
        );
    }

    #[test]
    fn test_plan_without_period_skips_counter_lru() {
        for period in [0, -1] {
            let plan = SweepPlan::from_args(4, period, DEFAULT_HORIZON, Lookahead::Exact).unwrap();
            assert_eq!(plan.len(), 3);
            assert!(plan
                .configs()
                .iter()
                .all(|c| !matches!(c.policy, PolicyKind::Lru(LruMode::Periodic { .. }))));
        }
    }

    #[test]
    fn test_plan_preset_sweep() {
        let plan = SweepPlan::from_args(0, 123, DEFAULT_HORIZON, Lookahead::Exact).unwrap();

        let frames = SWEEP_FRAME_COUNTS.len();
        assert_eq!(plan.len(), frames * 3 + frames * SWEEP_PERIODS.len());

        let periods: Vec<u64> = plan
            .configs()
            .iter()
            .filter_map(|c| match c.policy {
                PolicyKind::Lru(LruMode::Periodic { period }) => Some(period),
                _ => None,
            })
            .collect();
        assert_eq!(&periods[..SWEEP_PERIODS.len()], &SWEEP_PERIODS);
        assert!(!periods.contains(&123));
    }

    #[test]
    fn test_plan_rejects_zero_horizon() {
        let err = SweepPlan::from_args(4, 0, 0, Lookahead::Exact).unwrap_err();
        assert!(matches!(err, Error::InvalidHorizon));
    }

    #[test]
    fn test_execute_sequential_and_parallel_agree() {
        let t = trace(&["A", "B", "C", "A", "D", "B", "A", "E", "C", "A", "B", "D"]);
        let plan = SweepPlan::from_args(0, 0, DEFAULT_HORIZON, Lookahead::Exact).unwrap();

        let sequential = execute(&plan, 1, || Ok(t.cursor()));
        let parallel = execute(&plan, 4, || Ok(t.cursor()));

        assert_eq!(sequential.len(), plan.len());
        assert_eq!(parallel.len(), plan.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.config, p.config);
            assert_eq!(s.outcome.as_ref().unwrap(), p.outcome.as_ref().unwrap());
        }
    }

    #[test]
    fn test_execute_failure_is_isolated() {
        let t = trace(&["A", "B", "A"]);
        let plan: SweepPlan = [
            RunConfig::new(1, PolicyKind::SecondChance).unwrap(),
            RunConfig::new(2, PolicyKind::SecondChance).unwrap(),
        ]
        .into_iter()
        .collect();

        let calls = Mutex::new(0);
        let results = execute(&plan, 1, || {
            let mut calls = calls.lock();
            *calls += 1;
            if *calls == 1 {
                Err(Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom")))
            } else {
                Ok(t.cursor())
            }
        });

        assert!(results[0].outcome.is_err());
        assert_eq!(results[1].outcome.as_ref().unwrap().faults, 2);
    }
}
