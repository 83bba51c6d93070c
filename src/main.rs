//! pagereplay CLI.
//!
//! Replays a trace file against every policy and prints fault counts.
//!
//! # Usage
//! ```text
//! pagereplay <TRACE> <FRAMES> <PERIOD> [--horizon N] [--collapse-zero] [--stream] [--jobs N]
//! ```
//!
//! A non-positive `FRAMES` runs the preset sweep over 8, 16, 32 and 64
//! frames (and every preset period for counter-mode LRU). A positive
//! `PERIOD` adds a counter-mode LRU run for the given frame count.
//!
//! Exit status is 2 for invalid run parameters and 1 for trace failures.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use pagereplay::common::{Error, Lookahead, DEFAULT_HORIZON};
use pagereplay::sim::{self, SweepPlan, SweepReport};
use pagereplay::trace::{ReaderCursor, Trace};

/// Command-line arguments for the trace replayer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Page replacement trace simulator")]
struct Args {
    /// Trace file, one reference per line
    trace: PathBuf,

    /// Number of frames; 0 or less runs the preset sweep
    #[arg(allow_hyphen_values = true)]
    frames: i64,

    /// Counter-mode LRU period; 0 or less disables it
    #[arg(allow_hyphen_values = true)]
    period: i64,

    /// References the optimal policy may look ahead
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: usize,

    /// Treat "not seen within the horizon" as a countdown of 0 when picking
    /// optimal victims
    #[arg(long)]
    collapse_zero: bool,

    /// Stream the file for every run instead of loading it once
    #[arg(long)]
    stream: bool,

    /// Worker threads for the sweep
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
}

fn main() {
    let args = Args::parse();

    match execute(&args) {
        Ok(0) => {}
        Ok(failures) => {
            eprintln!("\nERROR: {} configuration(s) failed", failures);
            process::exit(1);
        }
        Err(e) if is_config_error(&e) => {
            eprintln!("\nERROR: invalid run parameters: {:#}\n", e);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("\nERROR: {:#}\n", e);
            process::exit(1);
        }
    }
}

/// Run the requested sweep, returning how many configurations failed.
fn execute(args: &Args) -> Result<usize> {
    let lookahead = if args.collapse_zero {
        Lookahead::Collapsed
    } else {
        Lookahead::Exact
    };

    let plan = SweepPlan::from_args(args.frames, args.period, args.horizon, lookahead)?;

    let results = if args.stream {
        // Fail fast on an unreadable path before fanning out.
        ReaderCursor::open(&args.trace)?;
        sim::execute(&plan, args.jobs, || ReaderCursor::open(&args.trace))
    } else {
        let trace = Trace::load(&args.trace).context("trace load failed")?;
        sim::execute(&plan, args.jobs, || Ok(trace.cursor()))
    };

    let report = SweepReport::new(&results);
    print!("{}", report);

    Ok(report.failures())
}

fn is_config_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<Error>().is_some_and(Error::is_config_error)
}
