//! Configuration constants for pagereplay.

/// Number of significant bytes in a trace line.
///
/// Everything past this width (and the line terminator) is discarded, so
/// `"12345678"` and `"12345"` name the same page.
pub const REFERENCE_WIDTH: usize = 5;

/// Default number of future references the Optimal policy may examine
/// when computing a countdown.
pub const DEFAULT_HORIZON: usize = 500;

/// Frame counts used when no positive frame count is requested.
pub const SWEEP_FRAME_COUNTS: [usize; 4] = [8, 16, 32, 64];

/// Periods used for counter-mode LRU during a preset sweep.
///
/// Doubles from 25 up to and including 1600.
pub const SWEEP_PERIODS: [u64; 7] = [25, 50, 100, 200, 400, 800, 1600];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_frame_counts_double() {
        for pair in SWEEP_FRAME_COUNTS.windows(2) {
            assert_eq!(pair[1], pair[0] * 2);
        }
        assert_eq!(SWEEP_FRAME_COUNTS[0], 8);
        assert_eq!(SWEEP_FRAME_COUNTS[3], 64);
    }

    #[test]
    fn test_sweep_periods_double() {
        for pair in SWEEP_PERIODS.windows(2) {
            assert_eq!(pair[1], pair[0] * 2);
        }
        assert_eq!(SWEEP_PERIODS.first(), Some(&25));
        assert_eq!(SWEEP_PERIODS.last(), Some(&1600));
    }
}
