//! Error types for pagereplay.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagereplay.
///
/// Configuration errors (`InvalidFrameCount`, `InvalidPeriod`,
/// `InvalidHorizon`) are reported before any run starts. Trace errors
/// (`TraceOpen`, `Io`, `Reposition`) abort the run that hit them.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a trace.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The trace source could not be opened.
    #[error("could not open trace {}: {source}", path.display())]
    TraceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lookahead scan could not put the cursor back where it started.
    ///
    /// Any result computed after this point would be read from the wrong
    /// position, so the run is abandoned.
    #[error("could not restore trace position to offset {offset}: {source}")]
    Reposition {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// A resident set needs at least one frame.
    #[error("frame count must be greater than 0, got {0}")]
    InvalidFrameCount(usize),

    /// Counter-mode LRU needs a positive period.
    #[error("LRU period must be greater than 0, got {0}")]
    InvalidPeriod(u64),

    /// The Optimal policy needs to look at least one reference ahead.
    #[error("lookahead horizon must be greater than 0")]
    InvalidHorizon,
}

impl Error {
    /// Whether this error was caused by run parameters rather than the trace.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFrameCount(_) | Error::InvalidPeriod(_) | Error::InvalidHorizon
        )
    }
}
