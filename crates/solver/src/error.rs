//! Error types for the absorb-solver crate.

use std::path::PathBuf;
use std::time::Duration;

/// Error type for all fallible operations in the absorb-solver crate.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Returned when a solver configuration is invalid.
    #[error("invalid solver configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the solver process cannot be started.
    #[error("unable to start solver `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when waiting on, or killing, the solver process fails.
    #[error("error while waiting for solver: {source}")]
    Wait {
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when the solver exits unsuccessfully.
    #[error("solver failed ({status}), with the following error stream:\n{stderr}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured standard error, verbatim.
        stderr: String,
    },

    /// Returned when the solver runs past its deadline.
    #[error("solver timed out after {after:?}")]
    Timeout {
        /// Configured timeout.
        after: Duration,
    },

    /// Returned when the caller cancels the solve.
    #[error("solver run cancelled")]
    Cancelled,

    /// Returned when the solver reports success but leaves no output file.
    #[error("solver produced no output at {}", path.display())]
    MissingOutput {
        /// Expected output path.
        path: PathBuf,
    },
}
