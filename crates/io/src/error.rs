//! Error types for absorb-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the absorb-io crate.
///
/// Every variant that touches the filesystem carries the path involved and,
/// for writes, the phase of the file layout being produced.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a file cannot be created.
    #[error("unable to create {}: {source}", path.display())]
    Create {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a file cannot be opened for reading.
    #[error("unable to open {}: {source}", path.display())]
    Open {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when writing a section of the binary system file fails.
    #[error("error while writing {phase} to {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Section being written (e.g. `"matrix header"`).
        phase: &'static str,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a finished file cannot be moved into place.
    #[error("unable to persist {}: {source}", path.display())]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when reading from a file fails.
    #[error("error while reading {}: {source}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Returned when a streamed solver block is not newline-delimited.
    #[error("invalid solver output in {}, block ends with ...'{excerpt}'", path.display())]
    MalformedBlock {
        /// Path being read.
        path: PathBuf,
        /// Trailing excerpt of the offending block.
        excerpt: String,
    },

    /// Returned when a converted block cannot be parsed as a numeric array.
    #[error("error while decoding {}: {reason}", path.display())]
    Decode {
        /// Path being read.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when a count does not fit the 32-bit fields of the format.
    #[error("{what} ({value}) exceeds the 32-bit limit of the system file format")]
    Overflow {
        /// Which quantity overflowed.
        what: &'static str,
        /// The offending value.
        value: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err(msg: &str) -> std::io::Error {
        std::io::Error::other(msg.to_string())
    }

    #[test]
    fn display_create() {
        let err = IoError::Create {
            path: PathBuf::from("/tmp/Ab.petsc"),
            source: io_err("denied"),
        };
        assert_eq!(err.to_string(), "unable to create /tmp/Ab.petsc: denied");
    }

    #[test]
    fn display_open() {
        let err = IoError::Open {
            path: PathBuf::from("/tmp/sol.matlab"),
            source: io_err("missing"),
        };
        assert_eq!(err.to_string(), "unable to open /tmp/sol.matlab: missing");
    }

    #[test]
    fn display_write() {
        let err = IoError::Write {
            path: PathBuf::from("/tmp/Ab.petsc"),
            phase: "matrix header",
            source: io_err("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "error while writing matrix header to /tmp/Ab.petsc: disk full"
        );
    }

    #[test]
    fn display_persist() {
        let err = IoError::Persist {
            path: PathBuf::from("/tmp/Ab.petsc"),
            source: io_err("cross-device link"),
        };
        assert_eq!(
            err.to_string(),
            "unable to persist /tmp/Ab.petsc: cross-device link"
        );
    }

    #[test]
    fn display_read() {
        let err = IoError::Read {
            path: PathBuf::from("/tmp/sol.matlab"),
            source: io_err("eof"),
        };
        assert_eq!(err.to_string(), "error while reading /tmp/sol.matlab: eof");
    }

    #[test]
    fn display_malformed_block() {
        let err = IoError::MalformedBlock {
            path: PathBuf::from("/tmp/sol.matlab"),
            excerpt: "1.0 2.0]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid solver output in /tmp/sol.matlab, block ends with ...'1.0 2.0]'"
        );
    }

    #[test]
    fn display_decode() {
        let err = IoError::Decode {
            path: PathBuf::from("/tmp/sol.matlab"),
            reason: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error while decoding /tmp/sol.matlab: expected value"
        );
    }

    #[test]
    fn display_overflow() {
        let err = IoError::Overflow {
            what: "nonzero count",
            value: 5_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "nonzero count (5000000000) exceeds the 32-bit limit of the system file format"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
