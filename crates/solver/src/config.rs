//! Configuration for the command-backed solver.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SolverError;

/// Placeholder replaced by the absolute path of the system file.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder replaced by the absolute path of the solution file.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
/// Placeholder replaced by the number of right-hand sides (absorbing nodes).
pub const ABSORBING_PLACEHOLDER: &str = "{absorbing}";

/// Configuration for invoking the external solver as a child process.
///
/// Arguments are templates: [`INPUT_PLACEHOLDER`], [`OUTPUT_PLACEHOLDER`]
/// and [`ABSORBING_PLACEHOLDER`] are substituted per run.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use absorb_solver::CommandConfig;
///
/// let config = CommandConfig::new()
///     .with_working_dir("petsc-gmres")
///     .with_timeout(Some(Duration::from_secs(600)));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CommandConfig {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl CommandConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `make run IFPATH={input} OFPATH={output} IMAX={absorbing}`,
    /// no working directory, no timeout, 50 ms poll interval.
    pub fn new() -> Self {
        Self {
            program: "make".to_string(),
            args: vec![
                "run".to_string(),
                format!("IFPATH={INPUT_PLACEHOLDER}"),
                format!("OFPATH={OUTPUT_PLACEHOLDER}"),
                format!("IMAX={ABSORBING_PLACEHOLDER}"),
            ],
            working_dir: None,
            timeout: None,
            poll_interval: Duration::from_millis(50),
        }
    }

    /// Sets the program to run.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the argument templates.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the directory the solver runs in.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets the maximum run time, or `None` to wait indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how often the running process is checked for exit, cancellation
    /// and timeout.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    // --- Accessors ---

    /// Returns the program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the argument templates.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory, if any.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Returns the timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Validates this configuration.
    ///
    /// Checks that the program is non-empty, the poll interval is non-zero,
    /// and a timeout, when set, is non-zero.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.program.trim().is_empty() {
            return Err(SolverError::InvalidConfig {
                reason: "program must not be empty".to_string(),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(SolverError::InvalidConfig {
                reason: "poll_interval must be greater than 0".to_string(),
            });
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(SolverError::InvalidConfig {
                reason: "timeout must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Expands the argument templates for one run.
    pub fn expand_args(&self, input: &Path, output: &Path, absorbing: u64) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        let absorbing = absorbing.to_string();
        self.args
            .iter()
            .map(|a| {
                a.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
                    .replace(ABSORBING_PLACEHOLDER, &absorbing)
            })
            .collect()
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CommandConfig::new();
        assert_eq!(cfg.program(), "make");
        assert_eq!(
            cfg.args(),
            &["run", "IFPATH={input}", "OFPATH={output}", "IMAX={absorbing}"]
        );
        assert!(cfg.working_dir().is_none());
        assert!(cfg.timeout().is_none());
        assert_eq!(cfg.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn builder_chaining() {
        let cfg = CommandConfig::new()
            .with_program("gmres")
            .with_args(["-i", "{input}"])
            .with_working_dir("/opt/solver")
            .with_timeout(Some(Duration::from_secs(5)))
            .with_poll_interval(Duration::from_millis(10));
        assert_eq!(cfg.program(), "gmres");
        assert_eq!(cfg.args(), &["-i", "{input}"]);
        assert_eq!(cfg.working_dir(), Some(Path::new("/opt/solver")));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.poll_interval(), Duration::from_millis(10));
    }

    #[test]
    fn expands_placeholders() {
        let args = CommandConfig::new().expand_args(
            Path::new("/tmp/x/Ab.petsc"),
            Path::new("/tmp/x/sol.matlab"),
            2,
        );
        assert_eq!(
            args,
            vec![
                "run",
                "IFPATH=/tmp/x/Ab.petsc",
                "OFPATH=/tmp/x/sol.matlab",
                "IMAX=2"
            ]
        );
    }

    #[test]
    fn validate_ok() {
        assert!(CommandConfig::new().validate().is_ok());
    }

    #[test]
    fn validate_bad_values() {
        assert!(CommandConfig::new().with_program("  ").validate().is_err());
        assert!(
            CommandConfig::new()
                .with_poll_interval(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(
            CommandConfig::new()
                .with_timeout(Some(Duration::ZERO))
                .validate()
                .is_err()
        );
    }
}
