//! Solver driver that runs an external program.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::CommandConfig;
use crate::error::SolverError;
use crate::{SolveJob, Solver};

/// Runs the solver as a child process and waits for it.
///
/// The process is polled until it exits, the deadline passes or the
/// [`CancelToken`] fires; in the last two cases it is killed and reaped.
/// Standard error is captured and reported verbatim on failure. The deadline
/// and the token also bound the wait for the stderr pipe to close.
#[derive(Debug, Clone, Default)]
pub struct CommandSolver {
    config: CommandConfig,
}

impl CommandSolver {
    /// Creates a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: CommandConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    fn spawn(&self, job: &SolveJob) -> Result<Child, SolverError> {
        let input = absolute(job.input());
        let output = absolute(job.output());
        let args = self.config.expand_args(&input, &output, job.rhs_count());

        let mut cmd = Command::new(self.config.program());
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = self.config.working_dir() {
            cmd.current_dir(dir);
        }
        debug!(program = self.config.program(), ?args, "spawning solver");
        cmd.spawn().map_err(|source| SolverError::Spawn {
            program: self.config.program().to_string(),
            source,
        })
    }

    fn wait(
        &self,
        child: &mut Child,
        cancel: &CancelToken,
        started: Instant,
    ) -> Result<ExitStatus, SolverError> {
        loop {
            if let Some(status) = child.try_wait().map_err(|source| SolverError::Wait { source })? {
                return Ok(status);
            }
            if let Err(err) = self.check_interrupt(cancel, started) {
                warn!(%err, "killing solver process");
                kill(child)?;
                return Err(err);
            }
            thread::sleep(self.config.poll_interval());
        }
    }

    /// Waits for the stderr capture thread under the same deadline and
    /// cancellation as the process itself.
    ///
    /// Descendants of the solver may inherit the pipe and keep it open after
    /// the solver exits. On interrupt the capture thread is left detached.
    fn drain_stderr(
        &self,
        handle: Option<JoinHandle<Vec<u8>>>,
        cancel: &CancelToken,
        started: Instant,
    ) -> Result<String, SolverError> {
        let Some(handle) = handle else {
            return Ok(String::new());
        };
        while !handle.is_finished() {
            if let Err(err) = self.check_interrupt(cancel, started) {
                warn!(%err, "solver exited but its stderr is still open");
                return Err(err);
            }
            thread::sleep(self.config.poll_interval());
        }
        let bytes = handle.join().unwrap_or_default();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn check_interrupt(&self, cancel: &CancelToken, started: Instant) -> Result<(), SolverError> {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled);
        }
        if let Some(after) = self.config.timeout()
            && started.elapsed() >= after
        {
            return Err(SolverError::Timeout { after });
        }
        Ok(())
    }
}

impl Solver for CommandSolver {
    fn solve(&self, job: &SolveJob, cancel: &CancelToken) -> Result<(), SolverError> {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled);
        }
        let started = Instant::now();
        let mut child = self.spawn(job)?;
        let stderr = capture_stderr(&mut child);

        let status = self.wait(&mut child, cancel, started)?;
        let stderr = self.drain_stderr(stderr, cancel, started)?;

        if !status.success() {
            return Err(SolverError::Failed {
                status: status.to_string(),
                stderr,
            });
        }
        if !job.output().exists() {
            return Err(SolverError::MissingOutput {
                path: job.output().to_path_buf(),
            });
        }
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            rhs = job.rhs_count(),
            "solver finished"
        );
        Ok(())
    }
}

fn absolute(path: &Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn kill(child: &mut Child) -> Result<(), SolverError> {
    // The process may have exited between the poll and the kill.
    if let Err(source) = child.kill()
        && source.kind() != std::io::ErrorKind::InvalidInput
    {
        return Err(SolverError::Wait { source });
    }
    child.wait().map_err(|source| SolverError::Wait { source })?;
    Ok(())
}

fn capture_stderr(child: &mut Child) -> Option<JoinHandle<Vec<u8>>> {
    let mut pipe = child.stderr.take()?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    }))
}
