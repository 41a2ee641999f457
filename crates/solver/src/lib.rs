//! Contract and command-backed driver for the external linear-system solver.
//!
//! The solver is an opaque collaborator reached through files: it reads the
//! binary system file at [`SolveJob::input`] and writes one solution block per
//! right-hand side to [`SolveJob::output`]. [`Solver`] is the seam; the
//! production implementation is [`CommandSolver`], which runs a configurable
//! external program.
//!
//! # Quick start
//!
//! ```no_run
//! use absorb_solver::{CancelToken, CommandConfig, CommandSolver, SolveJob, Solver};
//!
//! let solver = CommandSolver::new(CommandConfig::new().with_working_dir("petsc-gmres"))?;
//! let job = SolveJob::new("Ab.petsc", "sol.matlab", 2);
//! solver.solve(&job, &CancelToken::new())?;
//! # Ok::<(), absorb_solver::SolverError>(())
//! ```

pub mod cancel;
pub mod command;
pub mod config;
pub mod error;

use std::path::{Path, PathBuf};

pub use cancel::CancelToken;
pub use command::CommandSolver;
pub use config::CommandConfig;
pub use error::SolverError;

/// One solver invocation: where the system is, where the solution goes, and
/// how many right-hand sides the system carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveJob {
    input: PathBuf,
    output: PathBuf,
    rhs_count: u64,
}

impl SolveJob {
    /// Creates a job.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, rhs_count: u64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            rhs_count,
        }
    }

    /// Path of the binary system file.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path the solution stream must be written to.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Number of right-hand-side vectors in the system file.
    pub fn rhs_count(&self) -> u64 {
        self.rhs_count
    }
}

/// An external linear-system solver.
///
/// Implementations block until the solution file is complete, the run fails,
/// or `cancel` fires.
pub trait Solver {
    /// Solves `job`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] on failure, timeout or cancellation.
    fn solve(&self, job: &SolveJob, cancel: &CancelToken) -> Result<(), SolverError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, job: &SolveJob, cancel: &CancelToken) -> Result<(), SolverError> {
        (**self).solve(job, cancel)
    }
}
