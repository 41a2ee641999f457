use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration file.
///
/// ```toml
/// [pipeline]
/// scratch_root = "/var/tmp"
///
/// [solver]
/// working_dir = "petsc-gmres"
/// timeout_secs = 3600
///
/// [assign]
/// seed = 42
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AbsorbConfig {
    /// Scratch directory and file names.
    #[serde(default)]
    pub pipeline: PipelineToml,

    /// External solver invocation.
    #[serde(default)]
    pub solver: SolverToml,

    /// Majority assignment settings.
    #[serde(default)]
    pub assign: AssignToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineToml {
    /// Directory per-run scratch directories are created in. Defaults to the
    /// system temporary directory.
    #[serde(default)]
    pub scratch_root: Option<PathBuf>,
    #[serde(default = "default_input_name")]
    pub input_name: String,
    #[serde(default = "default_output_name")]
    pub output_name: String,
}

impl Default for PipelineToml {
    fn default() -> Self {
        Self {
            scratch_root: None,
            input_name: default_input_name(),
            output_name: default_output_name(),
        }
    }
}

fn default_input_name() -> String {
    absorb_markov::DEFAULT_INPUT_NAME.to_string()
}
fn default_output_name() -> String {
    absorb_markov::DEFAULT_OUTPUT_NAME.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverToml {
    #[serde(default = "default_program")]
    pub program: String,
    /// Argument templates; `{input}`, `{output}` and `{absorbing}` are
    /// substituted per run.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for SolverToml {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
            timeout_secs: None,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_program() -> String {
    absorb_solver::CommandConfig::new().program().to_string()
}
fn default_args() -> Vec<String> {
    absorb_solver::CommandConfig::new().args().to_vec()
}
fn default_poll_interval_ms() -> u64 {
    50
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AssignToml {
    /// Seed for tie-breaking; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}
