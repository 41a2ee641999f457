//! Pure conversion functions: TOML config structs -> crate API config types.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use absorb_markov::PipelineConfig;
use absorb_solver::{CommandConfig, CommandSolver};

use crate::config::*;

/// Builds a [`PipelineConfig`] from the `[pipeline]` section.
pub fn build_pipeline_config(p: &PipelineToml) -> Result<PipelineConfig> {
    let mut cfg = PipelineConfig::new()
        .with_input_name(&p.input_name)
        .with_output_name(&p.output_name);
    if let Some(ref root) = p.scratch_root {
        cfg = cfg.with_scratch_root(root);
    }
    cfg.validate().context("invalid [pipeline] section")?;
    Ok(cfg)
}

/// Builds a [`CommandConfig`] from the `[solver]` section.
pub fn build_command_config(s: &SolverToml) -> Result<CommandConfig> {
    if s.args.is_empty() {
        bail!("[solver].args must not be empty");
    }
    let mut cfg = CommandConfig::new()
        .with_program(&s.program)
        .with_args(&s.args)
        .with_timeout(s.timeout_secs.map(Duration::from_secs))
        .with_poll_interval(Duration::from_millis(s.poll_interval_ms));
    if let Some(ref dir) = s.working_dir {
        cfg = cfg.with_working_dir(dir);
    }
    cfg.validate().context("invalid [solver] section")?;
    Ok(cfg)
}

/// Builds the command-backed solver from the `[solver]` section.
pub fn build_solver(s: &SolverToml) -> Result<CommandSolver> {
    let cfg = build_command_config(s)?;
    CommandSolver::new(cfg).context("invalid [solver] section")
}

/// Builds the tie-breaking RNG from the `[assign]` section.
pub fn build_rng(a: &AssignToml) -> StdRng {
    match a.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
