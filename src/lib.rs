//! Absorption probabilities of absorbing Markov chains.
//!
//! This package ties the workspace crates together behind one TOML
//! configuration:
//!
//! - [`absorb_graph`]: node sets, graph traits and lazy transforms;
//! - [`absorb_markov`]: validation, system assembly and the pipeline;
//! - [`absorb_solver`]: the external solver contract and command driver.
//!
//! [`run`] validates a chain, solves it with the configured external solver
//! and returns both the probabilities and the seeded majority assignment.

pub mod config;
pub mod convert;
pub mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

pub use absorb_graph::{
    AdjacencyGraph, DirectedGraph, GraphError, NodeId, NodeSet, WeightedGraph,
};
pub use absorb_markov::{
    AbsorbingChain, AbsorptionProbabilities, Assignments, ChainError, PipelineConfig,
    absorption_probabilities,
};
pub use absorb_solver::{CancelToken, CommandConfig, CommandSolver, Solver};
pub use config::AbsorbConfig;

/// Reads and parses a TOML configuration file.
pub fn load_config(path: &Path) -> Result<AbsorbConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: AbsorbConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    Ok(config)
}

/// Computes absorption probabilities and majority assignments of `chain`
/// as configured by `config`.
pub fn run<G: WeightedGraph>(
    chain: AbsorbingChain<G>,
    config: &AbsorbConfig,
    cancel: &CancelToken,
) -> Result<(AbsorptionProbabilities, Assignments)> {
    let pipeline = convert::build_pipeline_config(&config.pipeline)?;
    let solver = convert::build_solver(&config.solver)?;
    let mut rng = convert::build_rng(&config.assign);

    let probabilities = absorption_probabilities(chain, &solver, &pipeline, cancel)
        .context("failed to compute absorption probabilities")?;
    let assignments = probabilities
        .majority_assignments(&mut rng)
        .context("failed to compute majority assignments")?;
    info!(assigned = assignments.len(), "run complete");
    Ok((probabilities, assignments))
}
