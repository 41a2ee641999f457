//! End-to-end computation: validate, encode, solve, decode.

use absorb_graph::{DirectedGraph, IdTranslator, WeightedGraph};
use absorb_io::{IoError, read_solution};
use absorb_solver::{CancelToken, SolveJob, Solver};
use tracing::info;

use crate::chain::AbsorbingChain;
use crate::config::PipelineConfig;
use crate::encode::encode_system;
use crate::error::ChainError;
use crate::projector::AbsorptionProbabilities;

/// Computes the absorption probabilities of `chain`.
///
/// The chain is validated and written to a binary system file inside a fresh
/// scratch directory under [`PipelineConfig::scratch_root`]. The chain is
/// then dropped, before `solver` runs, so the source graph does not stay
/// alive during the blocking solve. The solution is decoded and checked
/// against the system's dimensions. The scratch directory is removed on
/// every exit path.
///
/// A chain without transient nodes never reaches the solver and yields an
/// empty result.
///
/// # Errors
///
/// Returns the first validation, weight, I/O, solver or decoding failure;
/// there is no partial result.
#[tracing::instrument(skip_all, fields(nodes = chain.graph().nodes().len()))]
pub fn absorption_probabilities<G, S>(
    chain: AbsorbingChain<G>,
    solver: &S,
    config: &PipelineConfig,
    cancel: &CancelToken,
) -> Result<AbsorptionProbabilities, ChainError>
where
    G: WeightedGraph,
    S: Solver + ?Sized,
{
    config.validate()?;
    let chain = chain.validate()?;

    if chain.transient().is_empty() {
        let absorbing = IdTranslator::new(chain.absorbing());
        info!("chain has no transient nodes, skipping solver");
        return AbsorptionProbabilities::new(
            vec![Vec::new(); absorbing.len()],
            IdTranslator::default(),
            absorbing,
        );
    }

    let scratch = tempfile::Builder::new()
        .prefix(".absorb-")
        .tempdir_in(config.scratch_root())
        .map_err(|source| IoError::Create {
            path: config.scratch_root().to_path_buf(),
            source,
        })?;
    let input = scratch.path().join(config.input_name());
    let output = scratch.path().join(config.output_name());

    let system = encode_system(&chain, &input)?;
    drop(chain);

    let job = SolveJob::new(system.path(), &output, system.absorbing().len() as u64);
    solver.solve(&job, cancel)?;

    let rows = read_solution(&output)?;
    let (transient, absorbing) = system.into_translators();
    let probabilities = AbsorptionProbabilities::new(rows, transient, absorbing)?;
    info!(
        transient = probabilities.transient().len(),
        absorbing = probabilities.absorbing().len(),
        "absorption probabilities computed"
    );
    Ok(probabilities)
}
