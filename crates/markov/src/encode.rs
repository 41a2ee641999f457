//! Assembly of the linear system `(Q - I) x = -R` into the solver's binary
//! system file.
//!
//! The matrix is indexed by transient nodes renumbered densely in ascending
//! ID order; one right-hand side is written per absorbing node, also in
//! ascending ID order. The two translators returned in [`LinearSystem`] are
//! the only way to map solver output back to node IDs.

use std::path::{Path, PathBuf};

use absorb_graph::{
    DirectedGraph, GraphExt, IdTranslator, NodeId, NodeSet, WeightedGraph, describe,
    describe_weighted,
};
use absorb_io::{IoError, SystemFile};
use tracing::{info, trace};

use crate::chain::ValidatedChain;
use crate::error::ChainError;

/// The written system file and the translators needed to read its solution.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    path: PathBuf,
    transient: IdTranslator,
    absorbing: IdTranslator,
    nnz: u64,
}

impl LinearSystem {
    /// Path of the finished system file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dense index over transient nodes: matrix rows and columns, and
    /// solution columns.
    pub fn transient(&self) -> &IdTranslator {
        &self.transient
    }

    /// Dense index over absorbing nodes: right-hand sides, and solution rows.
    pub fn absorbing(&self) -> &IdTranslator {
        &self.absorbing
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.transient.len()
    }

    /// Number of stored matrix entries.
    pub fn nnz(&self) -> u64 {
        self.nnz
    }

    /// Splits into the transient and absorbing translators.
    pub fn into_translators(self) -> (IdTranslator, IdTranslator) {
        (self.transient, self.absorbing)
    }
}

/// One contribution to a right-hand side, stored under its absorbing node.
///
/// The edge is kept reversed: `to` is the transient node the original edge
/// leaves from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImplicitWeightedEdge {
    to: NodeId,
    weight: f64,
}

/// Writes the linear system of `chain` to `path`.
///
/// The matrix holds `Q - I`, where `Q` is the transient-to-transient block of
/// the row-normalised transition weights (normalised over all successors,
/// absorbing ones included). Each right-hand side holds `-R` for one absorbing
/// node. A solver that solves `A x = b` for every vector therefore produces
/// the absorption probabilities directly.
///
/// The file is written to a temporary sibling and moved into place only once
/// complete; on any error nothing is left at `path`.
///
/// # Errors
///
/// Returns [`ChainError::Graph`] for the first invalid or unreadable weight
/// and [`ChainError::Io`] for file failures.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn encode_system<G: WeightedGraph>(
    chain: &ValidatedChain<G>,
    path: &Path,
) -> Result<LinearSystem, ChainError> {
    let absorbing = chain.absorbing();

    let matrix = chain
        .graph()
        .filter_nodes(absorbing.clone())
        .with_self_loops()
        .normalized_ids();
    let size = matrix.nodes().len();
    let n = u32::try_from(size).map_err(|_| IoError::Overflow {
        what: "transient node count",
        value: size,
    })?;
    let row_nnz: Vec<u32> = (0..n)
        .map(|row| matrix.successors(row).len() as u32)
        .collect();
    let nnz: u64 = row_nnz.iter().map(|&c| u64::from(c)).sum();
    trace!(matrix = %describe(&matrix), "matrix structure");

    let normalized = chain.graph().normalized_weights()?;
    let tan = IdTranslator::new(absorbing);
    let rhs = compressed_rhs(&normalized, chain.transient(), absorbing, &tan)?;
    let weights = (&normalized).with_self_loops().filter_nodes(absorbing.clone());
    trace!(weights = %describe_weighted(&weights), "matrix weights");

    let mut file = SystemFile::create(path)?;
    file.matrix_header(n, nnz, &row_nnz)?;
    for row in 0..n {
        let columns = matrix.successors(row);
        if !columns.is_empty() {
            file.row_indices(&columns)?;
        }
    }
    let mut values = Vec::new();
    for from in weights.nodes().iter() {
        values.clear();
        for &to in weights.successors(from).iter() {
            values.push(weights.weight(from, to)?);
        }
        if !values.is_empty() {
            file.row_values(&values)?;
        }
    }

    let ttn = matrix.translator();
    let mut b = vec![0.0; n as usize];
    for contributions in &rhs {
        b.fill(0.0);
        for edge in contributions {
            b[ttn.to_new(edge.to)? as usize] = edge.weight;
        }
        file.vector(&b)?;
    }
    let path = file.finish()?;

    info!(n, nnz, absorbing = tan.len(), "linear system written");
    Ok(LinearSystem {
        path,
        transient: ttn.clone(),
        absorbing: tan,
        nnz,
    })
}

/// Collects `-weight(from, a)` for every transient `from` and absorbing `a`,
/// grouped by the dense index of `a` and sorted by `from`.
fn compressed_rhs<G: WeightedGraph>(
    weights: &G,
    transient: &NodeSet,
    absorbing: &NodeSet,
    tan: &IdTranslator,
) -> Result<Vec<Vec<ImplicitWeightedEdge>>, ChainError> {
    let mut lists: Vec<Vec<ImplicitWeightedEdge>> = vec![Vec::new(); tan.len()];
    for from in transient.iter() {
        for &to in weights.successors(from).iter() {
            if !absorbing.contains(to) {
                continue;
            }
            let edge = ImplicitWeightedEdge {
                to: from,
                weight: -weights.weight(from, to)?,
            };
            let list = &mut lists[tan.to_new(to)? as usize];
            let at = list.partition_point(|e| e.to < from);
            list.insert(at, edge);
        }
    }
    Ok(lists)
}
