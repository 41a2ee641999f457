//! Weight-level transforms: row normalisation and validity checks.

use std::borrow::Cow;

use tracing::trace;

use crate::NodeId;
use crate::error::GraphError;
use crate::graph::{DirectedGraph, WeightedGraph};
use crate::node_set::NodeSet;
use crate::sum::pairwise_sum;

/// A view whose outgoing weights sum to 1 for every node.
///
/// Row sums are computed once, on construction, with [`pairwise_sum`]; each
/// weight access divides the inner weight by its row sum. The structure of
/// the graph is unchanged.
#[derive(Debug, Clone)]
pub struct NormalizedWeights<G> {
    inner: G,
    row_sums: Vec<f64>,
    dense: bool,
}

impl<G: WeightedGraph> NormalizedWeights<G> {
    /// Computes the row sums of `inner`.
    ///
    /// # Errors
    ///
    /// Returns the first weight error met while walking the edges.
    pub fn new(inner: G) -> Result<Self, GraphError> {
        let nodes = inner.nodes();
        let mut row_sums = Vec::with_capacity(nodes.len() as usize);
        let mut scratch = Vec::with_capacity(1024);
        for from in nodes.iter() {
            scratch.clear();
            for &to in inner.successors(from).iter() {
                scratch.push(inner.weight(from, to)?);
            }
            row_sums.push(pairwise_sum(&mut scratch));
        }
        let dense = nodes.is_dense();
        trace!(rows = row_sums.len(), dense, "computed row sums");
        Ok(Self {
            inner,
            row_sums,
            dense,
        })
    }

    fn row_sum(&self, from: NodeId) -> Result<f64, GraphError> {
        let index = if self.dense {
            Some(from as usize)
        } else if self.inner.nodes().contains(from) {
            Some(self.inner.nodes().rank(from) as usize - 1)
        } else {
            None
        };
        index
            .and_then(|i| self.row_sums.get(i).copied())
            .ok_or(GraphError::UnknownNode { id: from })
    }
}

impl<G: WeightedGraph> DirectedGraph for NormalizedWeights<G> {
    fn nodes(&self) -> &NodeSet {
        self.inner.nodes()
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        self.inner.successors(from)
    }
}

impl<G: WeightedGraph> WeightedGraph for NormalizedWeights<G> {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        let w = self.inner.weight(from, to)?;
        Ok(w / self.row_sum(from)?)
    }
}

/// A view that rejects invalid weights lazily, when an edge is touched.
///
/// A weight must be finite and strictly positive; anything else is reported
/// with the offending edge.
#[derive(Debug, Clone)]
pub struct CheckedWeights<G> {
    inner: G,
}

impl<G: WeightedGraph> CheckedWeights<G> {
    /// Creates the view.
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    /// Returns the wrapped graph.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

/// Checks that `weight` is usable as a transition weight for `(from, to)`.
pub fn check_weight(from: NodeId, to: NodeId, weight: f64) -> Result<f64, GraphError> {
    if weight.is_nan() {
        return Err(GraphError::NanWeight { from, to });
    }
    if weight <= 0.0 {
        return Err(GraphError::NonPositiveWeight { from, to, weight });
    }
    if weight.is_infinite() {
        return Err(GraphError::InfiniteWeight { from, to, weight });
    }
    Ok(weight)
}

impl<G: WeightedGraph> DirectedGraph for CheckedWeights<G> {
    fn nodes(&self) -> &NodeSet {
        self.inner.nodes()
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        self.inner.successors(from)
    }
}

impl<G: WeightedGraph> WeightedGraph for CheckedWeights<G> {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        check_weight(from, to, self.inner.weight(from, to)?)
    }
}
