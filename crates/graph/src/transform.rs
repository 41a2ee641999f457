//! Lazy structural transforms over directed graphs.
//!
//! Each transform is a small immutable view holding only its input graph and
//! parameters. Successor lists and weights are recomputed on every call, so a
//! stack of views never materialises the adjacency of the whole graph.

use std::borrow::Cow;

use crate::NodeId;
use crate::error::GraphError;
use crate::graph::{DirectedGraph, WeightedGraph};
use crate::node_set::NodeSet;
use crate::search;
use crate::translator::IdTranslator;
use crate::weights::{CheckedWeights, NormalizedWeights};

/// Composition helpers for building transform stacks.
///
/// ```
/// use absorb_graph::{AdjacencyGraph, DirectedGraph, GraphExt, NodeSet};
///
/// let g = AdjacencyGraph::from_edges([(5, 7, 1.0), (5, 9, 1.0), (7, 5, 1.0)]);
/// let view = (&g).filter_nodes(NodeSet::from([9])).with_self_loops().normalized_ids();
///
/// assert_eq!(view.nodes().to_vec(), vec![0, 1]);
/// assert_eq!(view.successors(0).as_ref(), &[0, 1]);
/// assert_eq!(view.translator().to_old(1), Ok(7));
/// ```
pub trait GraphExt: DirectedGraph + Sized {
    /// Removes `blacklist` from the node set and from every successor list.
    fn filter_nodes(self, blacklist: NodeSet) -> FilterNodes<Self> {
        FilterNodes::new(self, blacklist)
    }

    /// Ensures every node lists itself as a successor.
    fn with_self_loops(self) -> SelfLoops<Self> {
        SelfLoops::new(self)
    }

    /// Renumbers the node set densely to `[0, n)` by ascending ID.
    ///
    /// Successors that are not in the node set are dropped from the view.
    fn normalized_ids(self) -> NormalizedIds<Self> {
        NormalizedIds::new(self)
    }

    /// Rescales every node's outgoing weights to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns the first weight error met while computing the row sums.
    fn normalized_weights(self) -> Result<NormalizedWeights<Self>, GraphError>
    where
        Self: WeightedGraph,
    {
        NormalizedWeights::new(self)
    }

    /// Rejects non-positive, infinite and NaN weights on access.
    fn checked_weights(self) -> CheckedWeights<Self>
    where
        Self: WeightedGraph,
    {
        CheckedWeights::new(self)
    }
}

impl<G: DirectedGraph> GraphExt for G {}

// ---------------------------------------------------------------------------
// FilterNodes
// ---------------------------------------------------------------------------

/// A view with a set of nodes removed.
///
/// Blacklisted nodes leave the node set, resolve to empty successor lists and
/// are dropped from every other node's successors (order preserved). Weights
/// pass through unchanged.
#[derive(Debug, Clone)]
pub struct FilterNodes<G> {
    inner: G,
    blacklist: NodeSet,
    nodes: NodeSet,
}

impl<G: DirectedGraph> FilterNodes<G> {
    /// Creates the view.
    pub fn new(inner: G, blacklist: NodeSet) -> Self {
        let nodes = inner.nodes().difference(&blacklist);
        Self {
            inner,
            blacklist,
            nodes,
        }
    }

    /// The removed nodes.
    pub fn blacklist(&self) -> &NodeSet {
        &self.blacklist
    }
}

impl<G: DirectedGraph> DirectedGraph for FilterNodes<G> {
    fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        if self.blacklist.contains(from) {
            return Cow::Borrowed(&[]);
        }
        let to = self.inner.successors(from);
        if !to.iter().any(|&id| self.blacklist.contains(id)) {
            return to;
        }
        Cow::Owned(
            to.iter()
                .copied()
                .filter(|&id| !self.blacklist.contains(id))
                .collect(),
        )
    }
}

impl<G: WeightedGraph> WeightedGraph for FilterNodes<G> {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        self.inner.weight(from, to)
    }
}

// ---------------------------------------------------------------------------
// SelfLoops
// ---------------------------------------------------------------------------

/// A view in which every node is its own successor.
///
/// Missing self-loops are inserted at their sorted position. As a weighted
/// graph, the self-loop weight is shifted by `-1` (or is `-1` when the inner
/// graph had no self-loop), which turns a transition matrix `Q` into `Q - I`.
#[derive(Debug, Clone)]
pub struct SelfLoops<G> {
    inner: G,
}

impl<G: DirectedGraph> SelfLoops<G> {
    /// Creates the view.
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: DirectedGraph> DirectedGraph for SelfLoops<G> {
    fn nodes(&self) -> &NodeSet {
        self.inner.nodes()
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        let to = self.inner.successors(from);
        if !self.inner.nodes().contains(from) {
            return to;
        }
        match search::find(&to, from) {
            (true, _) => to,
            (false, p) => {
                let mut with_loop = Vec::with_capacity(to.len() + 1);
                with_loop.extend_from_slice(&to[..p]);
                with_loop.push(from);
                with_loop.extend_from_slice(&to[p..]);
                Cow::Owned(with_loop)
            }
        }
    }
}

impl<G: WeightedGraph> WeightedGraph for SelfLoops<G> {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        if from != to {
            return self.inner.weight(from, to);
        }
        let (has_loop, _) = search::find(&self.inner.successors(from), from);
        if has_loop {
            Ok(self.inner.weight(from, to)? - 1.0)
        } else {
            Ok(-1.0)
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedIds
// ---------------------------------------------------------------------------

/// A view renumbered to the dense range `[0, n)` by ascending original ID.
#[derive(Debug, Clone)]
pub struct NormalizedIds<G> {
    inner: G,
    translator: IdTranslator,
    nodes: NodeSet,
}

impl<G: DirectedGraph> NormalizedIds<G> {
    /// Creates the view and its translator.
    pub fn new(inner: G) -> Self {
        let translator = IdTranslator::new(inner.nodes());
        let nodes = NodeSet::dense(translator.len() as NodeId);
        Self {
            inner,
            translator,
            nodes,
        }
    }

    /// The translator between original IDs and dense indices.
    pub fn translator(&self) -> &IdTranslator {
        &self.translator
    }
}

impl<G: DirectedGraph> DirectedGraph for NormalizedIds<G> {
    fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    /// Successors are translated with a binary search that only ever moves
    /// forward through the sorted old-ID array, since successor lists are
    /// ascending. Successors outside the inner node set have no dense index
    /// and are dropped.
    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        let Ok(old_from) = self.translator.to_old(from) else {
            return Cow::Borrowed(&[]);
        };
        let old_ids = self.translator.old_ids();
        let mut rest = old_ids;
        let to = self
            .inner
            .successors(old_from)
            .iter()
            .filter_map(|&old_to| {
                rest = &rest[search::lower_bound(rest, old_to)..];
                (rest.first() == Some(&old_to)).then(|| (old_ids.len() - rest.len()) as NodeId)
            })
            .collect();
        Cow::Owned(to)
    }
}

impl<G: WeightedGraph> WeightedGraph for NormalizedIds<G> {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        let to = self.translator.to_old(to)?;
        let from = self.translator.to_old(from)?;
        self.inner.weight(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;

    fn chain() -> AdjacencyGraph {
        // 10 -> {20, 30, 40}, 20 -> {20}, 30 -> {10, 40}, 40 -> {}
        AdjacencyGraph::from_edges([
            (10, 20, 1.0),
            (10, 30, 2.0),
            (10, 40, 3.0),
            (20, 20, 5.0),
            (30, 10, 1.0),
            (30, 40, 1.0),
        ])
    }

    #[test]
    fn filter_removes_nodes_and_edges() {
        let g = chain();
        let f = (&g).filter_nodes(NodeSet::from([20, 40]));
        assert_eq!(f.nodes().to_vec(), vec![10, 30]);
        assert_eq!(f.successors(10).as_ref(), &[30]);
        assert_eq!(f.successors(30).as_ref(), &[10]);
        assert!(f.successors(20).is_empty());
        assert_eq!(f.blacklist().to_vec(), vec![20, 40]);
    }

    #[test]
    fn filter_passes_untouched_lists_through() {
        let g = chain();
        let f = (&g).filter_nodes(NodeSet::from([99]));
        assert!(matches!(f.successors(10), Cow::Borrowed(_)));
        assert_eq!(f.weight(10, 30), Ok(2.0));
    }

    #[test]
    fn self_loops_inserted_in_order() {
        let g = chain();
        let s = (&g).with_self_loops();
        assert_eq!(s.successors(10).as_ref(), &[10, 20, 30, 40]);
        assert_eq!(s.successors(30).as_ref(), &[10, 30, 40]);
        assert_eq!(s.successors(20).as_ref(), &[20]);
        assert_eq!(s.successors(40).as_ref(), &[40]);
        assert!(s.successors(99).is_empty());
    }

    #[test]
    fn self_loop_weights() {
        let g = chain();
        let s = (&g).with_self_loops();
        // Existing loop is shifted by -1.
        assert_eq!(s.weight(20, 20), Ok(4.0));
        // Inserted loop weighs -1.
        assert_eq!(s.weight(10, 10), Ok(-1.0));
        // Other edges untouched.
        assert_eq!(s.weight(10, 40), Ok(3.0));
    }

    #[test]
    fn self_loop_weight_error_propagates() {
        let mut g = AdjacencyGraph::new(NodeSet::from([1]));
        g.add_edge(1, 1, 1.0);
        let s = (&g).with_self_loops();
        assert!(s.weight(1, 2).is_err());
    }

    #[test]
    fn normalized_ids_renumber_densely() {
        let g = chain();
        let n = (&g).normalized_ids();
        assert_eq!(n.nodes().to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(n.successors(0).as_ref(), &[1, 2, 3]);
        assert_eq!(n.successors(1).as_ref(), &[1]);
        assert_eq!(n.successors(2).as_ref(), &[0, 3]);
        assert!(n.successors(3).is_empty());
        assert!(n.successors(4).is_empty());
        assert_eq!(n.weight(0, 2), Ok(2.0));
        assert_eq!(n.weight(7, 0), Err(GraphError::UnknownIndex { index: 7, len: 4 }));
    }

    #[test]
    fn normalized_ids_drop_successors_outside_node_set() {
        let mut g = AdjacencyGraph::new(NodeSet::from([0, 7]));
        g.add_edge(0, 5, 1.0).add_edge(0, 7, 2.0).add_edge(0, 9, 1.0);
        let n = (&g).normalized_ids();
        assert_eq!(n.successors(0).as_ref(), &[1]);
        assert_eq!(n.weight(0, 1), Ok(2.0));
        assert!(n.successors(1).is_empty());
    }

    #[test]
    fn composed_stack() {
        let g = chain();
        let m = (&g)
            .filter_nodes(NodeSet::from([20, 40]))
            .with_self_loops()
            .normalized_ids();
        assert_eq!(m.nodes().len(), 2);
        assert_eq!(m.successors(0).as_ref(), &[0, 1]);
        assert_eq!(m.successors(1).as_ref(), &[0, 1]);
        assert_eq!(m.translator().old_ids(), &[10, 30]);
        assert_eq!(m.weight(1, 1), Ok(-1.0));
    }
}
