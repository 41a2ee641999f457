//! Absorbing chains and their structural validation.

use absorb_graph::{CheckedWeights, DirectedGraph, GraphExt, NodeSet, WeightedGraph};
use tracing::debug;

use crate::error::ChainError;

/// A weighted directed graph together with its declared absorbing nodes.
///
/// Every node that is not absorbing is treated as transient. Nothing is
/// checked on construction; call [`validate`](Self::validate) to obtain a
/// [`ValidatedChain`] that can be encoded.
#[derive(Debug, Clone)]
pub struct AbsorbingChain<G> {
    graph: G,
    absorbing: NodeSet,
}

impl<G: WeightedGraph> AbsorbingChain<G> {
    /// Creates a chain over `graph` with `absorbing` as its terminal states.
    pub fn new(graph: G, absorbing: NodeSet) -> Self {
        Self { graph, absorbing }
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the declared absorbing nodes.
    pub fn absorbing(&self) -> &NodeSet {
        &self.absorbing
    }

    /// Checks that the chain is absorbing and wraps its weights in a
    /// positivity/finiteness check.
    ///
    /// The checks run in order:
    ///
    /// 1. every successor of every node is itself a node;
    /// 2. every absorbing node is a node, with no successors or only itself
    ///    as successor;
    /// 3. every transient node reaches some absorbing node, computed as a
    ///    fixed point growing outward from the absorbing set.
    ///
    /// Weights are not inspected here. An invalid weight is reported when
    /// encoding first touches the edge.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DanglingEdge`], [`ChainError::AbsorbingNotInGraph`],
    /// [`ChainError::InvalidAbsorbingNode`] or [`ChainError::Unreachable`].
    #[tracing::instrument(skip_all, fields(nodes = self.graph.nodes().len(), absorbing = self.absorbing.len()))]
    pub fn validate(self) -> Result<ValidatedChain<G>, ChainError> {
        let nodes = self.graph.nodes();

        for from in nodes.iter() {
            if let Some(&to) = self.graph.successors(from).iter().find(|&&to| !nodes.contains(to)) {
                return Err(ChainError::DanglingEdge { from, to });
            }
        }

        for id in self.absorbing.iter() {
            if !nodes.contains(id) {
                return Err(ChainError::AbsorbingNotInGraph { id });
            }
            match self.graph.successors(id).as_ref() {
                [] => {}
                [only] if *only == id => {}
                _ => return Err(ChainError::InvalidAbsorbingNode { id }),
            }
        }

        let transient = nodes.difference(&self.absorbing);
        let mut reaching = self.absorbing.clone();
        let mut passes = 0usize;
        loop {
            passes += 1;
            let before = reaching.len();
            for from in transient.iter() {
                if !reaching.contains(from)
                    && self.graph.successors(from).iter().any(|&to| reaching.contains(to))
                {
                    reaching.insert(from);
                }
            }
            if reaching.len() == before {
                break;
            }
        }
        if let Some(id) = nodes.difference(&reaching).min() {
            return Err(ChainError::Unreachable { id });
        }

        debug!(transient = transient.len(), passes, "chain validated");
        Ok(ValidatedChain {
            graph: self.graph.checked_weights(),
            absorbing: self.absorbing,
            transient,
        })
    }
}

/// A chain that passed [`AbsorbingChain::validate`].
///
/// Weight accesses go through [`CheckedWeights`], so a zero, negative,
/// infinite or NaN weight fails the operation that reads it.
#[derive(Debug, Clone)]
pub struct ValidatedChain<G> {
    graph: CheckedWeights<G>,
    absorbing: NodeSet,
    transient: NodeSet,
}

impl<G: WeightedGraph> ValidatedChain<G> {
    /// Returns the weight-checked graph.
    pub fn graph(&self) -> &CheckedWeights<G> {
        &self.graph
    }

    /// Returns the absorbing nodes.
    pub fn absorbing(&self) -> &NodeSet {
        &self.absorbing
    }

    /// Returns the transient nodes.
    pub fn transient(&self) -> &NodeSet {
        &self.transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absorb_graph::AdjacencyGraph;

    fn chain(edges: &[(u32, u32)], absorbing: &[u32]) -> AbsorbingChain<AdjacencyGraph> {
        let graph = AdjacencyGraph::from_edges(edges.iter().map(|&(f, t)| (f, t, 1.0)));
        AbsorbingChain::new(graph, absorbing.iter().copied().collect())
    }

    #[test]
    fn accepts_simple_chain() {
        let v = chain(&[(2, 0), (2, 3), (3, 1), (3, 2)], &[0, 1])
            .validate()
            .unwrap();
        assert_eq!(v.transient().to_vec(), vec![2, 3]);
        assert_eq!(v.absorbing().to_vec(), vec![0, 1]);
    }

    #[test]
    fn absorbing_self_loop_is_allowed() {
        assert!(chain(&[(0, 0), (1, 0)], &[0]).validate().is_ok());
    }

    #[test]
    fn dangling_edge() {
        let mut graph = AdjacencyGraph::new([0, 1].into());
        graph.add_edge(1, 0, 1.0).add_edge(1, 7, 1.0);
        let err = AbsorbingChain::new(graph, [0].into()).validate().unwrap_err();
        assert!(matches!(err, ChainError::DanglingEdge { from: 1, to: 7 }));
    }

    #[test]
    fn absorbing_outside_graph() {
        let err = chain(&[(1, 0)], &[0, 5]).validate().unwrap_err();
        assert!(matches!(err, ChainError::AbsorbingNotInGraph { id: 5 }));
    }

    #[test]
    fn absorbing_with_two_successors() {
        let err = chain(&[(0, 0), (0, 1), (1, 0)], &[0]).validate().unwrap_err();
        assert!(matches!(err, ChainError::InvalidAbsorbingNode { id: 0 }));
    }

    #[test]
    fn absorbing_with_foreign_successor() {
        let err = chain(&[(0, 1), (1, 0)], &[0]).validate().unwrap_err();
        assert!(matches!(err, ChainError::InvalidAbsorbingNode { id: 0 }));
    }

    #[test]
    fn reachability_needs_several_passes() {
        // 4 -> 3 -> 2 -> 0, visited in ascending order, so each pass marks one.
        let v = chain(&[(2, 0), (3, 2), (4, 3)], &[0]).validate().unwrap();
        assert_eq!(v.transient().len(), 3);
    }

    #[test]
    fn isolated_cycle_is_unreachable() {
        let err = chain(&[(2, 0), (5, 6), (6, 5)], &[0]).validate().unwrap_err();
        assert!(matches!(err, ChainError::Unreachable { id: 5 }));
    }

    #[test]
    fn transient_without_successors_is_unreachable() {
        let mut graph = AdjacencyGraph::from_edges([(1, 0, 1.0)]);
        graph.add_node(9);
        let err = AbsorbingChain::new(graph, [0].into()).validate().unwrap_err();
        assert!(matches!(err, ChainError::Unreachable { id: 9 }));
    }
}
