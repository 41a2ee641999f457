//! Directed graph capabilities and an owned adjacency-list implementation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

use crate::NodeId;
use crate::error::GraphError;
use crate::node_set::NodeSet;
use crate::search;

/// A directed graph: a node set plus a successor function.
///
/// Implementations must return successor lists that are sorted ascending and
/// free of duplicates, so callers may binary-search them. Nodes outside
/// [`nodes`](Self::nodes) resolve to an empty list. Successors are not
/// required to be members of the node set; validation checks that.
pub trait DirectedGraph {
    /// The graph's node set.
    fn nodes(&self) -> &NodeSet;

    /// Sorted, duplicate-free successors of `from`.
    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]>;
}

/// A directed graph with a weight on every edge.
pub trait WeightedGraph: DirectedGraph {
    /// Weight of the edge `(from, to)`.
    ///
    /// # Errors
    ///
    /// Implementations return a [`GraphError`] when the edge does not exist or
    /// the weight cannot be produced.
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError>;
}

impl<G: DirectedGraph + ?Sized> DirectedGraph for &G {
    fn nodes(&self) -> &NodeSet {
        (**self).nodes()
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        (**self).successors(from)
    }
}

impl<G: WeightedGraph + ?Sized> WeightedGraph for &G {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        (**self).weight(from, to)
    }
}

/// An owned weighted graph stored as sorted adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    nodes: NodeSet,
    successors: HashMap<NodeId, Vec<NodeId>>,
    weights: HashMap<(NodeId, NodeId), f64>,
}

impl AdjacencyGraph {
    /// Creates a graph over `nodes` with no edges.
    pub fn new(nodes: NodeSet) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    /// Builds a graph from `(from, to, weight)` triples, adding every endpoint
    /// to the node set.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut g = Self::default();
        for (from, to, weight) in edges {
            g.add_node(from);
            g.add_node(to);
            g.add_edge(from, to, weight);
        }
        g
    }

    /// Adds `id` to the node set.
    pub fn add_node(&mut self, id: NodeId) -> &mut Self {
        self.nodes.insert(id);
        self
    }

    /// Adds the edge `(from, to)`, replacing its weight if it already exists.
    ///
    /// The node set is left untouched, so an edge may point outside it.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> &mut Self {
        let list = self.successors.entry(from).or_default();
        if let (false, p) = search::find(list, to) {
            list.insert(p, to);
        }
        self.weights.insert((from, to), weight);
        self
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }
}

impl DirectedGraph for AdjacencyGraph {
    fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    fn successors(&self, from: NodeId) -> Cow<'_, [NodeId]> {
        match self.successors.get(&from) {
            Some(list) => Cow::Borrowed(list.as_slice()),
            None => Cow::Borrowed(&[]),
        }
    }
}

impl WeightedGraph for AdjacencyGraph {
    fn weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        self.weights
            .get(&(from, to))
            .copied()
            .ok_or(GraphError::MissingEdge { from, to })
    }
}

/// Renders one line per node: `from -> [to, ...]`.
pub fn describe<G: DirectedGraph + ?Sized>(graph: &G) -> String {
    let mut out = String::new();
    for from in graph.nodes().iter() {
        let _ = writeln!(out, "{from} -> {:?}", graph.successors(from));
    }
    out
}

/// Renders one line per node: `from -> [to:weight, ...]`.
///
/// Weights that fail to resolve are shown as `err`.
pub fn describe_weighted<G: WeightedGraph + ?Sized>(graph: &G) -> String {
    let mut out = String::new();
    for from in graph.nodes().iter() {
        let edges: Vec<String> = graph
            .successors(from)
            .iter()
            .map(|&to| match graph.weight(from, to) {
                Ok(w) => format!("{to}:{w}"),
                Err(_) => format!("{to}:err"),
            })
            .collect();
        let _ = writeln!(out, "{from} -> [{}]", edges.join(", "));
    }
    out
}
