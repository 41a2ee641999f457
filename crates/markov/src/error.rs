//! Error types for the absorb-markov crate.

use absorb_graph::{GraphError, NodeId};
use absorb_io::IoError;
use absorb_solver::SolverError;

/// Error type for all fallible operations in the absorb-markov crate.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// Returned when a successor list names a node outside the graph.
    #[error("arc ({from},{to}) should not exist: {to} is not a graph node")]
    DanglingEdge {
        /// Source node of the arc.
        from: NodeId,
        /// The missing target node.
        to: NodeId,
    },

    /// Returned when a declared absorbing node is not part of the graph.
    #[error("absorbing node {id} is not a graph node")]
    AbsorbingNotInGraph {
        /// The declared absorbing node.
        id: NodeId,
    },

    /// Returned when an absorbing node has an outgoing edge other than a
    /// self-loop.
    #[error("{id} is not a valid absorbing node: it may only have a self-loop")]
    InvalidAbsorbingNode {
        /// The offending absorbing node.
        id: NodeId,
    },

    /// Returned when a node can reach no absorbing node and is not absorbing
    /// itself.
    #[error("{id} is not a transient node that reaches absorption, nor is it declared absorbing")]
    Unreachable {
        /// The smallest offending node.
        id: NodeId,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the decoded solution does not have one row per
    /// absorbing node and one column per transient node.
    #[error(
        "solution has shape {rows}x{cols}, expected {expected_rows}x{expected_cols}"
    )]
    SolutionShape {
        /// Rows found.
        rows: usize,
        /// Length of the first row with the wrong length, or the expected
        /// length if all rows match.
        cols: usize,
        /// Number of absorbing nodes.
        expected_rows: usize,
        /// Number of transient nodes.
        expected_cols: usize,
    },

    /// Returned when no absorbing node has a usable probability for a
    /// transient node.
    #[error("no majority absorbing node for {id}")]
    NoMajority {
        /// The transient node.
        id: NodeId,
    },

    /// Graph view or translation failure.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// System file or solution file failure.
    #[error(transparent)]
    Io(#[from] IoError),

    /// External solver failure.
    #[error(transparent)]
    Solver(#[from] SolverError),
}
