//! Error types for the absorb-graph crate.

use crate::NodeId;

/// Error type for all fallible operations in the absorb-graph crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Returned when an original node ID is not part of a translator's domain.
    #[error("unknown node id {id}")]
    UnknownNode {
        /// The node ID that could not be translated.
        id: NodeId,
    },

    /// Returned when a dense index is outside a translator's range.
    #[error("unknown dense index {index} (translator covers {len} nodes)")]
    UnknownIndex {
        /// The dense index that could not be translated.
        index: NodeId,
        /// Number of nodes covered by the translator.
        len: usize,
    },

    /// Returned when a weight is requested for an edge that does not exist.
    #[error("edge ({from},{to}) does not exist")]
    MissingEdge {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
    },

    /// Returned when an edge weight is zero or negative.
    #[error("edge ({from},{to}) has non-positive weight ({weight})")]
    NonPositiveWeight {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
        /// The offending weight.
        weight: f64,
    },

    /// Returned when an edge weight is infinite.
    #[error("edge ({from},{to}) has infinite weight ({weight})")]
    InfiniteWeight {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
        /// The offending weight.
        weight: f64,
    },

    /// Returned when an edge weight is NaN.
    #[error("edge ({from},{to}) has NaN weight")]
    NanWeight {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
    },

    /// Returned when a caller-supplied weight source fails.
    #[error("weight source failed for edge ({from},{to}): {reason}")]
    WeightSource {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
        /// Description of the underlying failure.
        reason: String,
    },
}

impl GraphError {
    /// Returns the edge an edge-level error refers to, if any.
    pub fn edge(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Self::MissingEdge { from, to }
            | Self::NonPositiveWeight { from, to, .. }
            | Self::InfiniteWeight { from, to, .. }
            | Self::NanWeight { from, to }
            | Self::WeightSource { from, to, .. } => Some((from, to)),
            Self::UnknownNode { .. } | Self::UnknownIndex { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_node() {
        let e = GraphError::UnknownNode { id: 42 };
        assert_eq!(e.to_string(), "unknown node id 42");
    }

    #[test]
    fn error_unknown_index() {
        let e = GraphError::UnknownIndex { index: 7, len: 3 };
        assert_eq!(
            e.to_string(),
            "unknown dense index 7 (translator covers 3 nodes)"
        );
    }

    #[test]
    fn error_missing_edge() {
        let e = GraphError::MissingEdge { from: 1, to: 2 };
        assert_eq!(e.to_string(), "edge (1,2) does not exist");
    }

    #[test]
    fn error_non_positive_weight() {
        let e = GraphError::NonPositiveWeight {
            from: 3,
            to: 4,
            weight: -0.5,
        };
        assert_eq!(e.to_string(), "edge (3,4) has non-positive weight (-0.5)");
    }

    #[test]
    fn error_infinite_weight() {
        let e = GraphError::InfiniteWeight {
            from: 3,
            to: 4,
            weight: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "edge (3,4) has infinite weight (inf)");
    }

    #[test]
    fn error_nan_weight() {
        let e = GraphError::NanWeight { from: 5, to: 6 };
        assert_eq!(e.to_string(), "edge (5,6) has NaN weight");
    }

    #[test]
    fn error_weight_source() {
        let e = GraphError::WeightSource {
            from: 1,
            to: 9,
            reason: "lookup failed".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "weight source failed for edge (1,9): lookup failed"
        );
    }

    #[test]
    fn edge_accessor() {
        assert_eq!(GraphError::NanWeight { from: 5, to: 6 }.edge(), Some((5, 6)));
        assert_eq!(GraphError::UnknownNode { id: 1 }.edge(), None);
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GraphError>();
    }
}
