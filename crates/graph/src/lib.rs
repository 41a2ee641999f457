//! Node-ID sets, directed graph views and lazy graph transforms.
//!
//! Graphs are exposed through two capability traits, [`DirectedGraph`] and
//! [`WeightedGraph`], so any structure holding the caller's graph can be
//! plugged in. Transforms are small immutable views stacked on top of one
//! another and evaluated on demand.
//!
//! # Pipeline
//!
//! ```text
//!  caller graph ──▶ filter_nodes ──▶ with_self_loops ──▶ normalized_ids
//!       │
//!       └────────▶ checked_weights ──▶ normalized_weights
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use absorb_graph::{AdjacencyGraph, GraphExt, WeightedGraph};
//!
//! let g = AdjacencyGraph::from_edges([(1, 2, 1.0), (1, 3, 3.0)]);
//! let p = (&g).checked_weights().normalized_weights().unwrap();
//!
//! assert_eq!(p.weight(1, 3).unwrap(), 0.75);
//! ```

pub mod error;
pub mod graph;
pub mod node_set;
pub mod sum;
pub mod transform;
pub mod translator;
pub mod weights;

pub(crate) mod search;

/// Identifier of a graph node.
pub type NodeId = u32;

pub use error::GraphError;
pub use graph::{AdjacencyGraph, DirectedGraph, WeightedGraph, describe, describe_weighted};
pub use node_set::NodeSet;
pub use sum::pairwise_sum;
pub use transform::{FilterNodes, GraphExt, NormalizedIds, SelfLoops};
pub use translator::IdTranslator;
pub use weights::{CheckedWeights, NormalizedWeights, check_weight};
