//! Absorption probabilities of absorbing Markov chains.
//!
//! A chain is a weighted directed graph plus a set of absorbing nodes; every
//! other node is transient. For each transient node this crate computes the
//! probability of ending in each absorbing node, by writing the linear system
//! `(Q - I) x = -R` to a binary file, handing it to an external solver and
//! decoding the solver's output.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────┐     ┌──────────────────┐
//!  │  validate    │────▶│  encode        │────▶│  solve       │────▶│  project         │
//!  │  (structure) │     │  (Ab.petsc)    │     │  (external)  │     │  (probabilities) │
//!  └──────────────┘     └────────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use absorb_graph::AdjacencyGraph;
//! use absorb_markov::{AbsorbingChain, ChainError, PipelineConfig};
//!
//! // 2 -> {0, 3}, 3 -> {1, 2}; nodes 0 and 1 absorb.
//! let graph = AdjacencyGraph::from_edges([
//!     (2, 0, 1.0),
//!     (2, 3, 1.0),
//!     (3, 1, 1.0),
//!     (3, 2, 1.0),
//! ]);
//! let chain = AbsorbingChain::new(graph, [0, 1].into());
//! let validated = chain.validate()?;
//! assert_eq!(validated.transient().to_vec(), vec![2, 3]);
//!
//! assert!(PipelineConfig::new().validate().is_ok());
//! # Ok::<(), ChainError>(())
//! ```

pub mod chain;
pub mod config;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod projector;

pub use chain::{AbsorbingChain, ValidatedChain};
pub use config::{DEFAULT_INPUT_NAME, DEFAULT_OUTPUT_NAME, PipelineConfig};
pub use encode::{LinearSystem, encode_system};
pub use error::ChainError;
pub use pipeline::absorption_probabilities;
pub use projector::{AbsorptionProbabilities, Assignments};
