//! Lookups over a solved system: absorption probabilities and majority
//! assignments, both keyed by original node IDs.

use std::collections::BTreeMap;

use absorb_graph::{IdTranslator, NodeId};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::ChainError;

/// Absorption probabilities of every transient node into every absorbing
/// node.
///
/// Rows are indexed by absorbing node and columns by transient node, both in
/// ascending ID order. Row sums are left as the solver produced them.
#[derive(Debug, Clone)]
pub struct AbsorptionProbabilities {
    matrix: Vec<Vec<f64>>,
    transient: IdTranslator,
    absorbing: IdTranslator,
}

impl AbsorptionProbabilities {
    /// Wraps a solution matrix and the translators of its system.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::SolutionShape`] unless `matrix` has one row per
    /// absorbing node and one column per transient node.
    pub fn new(
        matrix: Vec<Vec<f64>>,
        transient: IdTranslator,
        absorbing: IdTranslator,
    ) -> Result<Self, ChainError> {
        let expected_rows = absorbing.len();
        let expected_cols = transient.len();
        let bad_row = matrix.iter().find(|row| row.len() != expected_cols);
        if matrix.len() != expected_rows || bad_row.is_some() {
            return Err(ChainError::SolutionShape {
                rows: matrix.len(),
                cols: bad_row.map_or(expected_cols, Vec::len),
                expected_rows,
                expected_cols,
            });
        }
        Ok(Self {
            matrix,
            transient,
            absorbing,
        })
    }

    /// Probability that a walk from transient node `from` is absorbed at
    /// `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Graph`] if `to` is not absorbing or `from` is not
    /// transient.
    pub fn probability(&self, from: NodeId, to: NodeId) -> Result<f64, ChainError> {
        let a = self.absorbing.to_new(to)?;
        let t = self.transient.to_new(from)?;
        Ok(self.matrix[a as usize][t as usize])
    }

    /// Assigns every transient node to its most probable absorbing node.
    ///
    /// Absorbing nodes are scanned in a fresh random order per transient node
    /// and only a strictly greater probability replaces the current pick, so
    /// exact ties resolve uniformly at random. Pass a seeded generator for
    /// reproducible ties.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NoMajority`] if every probability of a node is
    /// below `-1` or NaN.
    pub fn majority_assignments<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Assignments, ChainError> {
        let mut order: Vec<usize> = (0..self.matrix.len()).collect();
        let mut assignments = BTreeMap::new();
        for (t, &from) in self.transient.old_ids().iter().enumerate() {
            order.shuffle(rng);
            let mut best: Option<usize> = None;
            let mut best_weight = -1.0;
            for &a in &order {
                let w = self.matrix[a][t];
                if w > best_weight {
                    best = Some(a);
                    best_weight = w;
                }
            }
            let a = best.ok_or(ChainError::NoMajority { id: from })?;
            assignments.insert(from, self.absorbing.old_ids()[a]);
        }
        debug!(assigned = assignments.len(), "majority assignments computed");
        Ok(Assignments { map: assignments })
    }

    // --- Accessors ---

    /// Raw solution rows, one per absorbing node.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Dense index over transient nodes (columns).
    pub fn transient(&self) -> &IdTranslator {
        &self.transient
    }

    /// Dense index over absorbing nodes (rows).
    pub fn absorbing(&self) -> &IdTranslator {
        &self.absorbing
    }

    /// Returns `true` if the chain had no transient nodes.
    pub fn is_empty(&self) -> bool {
        self.transient.is_empty()
    }
}

/// Majority absorbing node of every transient node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    map: BTreeMap<NodeId, NodeId>,
}

impl Assignments {
    /// Absorbing node assigned to `from`, or `None` if `from` is not a
    /// transient node.
    pub fn get(&self, from: NodeId) -> Option<NodeId> {
        self.map.get(&from).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// `(from, to)` pairs in ascending `from` order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.map.iter().map(|(&from, &to)| (from, to))
    }
}
