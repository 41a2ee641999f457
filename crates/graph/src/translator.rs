//! Dense renumbering of sparse node-ID subsets.

use crate::NodeId;
use crate::error::GraphError;
use crate::node_set::NodeSet;
use crate::search;

/// A bijection between a set of original node IDs and the dense range
/// `[0, k)`, ordered by ascending original ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdTranslator {
    new_to_old: Vec<NodeId>,
}

impl IdTranslator {
    /// Builds the translator for `set`.
    pub fn new(set: &NodeSet) -> Self {
        Self {
            new_to_old: set.to_vec(),
        }
    }

    /// Translates an original ID to its dense index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `old` is not in the domain.
    pub fn to_new(&self, old: NodeId) -> Result<NodeId, GraphError> {
        match search::find(&self.new_to_old, old) {
            (true, p) => Ok(p as NodeId),
            (false, _) => Err(GraphError::UnknownNode { id: old }),
        }
    }

    /// Translates a dense index back to its original ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownIndex`] if `new` is not below [`len`](Self::len).
    pub fn to_old(&self, new: NodeId) -> Result<NodeId, GraphError> {
        self.new_to_old
            .get(new as usize)
            .copied()
            .ok_or(GraphError::UnknownIndex {
                index: new,
                len: self.new_to_old.len(),
            })
    }

    /// Number of translated nodes (`k`).
    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    /// Returns `true` if the translator covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }

    /// Original IDs in dense-index order.
    pub fn old_ids(&self) -> &[NodeId] {
        &self.new_to_old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_both_ways() {
        let t = IdTranslator::new(&NodeSet::from([10, 3, 42]));
        assert_eq!(t.len(), 3);
        assert_eq!(t.to_new(3), Ok(0));
        assert_eq!(t.to_new(10), Ok(1));
        assert_eq!(t.to_new(42), Ok(2));
        assert_eq!(t.to_old(0), Ok(3));
        assert_eq!(t.to_old(2), Ok(42));
        assert_eq!(t.old_ids(), &[3, 10, 42]);
    }

    #[test]
    fn unknown_old_id() {
        let t = IdTranslator::new(&NodeSet::from([10, 3, 42]));
        assert_eq!(t.to_new(11), Err(GraphError::UnknownNode { id: 11 }));
        assert_eq!(t.to_new(100), Err(GraphError::UnknownNode { id: 100 }));
    }

    #[test]
    fn out_of_range_index() {
        let t = IdTranslator::new(&NodeSet::from([10, 3, 42]));
        assert_eq!(
            t.to_old(3),
            Err(GraphError::UnknownIndex { index: 3, len: 3 })
        );
    }

    #[test]
    fn empty_translator() {
        let t = IdTranslator::new(&NodeSet::new());
        assert!(t.is_empty());
        assert!(t.to_new(0).is_err());
        assert!(t.to_old(0).is_err());
    }
}
