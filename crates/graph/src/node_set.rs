//! Ordered sets of node identifiers.

use std::fmt;
use std::ops::Range;

use roaring::RoaringBitmap;

use crate::NodeId;

/// An ordered set of 32-bit node identifiers.
///
/// Backed by a compressed bitmap, so membership, cardinality and rank queries
/// stay cheap for large, sparse ID domains. Sets are mostly built once and
/// then read; set algebra returns new sets.
#[derive(Clone, Default, PartialEq)]
pub struct NodeSet {
    bits: RoaringBitmap,
}

impl NodeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the dense set `[0, n)`.
    pub fn dense(n: u32) -> Self {
        Self::from_range(0..n)
    }

    /// Creates the set containing every ID in `range`.
    pub fn from_range(range: Range<NodeId>) -> Self {
        let mut bits = RoaringBitmap::new();
        bits.insert_range(range);
        Self { bits }
    }

    /// Returns `true` if `id` is a member of the set.
    pub fn contains(&self, id: NodeId) -> bool {
        self.bits.contains(id)
    }

    /// Number of members.
    pub fn len(&self) -> u64 {
        self.bits.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of members less than or equal to `id`.
    pub fn rank(&self, id: NodeId) -> u64 {
        self.bits.rank(id)
    }

    /// Returns the `n`-th smallest member (zero-based), if any.
    pub fn select(&self, n: u32) -> Option<NodeId> {
        self.bits.select(n)
    }

    /// Smallest member, if any.
    pub fn min(&self) -> Option<NodeId> {
        self.bits.min()
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bits.iter()
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &NodeSet) -> NodeSet {
        Self {
            bits: &self.bits - &other.bits,
        }
    }

    /// Members present in both `self` and `other`.
    pub fn intersection(&self, other: &NodeSet) -> NodeSet {
        Self {
            bits: &self.bits & &other.bits,
        }
    }

    /// Returns `true` if every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &NodeSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// Returns `true` if the set is exactly `[0, len)`.
    pub fn is_dense(&self) -> bool {
        match self.bits.max() {
            None => true,
            Some(max) => u64::from(max) + 1 == self.bits.len(),
        }
    }

    /// Collects the members into an ascending vector.
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.bits.iter().collect()
    }

    /// Adds `id`, returning `true` if it was not present.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.bits.insert(id)
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[NodeId; N]> for NodeSet {
    fn from(ids: [NodeId; N]) -> Self {
        ids.into_iter().collect()
    }
}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bits.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_and_cardinality() {
        let s = NodeSet::from([7, 2, 9, 2]);
        assert_eq!(s.len(), 3);
        assert!(s.contains(2));
        assert!(s.contains(9));
        assert!(!s.contains(3));
        assert!(!s.is_empty());
        assert!(NodeSet::new().is_empty());
    }

    #[test]
    fn rank_counts_members_at_or_below() {
        let s = NodeSet::from([2, 5, 9]);
        assert_eq!(s.rank(1), 0);
        assert_eq!(s.rank(2), 1);
        assert_eq!(s.rank(4), 1);
        assert_eq!(s.rank(9), 3);
        assert_eq!(s.rank(u32::MAX), 3);
    }

    #[test]
    fn iterates_ascending() {
        let s = NodeSet::from([30, 10, 20]);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(s.select(1), Some(20));
        assert_eq!(s.select(3), None);
        assert_eq!(s.min(), Some(10));
    }

    #[test]
    fn set_algebra() {
        let a = NodeSet::from([1, 2, 3, 4]);
        let b = NodeSet::from([2, 4, 6]);
        assert_eq!(a.difference(&b).to_vec(), vec![1, 3]);
        assert_eq!(a.intersection(&b).to_vec(), vec![2, 4]);
        assert!(NodeSet::from([2, 4]).is_subset(&a));
        assert!(!b.is_subset(&a));
    }

    #[test]
    fn dense_detection() {
        assert!(NodeSet::dense(4).is_dense());
        assert!(NodeSet::new().is_dense());
        assert!(!NodeSet::from([0, 1, 3]).is_dense());
        assert!(!NodeSet::from([1, 2]).is_dense());
        assert_eq!(NodeSet::dense(3).to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn debug_lists_members() {
        assert_eq!(format!("{:?}", NodeSet::from([3, 1])), "{1, 3}");
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let built: NodeSet = [9, 1, 4].into_iter().collect();
        assert_eq!(built, NodeSet::from([1, 4, 9]));
        assert_ne!(built, NodeSet::from([1, 4]));
    }
}
