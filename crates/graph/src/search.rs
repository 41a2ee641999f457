//! Binary-search helpers over sorted, duplicate-free ID slices.

use crate::NodeId;

/// Position of the first element `>= x` (the insertion point for `x`).
pub(crate) fn lower_bound(sorted: &[NodeId], x: NodeId) -> usize {
    sorted.partition_point(|&v| v < x)
}

/// Returns whether `x` is present, together with its insertion point.
pub(crate) fn find(sorted: &[NodeId], x: NodeId) -> (bool, usize) {
    let p = lower_bound(sorted, x);
    (p < sorted.len() && sorted[p] == x, p)
}
