//! Numerically stable summation.

/// Sums `summands` by pairwise (tree) reduction.
///
/// The second half of the list is folded onto the first half, element by
/// element, carrying the middle element of odd-length lists unchanged; this
/// repeats until a single value remains. Rounding error grows with the depth
/// of the tree (`O(log n)`) rather than the length of the list, which matters
/// for high-degree nodes.
///
/// The slice is used as scratch space and is overwritten. Returns `0.0` for
/// an empty slice.
pub fn pairwise_sum(summands: &mut [f64]) -> f64 {
    let mut len = summands.len();
    if len == 0 {
        return 0.0;
    }
    while len > 1 {
        let half = len / 2;
        let keep = half + len % 2;
        let (head, tail) = summands[..len].split_at_mut(keep);
        for (a, b) in head.iter_mut().zip(tail.iter()) {
            *a += *b;
        }
        len = keep;
    }
    summands[0]
}
