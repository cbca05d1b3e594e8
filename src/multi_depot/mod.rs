//! Customer partitioning for the multi-depot variant.
//!
//! Customers are split into as many contiguous groups as there are
//! depots, in index order, with the remainder spread over the early
//! groups. Group *i* is served from depot *i*; each group forms an
//! independent single-depot sub-instance with no shared capacity pool.
//!
//! Index-order chunking ignores geographic proximity to the depots; it is
//! the baseline contract of this engine, with proximity-based assignment
//! a candidate future refinement.

use std::ops::Range;

/// Splits `num_customers` into `num_depots` contiguous index ranges.
///
/// The first `num_customers % num_depots` ranges get one extra customer,
/// so sizes differ by at most one and sum to `num_customers`. Depots
/// beyond the customer count receive empty ranges. Returns an empty list
/// when `num_depots` is zero.
///
/// # Examples
///
/// ```
/// use cvrp_core::multi_depot::partition;
///
/// let chunks = partition(7, 3);
/// assert_eq!(chunks, vec![0..3, 3..5, 5..7]);
/// ```
pub fn partition(num_customers: usize, num_depots: usize) -> Vec<Range<usize>> {
    if num_depots == 0 {
        return Vec::new();
    }

    let base = num_customers / num_depots;
    let remainder = num_customers % num_depots;

    let mut chunks = Vec::with_capacity(num_depots);
    let mut start = 0;
    for depot in 0..num_depots {
        let len = base + usize::from(depot < remainder);
        chunks.push(start..start + len);
        start += len;
    }
    chunks
}
