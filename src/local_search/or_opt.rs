//! Intra-route Or-opt improvement.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive customers to a
//! different position within the same route. For each segment length and
//! start position, the removal gain and reinsertion cost are computed for
//! every non-overlapping target position; the best strictly improving
//! move per pass is applied. Segments stay on the same route, so capacity
//! feasibility is preserved by construction.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::Deadline;
use crate::distance::DistanceMatrix;

/// Applies Or-opt improvement to a single route in place.
///
/// Tries relocating segments of 1, 2, and 3 customers to better positions
/// within the route. Returns `true` if any improving move was applied.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::Customer;
/// use cvrp_core::distance::DistanceMatrix;
/// use cvrp_core::local_search::{or_opt_improve, route_distance, Deadline};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 10),
///     Customer::new(2, 2.0, 0.0, 10),
///     Customer::new(3, 3.0, 0.0, 10),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
///
/// let mut route = vec![2, 3, 1];
/// let before = route_distance(&route, 0, &dm);
/// or_opt_improve(&mut route, 0, &dm, &Deadline::unbounded());
/// assert!(route_distance(&route, 0, &dm) <= before + 1e-10);
/// ```
pub fn or_opt_improve(
    route: &mut Vec<usize>,
    depot: usize,
    distances: &DistanceMatrix,
    deadline: &Deadline,
) -> bool {
    if route.len() < 2 {
        return false;
    }

    let mut any_improved = false;
    let mut improved = true;

    while improved && !deadline.expired() {
        improved = false;

        for seg_len in 1..=3.min(route.len()) {
            if apply_best_segment_move(route, depot, distances, seg_len, deadline) {
                improved = true;
                any_improved = true;
            }
        }
    }

    any_improved
}

/// Finds and applies the best relocation of one `seg_len`-customer segment.
///
/// Insertion positions are expressed in the original route's coordinates;
/// `to == route.len()` means after the last customer. Returns `true` if a
/// strictly improving move was applied.
fn apply_best_segment_move(
    route: &mut Vec<usize>,
    depot: usize,
    distances: &DistanceMatrix,
    seg_len: usize,
    deadline: &Deadline,
) -> bool {
    let n = route.len();
    if n < seg_len + 1 {
        return false;
    }

    let mut best_delta = -1e-10;
    let mut best: Option<(usize, usize)> = None;

    for from in 0..=(n - seg_len) {
        let prev = if from == 0 { depot } else { route[from - 1] };
        let after = if from + seg_len >= n {
            depot
        } else {
            route[from + seg_len]
        };
        let seg_first = route[from];
        let seg_last = route[from + seg_len - 1];

        // Old edges: prev→seg_first + seg_last→after
        // After removal: prev→after
        let removal_gain = distances.get(prev, seg_first) + distances.get(seg_last, after)
            - distances.get(prev, after);

        for to in 0..=n {
            if deadline.expired() {
                break;
            }
            // Skip positions inside (or adjacent to) the segment itself.
            if to >= from && to <= from + seg_len {
                continue;
            }

            let (ins_prev, ins_next) = if to < from {
                let p = if to == 0 { depot } else { route[to - 1] };
                (p, route[to])
            } else {
                let nx = if to == n { depot } else { route[to] };
                (route[to - 1], nx)
            };

            let insertion_cost = distances.get(ins_prev, seg_first)
                + distances.get(seg_last, ins_next)
                - distances.get(ins_prev, ins_next);

            let delta = insertion_cost - removal_gain;
            if delta < best_delta {
                best_delta = delta;
                best = Some((from, to));
            }
        }
    }

    match best {
        Some((from, to)) => {
            let segment: Vec<usize> = route.drain(from..from + seg_len).collect();
            let insert_pos = if to > from { to - seg_len } else { to };
            for (i, &cid) in segment.iter().enumerate() {
                route.insert(insert_pos + i, cid);
            }
            true
        }
        None => false,
    }
}
