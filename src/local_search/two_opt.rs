//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a route, compute the change in
//! distance from reversing the segment `[i..=j]`:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//! ```
//!
//! If delta < 0, reverse the segment and keep scanning (first-improvement
//! strategy) until a full pass finds nothing or the deadline expires.
//! Reversal leaves the route's customer set unchanged, so capacity
//! feasibility is preserved by construction.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::Deadline;
use crate::distance::DistanceMatrix;

/// Applies 2-opt improvement to a single route in place.
///
/// The route holds customer IDs only; it is assumed to start and end at
/// `depot`. Returns `true` if any improving move was applied.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::Customer;
/// use cvrp_core::distance::DistanceMatrix;
/// use cvrp_core::local_search::{route_distance, two_opt_improve, Deadline};
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 5.0, 10),
///     Customer::new(2, 5.0, 5.0, 10),
///     Customer::new(3, 5.0, 0.0, 10),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
///
/// // Visiting the corners out of order crosses the square.
/// let mut route = vec![1, 3, 2];
/// let improved = two_opt_improve(&mut route, 0, &dm, &Deadline::unbounded());
/// assert!(improved);
/// assert!((route_distance(&route, 0, &dm) - 20.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(
    route: &mut [usize],
    depot: usize,
    distances: &DistanceMatrix,
    deadline: &Deadline,
) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }

    let mut any_improved = false;
    let mut improved = true;

    while improved && !deadline.expired() {
        improved = false;

        'scan: for i in 0..n - 1 {
            for j in i + 1..n {
                if deadline.expired() {
                    break 'scan;
                }
                if two_opt_delta(route, depot, distances, i, j) < -1e-10 {
                    route[i..=j].reverse();
                    improved = true;
                    any_improved = true;
                }
            }
        }
    }

    any_improved
}

/// Distance change from reversing the segment `[i..=j]`.
///
/// Before: `prev_i → r[i] → ... → r[j] → next_j`
/// After:  `prev_i → r[j] → ... → r[i] → next_j`
fn two_opt_delta(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
) -> f64 {
    let n = route.len();
    let prev_i = if i == 0 { depot } else { route[i - 1] };
    let next_j = if j == n - 1 { depot } else { route[j + 1] };

    let old_cost = distances.get(prev_i, route[i]) + distances.get(route[j], next_j);
    let new_cost = distances.get(prev_i, route[j]) + distances.get(route[i], next_j);

    new_cost - old_cost
}

/// Total distance of a route: `depot → route[0] → ... → route[n-1] → depot`.
pub fn route_distance(route: &[usize], depot: usize, distances: &DistanceMatrix) -> f64 {
    if route.is_empty() {
        return 0.0;
    }
    let mut dist = distances.get(depot, route[0]);
    for w in route.windows(2) {
        dist += distances.get(w[0], w[1]);
    }
    dist += distances.get(route[route.len() - 1], depot);
    dist
}
