//! Inter-route customer relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each customer from its current route to the best insertion
//! position in another route. The best strictly improving move per pass is
//! applied; a move is only considered when the receiving route can absorb
//! the customer's demand without exceeding capacity.
//!
//! # Complexity
//!
//! O(n² × R) per pass where n = customers per route, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::Deadline;
use crate::distance::DistanceMatrix;
use crate::evaluation::CapacityTracker;
use crate::models::Customer;

/// A relocate move: move one customer from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate improvement to route sequences in place.
///
/// Moves customers between routes (including into empty routes) while the
/// best move still strictly reduces total distance and the receiving route
/// stays within capacity. Returns `true` if any move was applied.
pub fn relocate_improve(
    routes: &mut [Vec<usize>],
    depot: usize,
    customers: &[Customer],
    distances: &DistanceMatrix,
    tracker: CapacityTracker,
    deadline: &Deadline,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any_improved = false;
    let mut improved = true;

    while improved && !deadline.expired() {
        improved = false;

        if let Some(mv) = find_best_relocate(routes, depot, customers, distances, tracker, deadline)
        {
            let customer_id = routes[mv.from_route].remove(mv.from_pos);
            routes[mv.to_route].insert(mv.to_pos, customer_id);
            improved = true;
            any_improved = true;
        }
    }

    any_improved
}

/// Finds the best strictly improving, capacity-feasible relocate move.
fn find_best_relocate(
    routes: &[Vec<usize>],
    depot: usize,
    customers: &[Customer],
    distances: &DistanceMatrix,
    tracker: CapacityTracker,
    deadline: &Deadline,
) -> Option<RelocateMove> {
    let mut best: Option<RelocateMove> = None;

    for from_r in 0..routes.len() {
        for from_pos in 0..routes[from_r].len() {
            let cid = routes[from_r][from_pos];
            let demand = customers[cid].demand();
            let removal_delta = removal_cost(&routes[from_r], from_pos, depot, distances);

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }

                let to_load: i32 = to_route.iter().map(|&c| customers[c].demand()).sum();
                if !tracker.can_extend(to_load, demand) {
                    continue;
                }

                for to_pos in 0..=to_route.len() {
                    if deadline.expired() {
                        return best;
                    }

                    let insertion_delta = insertion_cost(to_route, to_pos, cid, depot, distances);
                    let delta = removal_delta + insertion_delta;

                    if delta < -1e-10 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Cost change from removing the customer at `pos` from a route.
fn removal_cost(route: &[usize], pos: usize, depot: usize, distances: &DistanceMatrix) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    let cid = route[pos];

    // Old: prev → cid → next
    // New: prev → next
    distances.get(prev, next) - distances.get(prev, cid) - distances.get(cid, next)
}

/// Cost change from inserting `customer_id` at `pos` in a route.
fn insertion_cost(
    route: &[usize],
    pos: usize,
    customer_id: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };

    // Old: prev → next
    // New: prev → customer_id → next
    distances.get(prev, customer_id) + distances.get(customer_id, next) - distances.get(prev, next)
}
