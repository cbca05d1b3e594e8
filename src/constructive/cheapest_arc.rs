//! Cheapest-feasible-arc constructive heuristic.
//!
//! # Algorithm
//!
//! Starting from a route's depot, repeatedly connect the route's end node
//! to the unassigned customer with the cheapest connecting arc among those
//! that still fit the vehicle's remaining capacity. When no unassigned
//! customer fits, the route closes with a depot return and the next
//! vehicle starts. Ties on arc cost resolve to the lowest customer index,
//! so construction is fully deterministic.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::distance::DistanceMatrix;
use crate::evaluation::{CapacityTracker, RouteEvaluator};
use crate::models::{Customer, Route, Solution, Vehicle};

/// Constructs a CVRP solution by cheapest-feasible-arc path extension.
///
/// Every vehicle gets a route, in fleet order; routes left without any
/// feasible candidate stay empty rather than being dropped, so the
/// solution always carries one route per vehicle. Customers that no
/// vehicle could take are recorded as unassigned (in ascending index
/// order) — the caller decides whether that makes the instance
/// infeasible.
///
/// # Arguments
///
/// * `customers` — All locations (index 0 = depot)
/// * `distances` — Distance matrix
/// * `vehicles` — Available vehicles (homogeneous fleet)
///
/// # Examples
///
/// ```
/// use cvrp_core::models::{Customer, Vehicle};
/// use cvrp_core::distance::DistanceMatrix;
/// use cvrp_core::constructive::cheapest_arc;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 10),
///     Customer::new(2, 2.0, 0.0, 10),
///     Customer::new(3, 3.0, 0.0, 10),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let vehicles = vec![Vehicle::new(0, 30)];
///
/// let solution = cheapest_arc(&customers, &dm, &vehicles);
/// assert_eq!(solution.routes()[0].customer_ids(), vec![1, 2, 3]);
/// assert_eq!(solution.num_unassigned(), 0);
/// ```
pub fn cheapest_arc(
    customers: &[Customer],
    distances: &DistanceMatrix,
    vehicles: &[Vehicle],
) -> Solution {
    let n = customers.len();
    let mut solution = Solution::new();

    if n == 0 {
        for vehicle in vehicles {
            solution.add_route(Route::new(vehicle.id()));
        }
        return solution;
    }

    let mut visited = vec![false; n];
    visited[0] = true; // depot

    for vehicle in vehicles {
        let evaluator = RouteEvaluator::new(customers, distances, vehicle);
        let tracker = CapacityTracker::for_vehicle(vehicle);
        let mut current = vehicle.depot_id();
        let mut load: i32 = 0;
        let mut stops = Vec::new();

        loop {
            // Unassigned customers that still fit, in ascending index
            // order so the nearest-neighbor tie-break is deterministic.
            let candidates: Vec<usize> = (1..n)
                .filter(|&i| !visited[i] && tracker.can_extend(load, customers[i].demand()))
                .collect();

            match distances.nearest_neighbor(current, &candidates) {
                Some(next) => {
                    visited[next] = true;
                    load = tracker.extend(load, customers[next].demand());
                    stops.push(next);
                    current = next;
                }
                None => break,
            }
        }

        let (route, _) = evaluator.build_route(&stops);
        solution.add_route(route);
    }

    for (i, &seen) in visited.iter().enumerate().skip(1) {
        if !seen {
            solution.add_unassigned(i);
        }
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_customers() -> (Vec<Customer>, DistanceMatrix) {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 10),
            Customer::new(2, 2.0, 0.0, 10),
            Customer::new(3, 3.0, 0.0, 10),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        (customers, dm)
    }

    #[test]
    fn test_all_on_one_route() {
        let (customers, dm) = line_customers();
        let vehicles = vec![Vehicle::new(0, 100)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.num_unassigned(), 0);
        // Nearest each time: 1, 2, 3
        assert_eq!(sol.routes()[0].customer_ids(), vec![1, 2, 3]);
        // 0→1 + 1→2 + 2→3 + 3→0 = 1 + 1 + 1 + 3 = 6
        assert!((sol.routes()[0].total_distance() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_split_routes_on_capacity() {
        let (customers, dm) = line_customers();
        let vehicles = vec![Vehicle::new(0, 20), Vehicle::new(1, 20)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        // Capacity 20: first route takes 1, 2 (load 20), second takes 3.
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].customer_ids(), vec![1, 2]);
        assert_eq!(sol.routes()[1].customer_ids(), vec![3]);
        assert_eq!(sol.num_unassigned(), 0);
    }

    #[test]
    fn test_fleet_exhausted_marks_unassigned() {
        let (customers, dm) = line_customers();
        let vehicles = vec![Vehicle::new(0, 15)]; // fits one customer
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].customer_ids(), vec![1]);
        assert_eq!(sol.unassigned(), &[2, 3]);
    }

    #[test]
    fn test_oversized_demand_is_unassigned_not_panic() {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 150),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 100), Vehicle::new(1, 100)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.unassigned(), &[1]);
    }

    #[test]
    fn test_zero_customers_keeps_empty_routes() {
        let customers = vec![Customer::depot(0.0, 0.0)];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 100), Vehicle::new(1, 100)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.num_routes(), 2);
        assert!(sol.routes().iter().all(|r| r.is_empty()));
        assert_eq!(sol.total_distance(), 0.0);
        assert_eq!(sol.num_unassigned(), 0);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        // Customers 1 and 2 are both Manhattan 10 from the depot.
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 10.0, 0.0, 5),
            Customer::new(2, 0.0, 10.0, 5),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 100)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.routes()[0].customer_ids()[0], 1);
    }

    #[test]
    fn test_skips_infeasible_nearest() {
        // The nearest customer overflows capacity; the further one fits.
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 1.0, 0.0, 80),
            Customer::new(2, 5.0, 0.0, 20),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 50)];
        let sol = cheapest_arc(&customers, &dm, &vehicles);
        assert_eq!(sol.routes()[0].customer_ids(), vec![2]);
        assert_eq!(sol.unassigned(), &[1]);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let (customers, dm) = line_customers();
        let vehicles = vec![Vehicle::new(0, 20), Vehicle::new(1, 20)];
        let a = cheapest_arc(&customers, &dm, &vehicles);
        let b = cheapest_arc(&customers, &dm, &vehicles);
        let ids = |s: &Solution| -> Vec<Vec<usize>> {
            s.routes().iter().map(|r| r.customer_ids()).collect()
        };
        assert_eq!(ids(&a), ids(&b));
    }
}
