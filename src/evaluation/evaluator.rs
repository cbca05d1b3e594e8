//! Route evaluator that computes load traces, distance, and feasibility.

use super::CapacityTracker;
use crate::distance::DistanceMatrix;
use crate::models::{Customer, Route, Solution, Vehicle, Violation, ViolationType, Visit};

/// Evaluates routes by computing per-visit cumulative load and total
/// distance, and checking the capacity constraint.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::{Customer, Vehicle};
/// use cvrp_core::distance::DistanceMatrix;
/// use cvrp_core::evaluation::RouteEvaluator;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 0.0, 10),
///     Customer::new(2, 6.0, 0.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let vehicle = Vehicle::new(0, 100);
///
/// let evaluator = RouteEvaluator::new(&customers, &dm, &vehicle);
/// let (route, violations) = evaluator.build_route(&[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert!(violations.is_empty());
/// assert!((route.total_distance() - 12.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    customers: &'a [Customer],
    distances: &'a DistanceMatrix,
    vehicle: &'a Vehicle,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(
        customers: &'a [Customer],
        distances: &'a DistanceMatrix,
        vehicle: &'a Vehicle,
    ) -> Self {
        Self {
            customers,
            distances,
            vehicle,
        }
    }

    /// Builds a route from a sequence of customer IDs, computing the load
    /// trace and total distance including the depot return.
    ///
    /// Returns the constructed route and any capacity violation found.
    pub fn build_route(&self, customer_ids: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(self.vehicle.id());
        let mut violations = Vec::new();
        let tracker = CapacityTracker::for_vehicle(self.vehicle);
        let depot_id = self.vehicle.depot_id();
        let mut load: i32 = 0;
        let mut total_distance = 0.0;
        let mut prev = depot_id;

        for &cid in customer_ids {
            total_distance += self.distances.get(prev, cid);
            let demand = self.customers[cid].demand();

            if violations.is_empty() && !tracker.can_extend(load, demand) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: 0,
                    load: tracker.extend(load, demand),
                    capacity: tracker.capacity(),
                }));
            }
            load = tracker.extend(load, demand);

            route.push_visit(Visit {
                customer_id: cid,
                load_after: load,
            });
            prev = cid;
        }

        total_distance += self.distances.get(prev, depot_id);
        route.set_total_distance(total_distance);

        (route, violations)
    }

    /// Evaluates an entire solution, returning the total distance and all
    /// capacity violations with their route indices filled in.
    pub fn evaluate_solution(&self, solution: &Solution) -> (f64, Vec<Violation>) {
        let mut total_distance = 0.0;
        let mut all_violations = Vec::new();

        for (idx, route) in solution.routes().iter().enumerate() {
            let customer_ids = route.customer_ids();
            let (rebuilt, mut violations) = self.build_route(&customer_ids);

            for v in &mut violations {
                let ViolationType::CapacityExceeded { route_index, .. } = &mut v.kind;
                *route_index = idx;
            }

            total_distance += rebuilt.total_distance();
            all_violations.append(&mut violations);
        }

        (total_distance, all_violations)
    }
}
