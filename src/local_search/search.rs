//! Time-budgeted improvement driver.
//!
//! Alternates 2-opt, Or-opt, and Relocate passes over the construction
//! solution until no operator finds an improving move (local optimum) or
//! the wall-clock budget expires. Budget expiry is a normal outcome: the
//! best feasible solution found so far is returned and flagged in
//! [`SearchStats`].

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{or_opt_improve, relocate_improve, two_opt_improve, Deadline};
use crate::distance::DistanceMatrix;
use crate::evaluation::{CapacityTracker, RouteEvaluator};
use crate::models::{Customer, Solution, Vehicle};

/// Configuration for the improvement search.
///
/// # Defaults
///
/// ```
/// use cvrp_core::local_search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.time_limit_ms, Some(5_000));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cvrp_core::local_search::SearchConfig;
///
/// let config = SearchConfig::default().with_time_limit_ms(250);
/// assert_eq!(config.time_limit_ms, Some(250));
///
/// let unbounded = SearchConfig::default().without_time_limit();
/// assert!(unbounded.time_limit_ms.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Wall-clock time limit in milliseconds.
    ///
    /// The search stops within a bounded margin of this limit, returning
    /// the best solution found so far. `None` runs to a local optimum
    /// with no time bound.
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: Some(5_000),
        }
    }
}

impl SearchConfig {
    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Removes the time limit; the search runs to a local optimum.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

/// Statistics from one improvement run.
///
/// For multi-depot solves the per-depot stats are folded together with
/// [`SearchStats::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of full operator passes executed.
    pub passes: usize,
    /// Objective value of the construction solution.
    pub initial_distance: f64,
    /// Objective value after improvement (never above `initial_distance`).
    pub final_distance: f64,
    /// Wall-clock time spent searching, in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the time budget expired before reaching a local optimum.
    pub timed_out: bool,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl SearchStats {
    /// Folds another run's stats into this one.
    ///
    /// Passes and distances add up; elapsed time takes the maximum since
    /// independent sub-solves run concurrently.
    pub fn merge(&mut self, other: &SearchStats) {
        self.passes += other.passes;
        self.initial_distance += other.initial_distance;
        self.final_distance += other.final_distance;
        self.elapsed_ms = self.elapsed_ms.max(other.elapsed_ms);
        self.timed_out |= other.timed_out;
        self.cancelled |= other.cancelled;
    }
}

/// Improves a feasible solution within the configured time budget.
///
/// See [`improve_with_cancel`] for the full contract.
pub fn improve(
    solution: &Solution,
    customers: &[Customer],
    distances: &DistanceMatrix,
    vehicles: &[Vehicle],
    config: &SearchConfig,
) -> (Solution, SearchStats) {
    improve_with_cancel(solution, customers, distances, vehicles, config, None)
}

/// Improves a feasible solution, with an optional cancellation flag.
///
/// Runs 2-opt and Or-opt over each route and Relocate across routes until
/// a full pass finds no improving move or the deadline expires. Every
/// accepted move strictly reduces total distance and keeps every affected
/// route within capacity, so the returned solution is feasible and its
/// objective never exceeds the input's. Route count and vehicle
/// assignment are preserved (routes may become empty, never dropped).
///
/// If `cancel` is `Some` and the flag is set, the search stops at the
/// next deadline check and returns the best solution found so far.
pub fn improve_with_cancel(
    solution: &Solution,
    customers: &[Customer],
    distances: &DistanceMatrix,
    vehicles: &[Vehicle],
    config: &SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> (Solution, SearchStats) {
    let mut deadline = Deadline::new(config.time_limit_ms);
    if let Some(flag) = cancel {
        deadline = deadline.with_cancel(flag);
    }

    let initial_distance = solution.total_distance();

    if vehicles.is_empty() || solution.num_routes() == 0 {
        let stats = SearchStats {
            passes: 0,
            initial_distance,
            final_distance: initial_distance,
            elapsed_ms: deadline.elapsed().as_millis() as u64,
            timed_out: false,
            cancelled: deadline.is_cancelled(),
        };
        return (solution.clone(), stats);
    }

    debug_assert_eq!(solution.num_routes(), vehicles.len());

    let depot = vehicles[0].depot_id();
    let tracker = CapacityTracker::for_vehicle(&vehicles[0]);
    let mut routes: Vec<Vec<usize>> = solution.routes().iter().map(|r| r.customer_ids()).collect();

    let mut passes = 0usize;
    let mut improved = true;

    while improved && !deadline.expired() {
        improved = false;
        passes += 1;

        for route in routes.iter_mut() {
            if deadline.expired() {
                break;
            }
            improved |= two_opt_improve(route, depot, distances, &deadline);
            improved |= or_opt_improve(route, depot, distances, &deadline);
        }

        if !deadline.expired() {
            improved |= relocate_improve(
                &mut routes,
                depot,
                customers,
                distances,
                tracker,
                &deadline,
            );
        }
    }

    let mut result = Solution::new();
    for (idx, stops) in routes.iter().enumerate() {
        let evaluator = RouteEvaluator::new(customers, distances, &vehicles[idx]);
        let (route, _) = evaluator.build_route(stops);
        result.add_route(route);
    }
    for &unassigned in solution.unassigned() {
        result.add_unassigned(unassigned);
    }

    let final_distance = result.total_distance();
    let stats = SearchStats {
        passes,
        initial_distance,
        final_distance,
        elapsed_ms: deadline.elapsed().as_millis() as u64,
        timed_out: deadline.time_expired(),
        cancelled: deadline.is_cancelled(),
    };

    (result, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::cheapest_arc;

    fn square_problem() -> (Vec<Customer>, DistanceMatrix, Vec<Vehicle>) {
        let customers = vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 0.0, 5.0, 10),
            Customer::new(2, 5.0, 5.0, 10),
            Customer::new(3, 5.0, 0.0, 10),
        ];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 100)];
        (customers, dm, vehicles)
    }

    #[test]
    fn test_improve_never_worsens() {
        let (customers, dm, vehicles) = square_problem();
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let (improved, stats) = improve(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default(),
        );
        assert!(improved.total_distance() <= initial.total_distance() + 1e-10);
        assert!(stats.final_distance <= stats.initial_distance + 1e-10);
        assert!((stats.initial_distance - initial.total_distance()).abs() < 1e-10);
        assert!((stats.final_distance - improved.total_distance()).abs() < 1e-10);
    }

    #[test]
    fn test_improve_reaches_local_optimum() {
        let (customers, dm, vehicles) = square_problem();
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let (improved, stats) = improve(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default().without_time_limit(),
        );
        assert!(!stats.timed_out);
        assert!(stats.passes >= 1);
        // Square tour optimum is 20 regardless of direction.
        assert!((improved.total_distance() - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_improve_preserves_route_count_and_coverage() {
        let (customers, dm, _) = square_problem();
        let vehicles = vec![Vehicle::new(0, 20), Vehicle::new(1, 20)];
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let (improved, _) = improve(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default(),
        );
        assert_eq!(improved.num_routes(), 2);
        let mut served: Vec<usize> = improved
            .routes()
            .iter()
            .flat_map(|r| r.customer_ids())
            .collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3]);
    }

    #[test]
    fn test_improve_respects_capacity() {
        let (customers, dm, _) = square_problem();
        let vehicles = vec![Vehicle::new(0, 20), Vehicle::new(1, 20)];
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let (improved, _) = improve(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default(),
        );
        for route in improved.routes() {
            assert!(route.total_load() <= 20);
        }
    }

    #[test]
    fn test_improve_zero_budget_returns_initial() {
        let (customers, dm, vehicles) = square_problem();
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        // validate() rejects 0, but the driver must still be safe with it.
        let config = SearchConfig {
            time_limit_ms: Some(0),
        };
        let (improved, stats) = improve(&initial, &customers, &dm, &vehicles, &config);
        assert!(stats.timed_out);
        assert!((improved.total_distance() - initial.total_distance()).abs() < 1e-10);
    }

    #[test]
    fn test_improve_cancelled_up_front() {
        let (customers, dm, vehicles) = square_problem();
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let flag = Arc::new(AtomicBool::new(true));
        let (improved, stats) = improve_with_cancel(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default().without_time_limit(),
            Some(Arc::clone(&flag)),
        );
        assert!(stats.cancelled);
        assert!(!stats.timed_out);
        assert!((improved.total_distance() - initial.total_distance()).abs() < 1e-10);
    }

    #[test]
    fn test_improve_empty_solution() {
        let customers = vec![Customer::depot(0.0, 0.0)];
        let dm = DistanceMatrix::from_customers(&customers);
        let vehicles = vec![Vehicle::new(0, 10)];
        let initial = cheapest_arc(&customers, &dm, &vehicles);
        let (improved, stats) = improve(
            &initial,
            &customers,
            &dm,
            &vehicles,
            &SearchConfig::default(),
        );
        assert_eq!(improved.num_routes(), 1);
        assert_eq!(improved.total_distance(), 0.0);
        assert_eq!(stats.final_distance, 0.0);
    }

    #[test]
    fn test_config_validate() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::default()
            .without_time_limit()
            .validate()
            .is_ok());
        let zero = SearchConfig {
            time_limit_ms: Some(0),
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_stats_merge() {
        let mut a = SearchStats {
            passes: 2,
            initial_distance: 10.0,
            final_distance: 8.0,
            elapsed_ms: 30,
            timed_out: false,
            cancelled: false,
        };
        let b = SearchStats {
            passes: 3,
            initial_distance: 5.0,
            final_distance: 5.0,
            elapsed_ms: 50,
            timed_out: true,
            cancelled: false,
        };
        a.merge(&b);
        assert_eq!(a.passes, 5);
        assert!((a.initial_distance - 15.0).abs() < 1e-10);
        assert!((a.final_distance - 13.0).abs() < 1e-10);
        assert_eq!(a.elapsed_ms, 50);
        assert!(a.timed_out);
        assert!(!a.cancelled);
    }
}
