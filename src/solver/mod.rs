//! Solver entry points and result extraction.
//!
//! The two functions the transport collaborator calls are
//! [`solve_single_depot`] and [`solve_multi_depot`] (plus `_with`
//! variants taking a [`SolverConfig`]). Inputs are plain values, outputs
//! are `serde`-ready structures; request parsing and response encoding
//! stay outside this crate.
//!
//! Each call builds its own [`ProblemInstance`](crate::models::ProblemInstance),
//! runs cheapest-arc construction and the time-budgeted improvement
//! search, and discards all intermediate state — no solver state persists
//! between calls. Multi-depot sub-instances are independent and solve
//! concurrently on the rayon pool.

mod config;

pub use config::SolverConfig;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constructive::cheapest_arc;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{improve, SearchConfig, SearchStats};
use crate::models::{ProblemInstance, Solution, SolveError};
use crate::multi_depot::partition;

/// One vehicle's planned route, in caller-facing indexing.
///
/// `stops` holds 0-based indices into the request's customer list, in
/// visit order, with the depot start omitted. The depot return is
/// reflected in `load` (units carried back) and `distance` (which
/// includes the return leg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Depot ordinal this route departs from (0 in single-depot mode).
    pub depot: usize,
    /// Vehicle ordinal within the depot's fleet.
    pub vehicle: usize,
    /// Customer indices in visit order.
    pub stops: Vec<usize>,
    /// Total load carried on this route.
    pub load: i32,
    /// Route distance including the depot return.
    pub distance: f64,
}

/// The outcome of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// One entry per vehicle (per vehicle per depot in multi-depot mode).
    pub routes: Vec<RoutePlan>,
    /// Sum of arc distances across all routes.
    pub total_distance: f64,
    /// Improvement-search statistics.
    pub search: SearchStats,
}

/// Solves a single-depot CVRP with the default configuration.
///
/// # Examples
///
/// ```
/// use cvrp_core::solver::solve_single_depot;
///
/// let result = solve_single_depot(
///     30,
///     [0.0, 0.0],
///     &[[5.0, 0.0], [10.0, 0.0], [15.0, 0.0]],
///     &[10, 10, 10],
/// )
/// .unwrap();
///
/// let active: Vec<_> = result.routes.iter().filter(|r| !r.stops.is_empty()).collect();
/// assert_eq!(active.len(), 1);
/// assert_eq!(active[0].stops, vec![0, 1, 2]);
/// assert!((result.total_distance - 30.0).abs() < 1e-10);
/// ```
pub fn solve_single_depot(
    capacity: i32,
    depot: [f64; 2],
    locations: &[[f64; 2]],
    demands: &[i32],
) -> Result<SolveResult, SolveError> {
    solve_single_depot_with(&SolverConfig::default(), capacity, depot, locations, demands)
}

/// Solves a single-depot CVRP with an explicit configuration.
pub fn solve_single_depot_with(
    config: &SolverConfig,
    capacity: i32,
    depot: [f64; 2],
    locations: &[[f64; 2]],
    demands: &[i32],
) -> Result<SolveResult, SolveError> {
    config.validate().map_err(SolveError::InvalidInstance)?;

    let instance = ProblemInstance::new(depot, locations, demands, capacity, config.num_vehicles)?;
    let (routes, total_distance, search) = solve_instance(&instance, &config.search, 0, 0)?;

    Ok(SolveResult {
        routes,
        total_distance,
        search,
    })
}

/// Solves a multi-depot CVRP with the default configuration.
///
/// Customers are split into contiguous index-order groups, one per depot
/// (see [`partition`]); each group solves as an independent single-depot
/// sub-instance and the per-depot routes are concatenated in depot order.
pub fn solve_multi_depot(
    capacity: i32,
    depots: &[[f64; 2]],
    locations: &[[f64; 2]],
    demands: &[i32],
) -> Result<SolveResult, SolveError> {
    solve_multi_depot_with(&SolverConfig::default(), capacity, depots, locations, demands)
}

/// Solves a multi-depot CVRP with an explicit configuration.
///
/// Sub-instances own disjoint customer slices and solve concurrently;
/// results are concatenated in depot order so output is deterministic.
/// If any depot's group is infeasible the whole solve reports
/// [`SolveError::Infeasible`] with every unrouted customer.
pub fn solve_multi_depot_with(
    config: &SolverConfig,
    capacity: i32,
    depots: &[[f64; 2]],
    locations: &[[f64; 2]],
    demands: &[i32],
) -> Result<SolveResult, SolveError> {
    config.validate().map_err(SolveError::InvalidInstance)?;

    if depots.is_empty() {
        return Err(SolveError::InvalidInstance(
            "at least one depot is required".into(),
        ));
    }
    if locations.len() != demands.len() {
        return Err(SolveError::InvalidInstance(format!(
            "{} customer locations but {} demands",
            locations.len(),
            demands.len()
        )));
    }

    let chunks = partition(locations.len(), depots.len());
    let outcomes: Vec<Result<(Vec<RoutePlan>, f64, SearchStats), SolveError>> = chunks
        .into_par_iter()
        .enumerate()
        .map(|(depot_ordinal, chunk)| {
            let instance = ProblemInstance::new(
                depots[depot_ordinal],
                &locations[chunk.clone()],
                &demands[chunk.clone()],
                capacity,
                config.num_vehicles,
            )?;
            solve_instance(&instance, &config.search, depot_ordinal, chunk.start)
        })
        .collect();

    let mut routes = Vec::new();
    let mut total_distance = 0.0;
    let mut search = SearchStats::default();
    let mut unassigned = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok((mut sub_routes, sub_distance, sub_stats)) => {
                routes.append(&mut sub_routes);
                total_distance += sub_distance;
                search.merge(&sub_stats);
            }
            Err(SolveError::Infeasible {
                unassigned: mut ids,
            }) => unassigned.append(&mut ids),
            Err(err) => return Err(err),
        }
    }

    if !unassigned.is_empty() {
        unassigned.sort_unstable();
        return Err(SolveError::Infeasible { unassigned });
    }

    Ok(SolveResult {
        routes,
        total_distance,
        search,
    })
}

/// Runs the construct-then-improve pipeline on one instance.
///
/// `index_offset` maps the instance's customer slice back to the caller's
/// global indexing (internal index 1 ↔ caller index `index_offset`).
fn solve_instance(
    instance: &ProblemInstance,
    search: &SearchConfig,
    depot_ordinal: usize,
    index_offset: usize,
) -> Result<(Vec<RoutePlan>, f64, SearchStats), SolveError> {
    let vehicles = instance.fleet();

    let initial = cheapest_arc(instance.customers(), instance.distances(), &vehicles);
    if initial.num_unassigned() > 0 {
        return Err(SolveError::Infeasible {
            unassigned: initial
                .unassigned()
                .iter()
                .map(|&internal| internal - 1 + index_offset)
                .collect(),
        });
    }

    let (improved, stats) = improve(
        &initial,
        instance.customers(),
        instance.distances(),
        &vehicles,
        search,
    );

    debug_assert!({
        let evaluator =
            RouteEvaluator::new(instance.customers(), instance.distances(), &vehicles[0]);
        evaluator.evaluate_solution(&improved).1.is_empty()
    });

    let total_distance = improved.total_distance();
    Ok((
        extract_routes(&improved, depot_ordinal, index_offset),
        total_distance,
        stats,
    ))
}

/// Converts internal routes to caller-facing [`RoutePlan`]s.
///
/// Internal customer indices shift down by one (the depot occupies index
/// 0) and up by `index_offset` for multi-depot slices.
fn extract_routes(solution: &Solution, depot_ordinal: usize, index_offset: usize) -> Vec<RoutePlan> {
    solution
        .routes()
        .iter()
        .map(|route| RoutePlan {
            depot: depot_ordinal,
            vehicle: route.vehicle_id(),
            stops: route
                .customer_ids()
                .iter()
                .map(|&internal| internal - 1 + index_offset)
                .collect(),
            load: route.total_load(),
            distance: route.total_distance(),
        })
        .collect()
}
