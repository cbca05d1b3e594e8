//! Route and visit types.

/// A single visit to a customer within a route.
///
/// Tracks the customer ID along with the cumulative load after the visit,
/// so capacity feasibility is observable at every position of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Customer ID being visited.
    pub customer_id: usize,
    /// Cumulative load after this visit.
    pub load_after: i32,
}

/// An ordered sequence of customer visits assigned to a single vehicle.
///
/// A route starts and ends at the vehicle's depot (not stored in `visits`).
/// The load trace starts at zero on depot departure and is monotonically
/// non-decreasing until the return.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit {
///     customer_id: 1,
///     load_after: 10,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.total_load(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<Visit>,
    total_distance: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
            total_distance: 0.0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of customer visits (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route has no customer visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the customer IDs in visit order.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.customer_id).collect()
    }

    /// Total distance of this route including the depot return (set by evaluator).
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Load carried when the vehicle returns to the depot.
    pub fn total_load(&self) -> i32 {
        self.visits.last().map_or(0, |v| v.load_after)
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }
}
