//! Immutable problem instance.

use super::{Customer, SolveError, Vehicle};
use crate::distance::DistanceMatrix;

/// An immutable CVRP instance: depot, customers, fleet size, and capacity.
///
/// Constructed per solve and discarded afterwards; no instance state is
/// shared across solves. The depot occupies internal index 0 and customers
/// occupy 1..=n, so callers' 0-based customer indices map to internal
/// indices by adding one. The Manhattan distance matrix is computed once
/// at construction.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::ProblemInstance;
///
/// let instance = ProblemInstance::new(
///     [0.0, 0.0],
///     &[[5.0, 0.0], [0.0, 3.0]],
///     &[10, 20],
///     100,
///     2,
/// )
/// .unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.demand(1), 10);
/// assert!((instance.distance(0, 2) - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    capacity: i32,
    num_vehicles: usize,
}

impl ProblemInstance {
    /// Builds and validates an instance from caller-facing data.
    ///
    /// Rejects mismatched location/demand lengths, non-positive capacity,
    /// negative demands, a zero-vehicle fleet, and non-finite coordinates.
    pub fn new(
        depot: [f64; 2],
        locations: &[[f64; 2]],
        demands: &[i32],
        capacity: i32,
        num_vehicles: usize,
    ) -> Result<Self, SolveError> {
        if locations.len() != demands.len() {
            return Err(SolveError::InvalidInstance(format!(
                "{} customer locations but {} demands",
                locations.len(),
                demands.len()
            )));
        }
        if capacity <= 0 {
            return Err(SolveError::InvalidInstance(format!(
                "vehicle capacity must be positive, got {capacity}"
            )));
        }
        if num_vehicles == 0 {
            return Err(SolveError::InvalidInstance(
                "fleet must contain at least one vehicle".into(),
            ));
        }
        if !depot[0].is_finite() || !depot[1].is_finite() {
            return Err(SolveError::InvalidInstance(
                "depot coordinates must be finite".into(),
            ));
        }
        for (i, loc) in locations.iter().enumerate() {
            if !loc[0].is_finite() || !loc[1].is_finite() {
                return Err(SolveError::InvalidInstance(format!(
                    "non-finite coordinates for customer {i}"
                )));
            }
        }
        for (i, &demand) in demands.iter().enumerate() {
            if demand < 0 {
                return Err(SolveError::InvalidInstance(format!(
                    "negative demand {demand} for customer {i}"
                )));
            }
        }

        let mut customers = Vec::with_capacity(locations.len() + 1);
        customers.push(Customer::depot(depot[0], depot[1]));
        for (i, loc) in locations.iter().enumerate() {
            customers.push(Customer::new(i + 1, loc[0], loc[1], demands[i]));
        }
        let distances = DistanceMatrix::from_customers(&customers);

        Ok(Self {
            customers,
            distances,
            capacity,
            num_vehicles,
        })
    }

    /// Returns all locations (index 0 = depot, 1..=n = customers).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len() - 1
    }

    /// Demand at the given location index.
    pub fn demand(&self, location: usize) -> i32 {
        self.customers[location].demand()
    }

    /// Travel distance between two location indices.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The shared vehicle capacity ceiling.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Builds the homogeneous fleet for this instance.
    pub fn fleet(&self) -> Vec<Vehicle> {
        (0..self.num_vehicles)
            .map(|id| Vehicle::new(id, self.capacity))
            .collect()
    }
}
