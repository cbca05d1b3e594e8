//! Vehicle type with a capacity ceiling.

/// A vehicle that services one route in a routing problem.
///
/// The fleet is homogeneous: every vehicle carries the same capacity.
///
/// # Examples
///
/// ```
/// use cvrp_core::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.depot_id(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    depot_id: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity, departing depot 0.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            depot_id: 0,
        }
    }

    /// Sets the depot for this vehicle.
    pub fn with_depot(mut self, depot_id: usize) -> Self {
        self.depot_id = depot_id;
        self
    }

    /// Vehicle ordinal within the fleet.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Depot location ID (start and end of the route).
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }
}
