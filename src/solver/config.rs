//! Solver configuration.

use crate::local_search::SearchConfig;

/// Configuration for a solve: fleet size and improvement-search settings.
///
/// # Defaults
///
/// Five vehicles per depot and a five-second search budget, matching the
/// service this engine was built for.
///
/// ```
/// use cvrp_core::solver::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.num_vehicles, 5);
/// assert_eq!(config.search.time_limit_ms, Some(5_000));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use cvrp_core::solver::SolverConfig;
/// use cvrp_core::local_search::SearchConfig;
///
/// let config = SolverConfig::default()
///     .with_num_vehicles(3)
///     .with_search(SearchConfig::default().with_time_limit_ms(500));
/// assert_eq!(config.num_vehicles, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of vehicles in the fleet (per depot in multi-depot mode).
    pub num_vehicles: usize,
    /// Improvement-search settings.
    pub search: SearchConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_vehicles: 5,
            search: SearchConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Sets the fleet size.
    pub fn with_num_vehicles(mut self, n: usize) -> Self {
        self.num_vehicles = n;
        self
    }

    /// Sets the improvement-search configuration.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_vehicles == 0 {
            return Err("fleet must contain at least one vehicle".into());
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.num_vehicles, 5);
        assert_eq!(config.search.time_limit_ms, Some(5_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::default()
            .with_num_vehicles(2)
            .with_search(SearchConfig::default().without_time_limit());
        assert_eq!(config.num_vehicles, 2);
        assert!(config.search.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_vehicles() {
        let config = SolverConfig::default().with_num_vehicles(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = SolverConfig::default().with_search(SearchConfig {
            time_limit_ms: Some(0),
        });
        assert!(config.validate().is_err());
    }
}
