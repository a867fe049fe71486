//! Routing configuration.

use serde::{Deserialize, Serialize};

use super::RouterError;

/// Meters per kilometer divided by minutes per hour.
const KMH_TO_METERS_PER_MINUTE: f64 = 1000.0 / 60.0;

/// Parameters for turning road distances into travel times.
///
/// Both values apply uniformly across the whole network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting for a bus at any stop (minutes).
    pub bus_wait_time: u32,

    /// Bus speed (km/h).
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings with the given wait time and speed.
    pub fn new(bus_wait_time: u32, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Check the settings can be used to build a graph.
    pub fn validate(&self) -> Result<(), RouterError> {
        if !self.bus_velocity.is_finite() {
            return Err(RouterError::InvalidSettings("bus velocity must be finite"));
        }
        if self.bus_velocity <= 0.0 {
            return Err(RouterError::InvalidSettings("bus velocity must be positive"));
        }
        Ok(())
    }

    /// Returns the wait time in minutes.
    pub fn wait_minutes(&self) -> f64 {
        f64::from(self.bus_wait_time)
    }

    /// Returns the bus speed in meters per minute.
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * KMH_TO_METERS_PER_MINUTE
    }

    /// Minutes needed to ride `meters`.
    pub fn ride_minutes(&self, meters: u64) -> f64 {
        meters as f64 / self.meters_per_minute()
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6,
            bus_velocity: 40.0,
        }
    }
}
