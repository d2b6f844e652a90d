//! Routing configuration.

use serde::{Deserialize, Serialize};

/// Error returned for routing settings that cannot produce a valid graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("bus velocity must be a positive number of km/h, got {0}")]
    InvalidVelocity(f64),

    #[error("bus wait time must be a non-negative number of minutes, got {0}")]
    InvalidWaitTime(f64),
}

/// Parameters of the route graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Bus speed in km/h.
    pub bus_velocity: f64,

    /// Time spent waiting for any bus at a stop, in minutes.
    pub bus_wait_time: f64,
}

impl RouterSettings {
    /// Create validated settings.
    pub fn new(bus_velocity: f64, bus_wait_time: f64) -> Result<Self, SettingsError> {
        let settings = Self {
            bus_velocity,
            bus_wait_time,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that velocity is positive and wait time non-negative.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.bus_velocity.is_finite() && self.bus_velocity > 0.0) {
            return Err(SettingsError::InvalidVelocity(self.bus_velocity));
        }
        if !(self.bus_wait_time.is_finite() && self.bus_wait_time >= 0.0) {
            return Err(SettingsError::InvalidWaitTime(self.bus_wait_time));
        }
        Ok(())
    }

    /// Bus speed converted to metres per minute.
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }

    /// Minutes needed to ride `meters`.
    pub fn travel_time(&self, meters: f64) -> f64 {
        meters / self.meters_per_minute()
    }
}
