//! Stop records.

use super::{Coordinates, StopId};

/// A named stop. Immutable once registered in a catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinates: Coordinates,
}

impl Stop {
    /// Great-circle distance between two stops in metres.
    pub fn geodesic_distance(&self, other: &Stop) -> f64 {
        self.coordinates.distance_to(&other.coordinates)
    }
}
