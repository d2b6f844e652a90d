//! Directional road distances between stops.
//!
//! Road distances are measured per ordered pair and may differ by direction
//! (one-way streets, detours). A lookup falls back to the reverse direction
//! and finally to the great-circle distance when nothing was measured.

use std::collections::HashMap;

use crate::domain::{Stop, StopId};

/// Table of measured road distances keyed by ordered stop pair.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(StopId, StopId), u32>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the distance from `from` to `to`.
    ///
    /// Returns `false` without touching the table if the ordered pair
    /// already has a value. The reverse pair is never implied.
    pub fn insert(&mut self, from: StopId, to: StopId, meters: u32) -> bool {
        if self.entries.contains_key(&(from, to)) {
            return false;
        }
        self.entries.insert((from, to), meters);
        true
    }

    /// The measured distance for exactly this direction, if any.
    pub fn get(&self, from: StopId, to: StopId) -> Option<u32> {
        self.entries.get(&(from, to)).copied()
    }

    /// Road distance from `from` to `to` in metres.
    ///
    /// Tries the exact direction, then the reverse direction, then the
    /// great-circle distance between the two stops.
    pub fn resolve(&self, from: &Stop, to: &Stop) -> f64 {
        self.get(from.id, to.id)
            .or_else(|| self.get(to.id, from.id))
            .map(f64::from)
            .unwrap_or_else(|| from.geodesic_distance(to))
    }

    /// All measured entries ordered by `(from, to)` handle.
    pub fn iter(&self) -> impl Iterator<Item = (StopId, StopId, u32)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
            .collect();
        entries.sort_unstable_by_key(|&(from, to, _)| (from, to));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinates;
    use proptest::prelude::*;

    fn stop(id: u32, lat: f64, lng: f64) -> Stop {
        Stop {
            id: StopId(id),
            name: format!("S{id}"),
            coordinates: Coordinates::new(lat, lng),
        }
    }

    proptest! {
        /// Forward lookup returns the stored value, reverse lookup returns
        /// the reverse entry if present, else the forward one
        #[test]
        fn resolution_order(
            d in 0u32..1_000_000,
            reverse in proptest::option::of(0u32..1_000_000),
            lat in -80.0f64..80.0,
            lng in -170.0f64..170.0,
        ) {
            let a = stop(0, lat, lng);
            let b = stop(1, lat + 0.5, lng + 0.5);
            let mut table = DistanceTable::new();
            table.insert(a.id, b.id, d);
            if let Some(r) = reverse {
                table.insert(b.id, a.id, r);
            }

            prop_assert_eq!(table.resolve(&a, &b), f64::from(d));
            prop_assert_eq!(table.resolve(&b, &a), f64::from(reverse.unwrap_or(d)));
        }
    }
}
