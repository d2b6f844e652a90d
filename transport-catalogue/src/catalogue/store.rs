//! The catalogue store: stop and bus registries plus derived statistics.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::trace;

use super::distance::DistanceTable;
use crate::domain::{Bus, BusId, BusStats, CatalogueError, Coordinates, RouteKind, Stop, StopId};

/// Registry of stops, buses and road distances.
///
/// Records are append-only: once added they are never removed or changed,
/// so the handles returned by [`add_stop`](Self::add_stop) and
/// [`add_bus`](Self::add_bus) stay valid for the lifetime of the catalogue.
///
/// Population must follow the load protocol: all stops, then all distances,
/// then all buses. Statistics and routing assume the catalogue is complete.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_ids: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_ids: HashMap<String, BusId>,
    distances: DistanceTable,
    /// Names of the buses serving each stop, indexed by `StopId`.
    buses_for_stop: Vec<BTreeSet<String>>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    pub fn add_stop(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<StopId, CatalogueError> {
        let name = name.into();
        if self.stop_ids.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId::from_index(self.stops.len());
        self.stop_ids.insert(name.clone(), id);
        self.stops.push(Stop {
            id,
            name,
            coordinates,
        });
        self.buses_for_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Register a bus route.
    ///
    /// Circular routes must be declared closed (at least two entries, first
    /// stop == last stop); the closing stop is dropped from the stored
    /// sequence.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        kind: RouteKind,
        stop_names: &[S],
    ) -> Result<BusId, CatalogueError> {
        let name = name.into();
        if self.bus_ids.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        let (Some(first), Some(last)) = (stop_names.first(), stop_names.last()) else {
            return Err(CatalogueError::EmptyRoute(name));
        };
        // A closed loop needs a distinct closing entry, so `["A"]` is not one.
        if kind == RouteKind::Circular
            && (stop_names.len() < 2 || first.as_ref() != last.as_ref())
        {
            return Err(CatalogueError::MalformedCircularRoute(name));
        }

        let mut stops = self.resolve_stop_names(stop_names)?;
        if kind == RouteKind::Circular {
            stops.pop();
        }

        let id = BusId::from_index(self.buses.len());
        for stop in &stops {
            self.buses_for_stop[stop.index()].insert(name.clone());
        }
        trace!(bus = %name, stops = stops.len(), ?kind, "added bus");
        self.bus_ids.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            kind,
            stops,
        });
        Ok(id)
    }

    fn resolve_stop_names<S: AsRef<str>>(
        &self,
        stop_names: &[S],
    ) -> Result<Vec<StopId>, CatalogueError> {
        stop_names
            .iter()
            .map(|name| {
                self.stop_id(name.as_ref())
                    .ok_or_else(|| CatalogueError::UnknownStop(name.as_ref().to_string()))
            })
            .collect()
    }

    /// Record the measured road distance from `from` to `to`.
    ///
    /// Does not set the reverse direction.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), CatalogueError> {
        let from_id = self
            .stop_id(from)
            .ok_or_else(|| CatalogueError::UnknownStop(from.to_string()))?;
        let to_id = self
            .stop_id(to)
            .ok_or_else(|| CatalogueError::UnknownStop(to.to_string()))?;

        if !self.distances.insert(from_id, to_id, meters) {
            return Err(CatalogueError::DuplicateDistance {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    /// Statistics for a bus, or `None` if no such bus exists.
    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        let bus = self.find_bus(name)?;
        let stops: Vec<&Stop> = bus.stops.iter().map(|&id| self.stop(id)).collect();

        let unique_stop_count = bus.stops.iter().collect::<HashSet<_>>().len();

        let (route_length, geodesic_length) = match bus.kind {
            RouteKind::Linear => {
                let mut road = 0.0;
                let mut geodesic = 0.0;
                for pair in stops.windows(2) {
                    road += self.distances.resolve(pair[0], pair[1]);
                    road += self.distances.resolve(pair[1], pair[0]);
                    geodesic += pair[0].geodesic_distance(pair[1]);
                }
                (road, geodesic * 2.0)
            }
            RouteKind::Circular => {
                let mut road = 0.0;
                let mut geodesic = 0.0;
                let closing = stops.first().copied();
                let cycle: Vec<&Stop> = stops.iter().copied().chain(closing).collect();
                for pair in cycle.windows(2) {
                    road += self.distances.resolve(pair[0], pair[1]);
                    geodesic += pair[0].geodesic_distance(pair[1]);
                }
                (road, geodesic)
            }
        };

        Some(BusStats {
            stop_count: bus.stop_count(),
            unique_stop_count,
            route_length,
            geodesic_length,
        })
    }

    /// Names of the buses serving a stop, or `None` if no such stop exists.
    ///
    /// A known stop that no bus serves yields an empty set.
    pub fn stop_info(&self, name: &str) -> Option<&BTreeSet<String>> {
        let id = self.stop_id(name)?;
        Some(&self.buses_for_stop[id.index()])
    }

    /// Road distance between two registered stops in metres.
    pub fn resolve_distance(&self, from: StopId, to: StopId) -> f64 {
        self.distances.resolve(self.stop(from), self.stop(to))
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_ids.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_ids.get(name).copied()
    }

    /// The stop behind a handle issued by this catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// The bus behind a handle issued by this catalogue.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_id(name).map(|id| self.bus(id))
    }

    /// All stops in insertion order.
    pub fn stops(&self) -> impl ExactSizeIterator<Item = &Stop> {
        self.stops.iter()
    }

    /// All buses in insertion order.
    pub fn buses(&self) -> impl ExactSizeIterator<Item = &Bus> {
        self.buses.iter()
    }

    /// All measured distances ordered by `(from, to)` handle.
    pub fn distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> {
        self.distances.iter()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }
}
