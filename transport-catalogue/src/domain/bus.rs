//! Bus route records and derived statistics.

use serde::{Deserialize, Serialize};

use super::{BusId, StopId};

/// Shape of a bus route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    /// Out-and-back: `S0 -> .. -> Sn-1 -> .. -> S0`.
    Linear,
    /// Loop: `S0 -> .. -> Sn-1 -> S0`.
    Circular,
}

impl RouteKind {
    /// Map the `is_roundtrip` flag used by request documents.
    pub fn from_roundtrip(is_roundtrip: bool) -> Self {
        if is_roundtrip {
            RouteKind::Circular
        } else {
            RouteKind::Linear
        }
    }

    pub fn is_roundtrip(self) -> bool {
        self == RouteKind::Circular
    }
}

/// A named bus route.
///
/// `stops` is the canonical sequence: for circular routes the closing stop
/// is not stored, for linear routes only the outbound direction is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub kind: RouteKind,
    pub stops: Vec<StopId>,
}

impl Bus {
    /// Every stop visited by one full run of the route, in order.
    ///
    /// ```
    /// # use transport_catalogue::catalogue::TransportCatalogue;
    /// # use transport_catalogue::domain::{Coordinates, RouteKind};
    /// let mut catalogue = TransportCatalogue::new();
    /// let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
    /// let b = catalogue.add_stop("B", Coordinates::new(0.0, 1.0)).unwrap();
    /// let id = catalogue.add_bus("1", RouteKind::Linear, &["A", "B"]).unwrap();
    /// let bus = catalogue.bus(id);
    /// assert_eq!(bus.traversal().collect::<Vec<_>>(), vec![a, b, a]);
    /// ```
    pub fn traversal(&self) -> impl Iterator<Item = StopId> + '_ {
        let tail: Box<dyn Iterator<Item = StopId> + '_> = match self.kind {
            RouteKind::Linear => Box::new(self.stops.iter().rev().skip(1).copied()),
            RouteKind::Circular => Box::new(self.stops.first().copied().into_iter()),
        };
        self.stops.iter().copied().chain(tail)
    }

    /// Number of stops on one full run, counting revisits.
    pub fn stop_count(&self) -> usize {
        match self.kind {
            RouteKind::Linear => self.stops.len() * 2 - 1,
            RouteKind::Circular => self.stops.len() + 1,
        }
    }

    /// The stop list as it was declared: circular routes regain their
    /// closing stop.
    pub fn declared_stops(&self) -> Vec<StopId> {
        let mut stops = self.stops.clone();
        if self.kind == RouteKind::Circular
            && let Some(&first) = self.stops.first()
        {
            stops.push(first);
        }
        stops
    }
}

/// Statistics for a single bus route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length of one full run in metres.
    pub route_length: f64,
    /// Great-circle length of one full run in metres.
    pub geodesic_length: f64,
}

impl BusStats {
    /// Ratio of road length to great-circle length.
    ///
    /// A route whose stops all share one location has no geodesic length;
    /// its curvature is reported as 1.0.
    pub fn curvature(&self) -> f64 {
        if self.geodesic_length == 0.0 {
            1.0
        } else {
            self.route_length / self.geodesic_length
        }
    }
}
