//! Construction of the route graph from a finished catalogue.
//!
//! Every stop gets two vertices: an *arrival* vertex, where a passenger
//! stands after reaching the stop, and a *boarding* vertex, reached after
//! waiting for a bus. A wait edge joins the two. Ride edges run from the
//! boarding vertex of one stop to the arrival vertex of another, one edge
//! per span of stops a single bus covers without a transfer. A journey is
//! therefore an alternation `wait -> ride -> wait -> ride ...`.

use tracing::debug;

use super::graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
use super::settings::RouterSettings;
use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, BusId, RouteKind, StopId};

/// What a route graph edge means in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEdge {
    /// Waiting for a bus at `stop`.
    Wait { stop: StopId },
    /// Riding `bus` from `from` to `to` across `span_count` stops.
    Ride {
        bus: BusId,
        from: StopId,
        to: StopId,
        span_count: usize,
    },
}

/// The immutable route graph plus the meaning of each of its edges.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    graph: DirectedWeightedGraph<f64>,
    /// Parallel to the graph's edge list.
    edges: Vec<RouteEdge>,
}

impl RouteGraph {
    /// Build the graph for every stop and bus in `catalogue`.
    ///
    /// Buses are processed in lexicographic name order, which fixes the
    /// order of parallel ride edges and so the choice among equal-time
    /// routes.
    pub fn build(catalogue: &TransportCatalogue, settings: &RouterSettings) -> Self {
        let mut builder = Self {
            graph: DirectedWeightedGraph::with_vertex_count(catalogue.stop_count() * 2),
            edges: Vec::new(),
        };

        for stop in catalogue.stops() {
            builder.push(
                Edge {
                    from: arrival_vertex(stop.id),
                    to: boarding_vertex(stop.id),
                    weight: settings.bus_wait_time,
                },
                RouteEdge::Wait { stop: stop.id },
            );
        }

        let mut buses: Vec<&Bus> = catalogue.buses().collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));
        for bus in buses {
            builder.add_bus(catalogue, settings, bus);
        }

        debug!(
            vertices = builder.graph.vertex_count(),
            edges = builder.graph.edge_count(),
            "built route graph"
        );
        builder
    }

    fn add_bus(&mut self, catalogue: &TransportCatalogue, settings: &RouterSettings, bus: &Bus) {
        match bus.kind {
            RouteKind::Linear => {
                let n = bus.stops.len();
                self.add_spans(catalogue, settings, bus.id, &bus.stops, n, n - 1);
                let backward: Vec<StopId> = bus.stops.iter().rev().copied().collect();
                self.add_spans(catalogue, settings, bus.id, &backward, n, n - 1);
            }
            RouteKind::Circular => {
                // Two laps of the loop, so a ride may pass the first stop once.
                let n = bus.stops.len();
                let laps: Vec<StopId> = bus.stops.iter().cycle().take(2 * n).copied().collect();
                self.add_spans(catalogue, settings, bus.id, &laps, n, n);
            }
        }
    }

    /// Add a ride edge for every span of `sequence` that starts among the
    /// first `starts` positions and covers at most `max_span` stops.
    fn add_spans(
        &mut self,
        catalogue: &TransportCatalogue,
        settings: &RouterSettings,
        bus: BusId,
        sequence: &[StopId],
        starts: usize,
        max_span: usize,
    ) {
        // prefix[k] is the road distance from sequence[0] to sequence[k].
        let mut prefix = Vec::with_capacity(sequence.len());
        prefix.push(0.0);
        for pair in sequence.windows(2) {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + catalogue.resolve_distance(pair[0], pair[1]));
        }

        for i in 0..starts {
            let last = (i + max_span).min(sequence.len() - 1);
            for j in (i + 1)..=last {
                let (from, to) = (sequence[i], sequence[j]);
                if from == to {
                    continue;
                }
                self.push(
                    Edge {
                        from: boarding_vertex(from),
                        to: arrival_vertex(to),
                        weight: settings.travel_time(prefix[j] - prefix[i]),
                    },
                    RouteEdge::Ride {
                        bus,
                        from,
                        to,
                        span_count: j - i,
                    },
                );
            }
        }
    }

    fn push(&mut self, edge: Edge<f64>, meaning: RouteEdge) {
        self.graph.add_edge(edge);
        self.edges.push(meaning);
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<f64> {
        &self.graph
    }

    /// What the graph edge `id` stands for.
    pub fn route_edge(&self, id: EdgeId) -> RouteEdge {
        self.edges[id.index()]
    }
}

/// Vertex where a passenger arrives at `stop`, before waiting for a bus.
pub fn arrival_vertex(stop: StopId) -> VertexId {
    VertexId(stop.index() as u32 * 2)
}

/// Vertex where a passenger is ready to board at `stop`.
pub fn boarding_vertex(stop: StopId) -> VertexId {
    VertexId(stop.index() as u32 * 2 + 1)
}
