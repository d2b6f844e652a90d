//! Route queries over a frozen catalogue.

use std::sync::Arc;

use tracing::trace;

use super::builder::{RouteEdge, RouteGraph, arrival_vertex};
use super::dijkstra::ShortestPaths;
use super::settings::RouterSettings;
use crate::catalogue::TransportCatalogue;

/// One step of a travel plan.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    /// Wait at `stop_name` for the next bus.
    Wait { stop_name: String, time: f64 },
    /// Ride `bus_name` for `span_count` stops.
    Ride {
        bus_name: String,
        span_count: usize,
        time: f64,
    },
}

impl RouteAction {
    /// Minutes spent on this step.
    pub fn time(&self) -> f64 {
        match self {
            RouteAction::Wait { time, .. } | RouteAction::Ride { time, .. } => *time,
        }
    }
}

/// The fastest plan between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Total travel time in minutes.
    pub total_time: f64,
    pub items: Vec<RouteAction>,
}

/// Answers travel-time queries for one catalogue.
///
/// Takes shared ownership of the catalogue, which freezes it: nothing can
/// mutate the stops and buses the graph was built from while a router exists.
#[derive(Debug)]
pub struct TransportRouter {
    catalogue: Arc<TransportCatalogue>,
    graph: RouteGraph,
}

impl TransportRouter {
    /// Build the route graph for `catalogue`.
    pub fn new(catalogue: Arc<TransportCatalogue>, settings: RouterSettings) -> Self {
        let graph = RouteGraph::build(&catalogue, &settings);
        Self { catalogue, graph }
    }

    /// Fastest plan from stop `from` to stop `to`.
    ///
    /// Returns `None` if either stop is unknown or `to` cannot be reached.
    pub fn calc_route(&self, from: &str, to: &str) -> Option<RouteResult> {
        let from_id = self.catalogue.stop_id(from)?;
        let to_id = self.catalogue.stop_id(to)?;

        let Some(path) = ShortestPaths::new(self.graph.graph())
            .route(arrival_vertex(from_id), arrival_vertex(to_id))
        else {
            trace!(from, to, "no route");
            return None;
        };

        let items = path
            .edges
            .iter()
            .map(|&edge_id| {
                let time = self.graph.graph().edge(edge_id).weight;
                match self.graph.route_edge(edge_id) {
                    RouteEdge::Wait { stop } => RouteAction::Wait {
                        stop_name: self.catalogue.stop(stop).name.clone(),
                        time,
                    },
                    RouteEdge::Ride {
                        bus, span_count, ..
                    } => RouteAction::Ride {
                        bus_name: self.catalogue.bus(bus).name.clone(),
                        span_count,
                        time,
                    },
                }
            })
            .collect();

        Some(RouteResult {
            total_time: path.weight,
            items,
        })
    }
}
