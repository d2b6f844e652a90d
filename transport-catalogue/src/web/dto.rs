//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::BusStats;
use crate::requests::RouteItem;
use crate::router::RouteResult;

/// Query string for route lookups.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin stop name
    pub from: String,

    /// Destination stop name
    pub to: String,
}

/// Statistics for one bus.
#[derive(Debug, Serialize)]
pub struct BusResponse {
    pub name: String,
    pub curvature: f64,
    pub route_length: f64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

impl BusResponse {
    pub fn from_stats(name: &str, stats: &BusStats) -> Self {
        Self {
            name: name.to_owned(),
            curvature: stats.curvature(),
            route_length: stats.route_length,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
        }
    }
}

/// Buses serving one stop, sorted by name.
#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub name: String,
    pub buses: Vec<String>,
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Total travel time in minutes
    pub total_time: f64,

    pub items: Vec<RouteItem>,
}

impl From<&RouteResult> for RouteResponse {
    fn from(route: &RouteResult) -> Self {
        Self {
            total_time: route.total_time,
            items: route.items.iter().map(RouteItem::from_action).collect(),
        }
    }
}

/// Stop names in insertion order.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<String>,
}

/// Bus names in insertion order.
#[derive(Debug, Serialize)]
pub struct BusListResponse {
    pub buses: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
