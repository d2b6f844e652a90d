//! Data transfer objects for request documents and their responses.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::BusStats;
use crate::router::{RouteAction, RouteResult, RouterSettings};

/// A complete request document.
///
/// Keys this crate does not handle (such as `render_settings`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestDocument {
    /// Commands that populate the catalogue
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Queries answered once the catalogue is complete
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,

    /// Routing parameters; without them route queries are not answered
    #[serde(default)]
    pub routing_settings: Option<RouterSettings>,

    /// Where to store or find a catalogue snapshot
    #[serde(default)]
    pub serialization_settings: Option<SerializationSettings>,
}

/// Location of a catalogue snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// A command that populates the catalogue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(AddStopRequest),
    Bus(AddBusRequest),
}

/// Add a stop and the road distances from it to its neighbours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddStopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres from this stop to each named neighbour
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

/// Add a bus route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddBusRequest {
    pub name: String,
    pub stops: Vec<String>,
    /// Circular routes list their first stop again at the end
    pub is_roundtrip: bool,
}

/// A query against the finished catalogue.
///
/// Request kinds this crate does not answer (such as `Map`) still parse, as
/// [`StatRequest::Unsupported`], so the rest of the document gets answered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawStatRequest")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Unsupported { id: i64, kind: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Unsupported { id, .. } => *id,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum KnownStatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatRequest {
    Known(KnownStatRequest),
    Other {
        id: i64,
        #[serde(rename = "type")]
        kind: String,
    },
}

const KNOWN_KINDS: [&str; 3] = ["Bus", "Stop", "Route"];

impl TryFrom<RawStatRequest> for StatRequest {
    type Error = String;

    fn try_from(raw: RawStatRequest) -> Result<Self, Self::Error> {
        match raw {
            RawStatRequest::Known(KnownStatRequest::Bus { id, name }) => {
                Ok(StatRequest::Bus { id, name })
            }
            RawStatRequest::Known(KnownStatRequest::Stop { id, name }) => {
                Ok(StatRequest::Stop { id, name })
            }
            RawStatRequest::Known(KnownStatRequest::Route { id, from, to }) => {
                Ok(StatRequest::Route { id, from, to })
            }
            // A known kind only lands here when its fields are wrong.
            RawStatRequest::Other { id, kind } if KNOWN_KINDS.contains(&kind.as_str()) => {
                Err(format!("malformed {kind} request {id}"))
            }
            RawStatRequest::Other { id, kind } => Ok(StatRequest::Unsupported { id, kind }),
        }
    }
}

/// Answer to a single stat request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus(BusStatsResponse),
    Stop(StopInfoResponse),
    Route(RouteResponse),
    NotFound(NotFoundResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStatsResponse {
    pub request_id: i64,
    pub curvature: f64,
    pub route_length: f64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

impl BusStatsResponse {
    pub fn from_stats(request_id: i64, stats: &BusStats) -> Self {
        Self {
            request_id,
            curvature: stats.curvature(),
            route_length: stats.route_length,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopInfoResponse {
    pub request_id: i64,
    /// Serving buses, sorted by name
    pub buses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub request_id: i64,
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

impl RouteResponse {
    pub fn from_route(request_id: i64, route: &RouteResult) -> Self {
        Self {
            request_id,
            total_time: route.total_time,
            items: route.items.iter().map(RouteItem::from_action).collect(),
        }
    }
}

/// One step of a route in a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl RouteItem {
    pub fn from_action(action: &RouteAction) -> Self {
        match action {
            RouteAction::Wait { stop_name, time } => RouteItem::Wait {
                stop_name: stop_name.clone(),
                time: *time,
            },
            RouteAction::Ride {
                bus_name,
                span_count,
                time,
            } => RouteItem::Bus {
                bus: bus_name.clone(),
                span_count: *span_count,
                time: *time,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFoundResponse {
    pub request_id: i64,
    pub error_message: String,
}

impl NotFoundResponse {
    pub fn new(request_id: i64) -> Self {
        Self {
            request_id,
            error_message: "not found".to_string(),
        }
    }
}
