//! Applies request documents to a catalogue and answers stat requests.

use std::io::{Read, Write};
use std::sync::Arc;

use tracing::{debug, info};

use super::dto::*;
use super::error::RequestError;
use crate::catalogue::TransportCatalogue;
use crate::domain::{CatalogueError, Coordinates, RouteKind};
use crate::router::{RouterSettings, TransportRouter};

/// Build a catalogue from base requests.
///
/// Requests are applied in load order regardless of their order in the
/// document: every stop, then every road distance, then every bus. The
/// first failing command aborts the load.
pub fn load_catalogue(base_requests: &[BaseRequest]) -> Result<TransportCatalogue, CatalogueError> {
    let mut catalogue = TransportCatalogue::new();

    let stops: Vec<&AddStopRequest> = base_requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
        .collect();
    let buses = base_requests.iter().filter_map(|request| match request {
        BaseRequest::Bus(bus) => Some(bus),
        BaseRequest::Stop(_) => None,
    });

    for stop in &stops {
        catalogue.add_stop(
            stop.name.clone(),
            Coordinates::new(stop.latitude, stop.longitude),
        )?;
    }
    for stop in &stops {
        for (neighbour, &meters) in &stop.road_distances {
            catalogue.set_distance(&stop.name, neighbour, meters)?;
        }
    }
    for bus in buses {
        catalogue.add_bus(
            bus.name.clone(),
            RouteKind::from_roundtrip(bus.is_roundtrip),
            &bus.stops,
        )?;
    }

    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "catalogue loaded"
    );
    Ok(catalogue)
}

/// Answers stat requests against a frozen catalogue.
///
/// Routing is available only when the handler was given router settings;
/// otherwise every route request is answered "not found".
#[derive(Debug)]
pub struct RequestHandler {
    catalogue: Arc<TransportCatalogue>,
    router: Option<TransportRouter>,
}

impl RequestHandler {
    /// Freeze `catalogue` and, if settings are present, build its route graph.
    pub fn new(
        catalogue: Arc<TransportCatalogue>,
        settings: Option<RouterSettings>,
    ) -> Result<Self, RequestError> {
        let router = match settings {
            Some(settings) => {
                settings.validate()?;
                Some(TransportRouter::new(catalogue.clone(), settings))
            }
            None => {
                debug!("no routing settings, route requests disabled");
                None
            }
        };
        Ok(Self { catalogue, router })
    }

    /// Answer one stat request.
    pub fn answer(&self, request: &StatRequest) -> StatResponse {
        let id = request.id();
        let response = match request {
            StatRequest::Bus { name, .. } => self
                .catalogue
                .bus_stats(name)
                .map(|stats| StatResponse::Bus(BusStatsResponse::from_stats(id, &stats))),
            StatRequest::Stop { name, .. } => self.catalogue.stop_info(name).map(|buses| {
                StatResponse::Stop(StopInfoResponse {
                    request_id: id,
                    buses: buses.iter().cloned().collect(),
                })
            }),
            StatRequest::Route { from, to, .. } => self
                .router
                .as_ref()
                .and_then(|router| router.calc_route(from, to))
                .map(|route| StatResponse::Route(RouteResponse::from_route(id, &route))),
            StatRequest::Unsupported { kind, .. } => {
                debug!(id, %kind, "unsupported request kind");
                None
            }
        };
        response.unwrap_or_else(|| {
            debug!(id, "request not found");
            StatResponse::NotFound(NotFoundResponse::new(id))
        })
    }

    /// Answer stat requests in order.
    pub fn answer_all(&self, requests: &[StatRequest]) -> Vec<StatResponse> {
        requests.iter().map(|request| self.answer(request)).collect()
    }
}

/// Run a whole document: load its base requests, then answer its stat
/// requests.
pub fn process(document: &RequestDocument) -> Result<Vec<StatResponse>, RequestError> {
    let catalogue = load_catalogue(&document.base_requests)?;
    let handler = RequestHandler::new(Arc::new(catalogue), document.routing_settings)?;
    Ok(handler.answer_all(&document.stat_requests))
}

/// Parse a request document from JSON.
pub fn read_document(reader: impl Read) -> Result<RequestDocument, RequestError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write responses as a pretty-printed JSON array.
pub fn write_responses(
    mut writer: impl Write,
    responses: &[StatResponse],
) -> Result<(), RequestError> {
    serde_json::to_writer_pretty(&mut writer, responses)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// The sample network: three buses over ten Moscow stops.
    fn sample_document() -> Value {
        json!({
            "base_requests": [
                {"type": "Bus", "name": "828", "is_roundtrip": true,
                 "stops": ["Biryulyovo Zapadnoye", "Universam", "Rossoshanskaya ulitsa", "Biryulyovo Zapadnoye"]},
                {"type": "Stop", "name": "Tolstopaltsevo", "latitude": 55.611087, "longitude": 37.20829,
                 "road_distances": {"Marushkino": 3900}},
                {"type": "Stop", "name": "Marushkino", "latitude": 55.595884, "longitude": 37.209755,
                 "road_distances": {"Rasskazovka": 9900, "Marushkino": 100}},
                {"type": "Bus", "name": "256", "is_roundtrip": true,
                 "stops": ["Biryulyovo Zapadnoye", "Biryusinka", "Universam", "Biryulyovo Tovarnaya",
                           "Biryulyovo Passazhirskaya", "Biryulyovo Zapadnoye"]},
                {"type": "Bus", "name": "750", "is_roundtrip": false,
                 "stops": ["Tolstopaltsevo", "Marushkino", "Marushkino", "Rasskazovka"]},
                {"type": "Stop", "name": "Rasskazovka", "latitude": 55.632761, "longitude": 37.333324,
                 "road_distances": {"Marushkino": 9500}},
                {"type": "Stop", "name": "Biryulyovo Zapadnoye", "latitude": 55.574371, "longitude": 37.6517,
                 "road_distances": {"Rossoshanskaya ulitsa": 7500, "Biryusinka": 1800, "Universam": 2400}},
                {"type": "Stop", "name": "Biryusinka", "latitude": 55.581065, "longitude": 37.64839,
                 "road_distances": {"Universam": 750}},
                {"type": "Stop", "name": "Universam", "latitude": 55.587655, "longitude": 37.645687,
                 "road_distances": {"Rossoshanskaya ulitsa": 5600, "Biryulyovo Tovarnaya": 900}},
                {"type": "Stop", "name": "Biryulyovo Tovarnaya", "latitude": 55.592028, "longitude": 37.653656,
                 "road_distances": {"Biryulyovo Passazhirskaya": 1300}},
                {"type": "Stop", "name": "Biryulyovo Passazhirskaya", "latitude": 55.580999, "longitude": 37.659164,
                 "road_distances": {"Biryulyovo Zapadnoye": 1200}},
                {"type": "Stop", "name": "Rossoshanskaya ulitsa", "latitude": 55.595579, "longitude": 37.605757,
                 "road_distances": {}},
                {"type": "Stop", "name": "Prazhskaya", "latitude": 55.611678, "longitude": 37.603831,
                 "road_distances": {}}
            ],
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
            "stat_requests": [
                {"id": 1, "type": "Bus", "name": "256"},
                {"id": 2, "type": "Bus", "name": "750"},
                {"id": 3, "type": "Bus", "name": "751"},
                {"id": 4, "type": "Stop", "name": "Samara"},
                {"id": 5, "type": "Stop", "name": "Prazhskaya"},
                {"id": 6, "type": "Stop", "name": "Biryulyovo Zapadnoye"},
                {"id": 7, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Universam"},
                {"id": 8, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Prazhskaya"}
            ]
        })
    }

    fn run(document: Value) -> Vec<Value> {
        let document: RequestDocument = serde_json::from_value(document).unwrap();
        process(&document)
            .unwrap()
            .iter()
            .map(|response| serde_json::to_value(response).unwrap())
            .collect()
    }

    fn approx(value: &Value, expected: f64) -> bool {
        (value.as_f64().unwrap() - expected).abs() < 1e-4
    }

    #[test]
    fn circular_bus_stats() {
        let responses = run(sample_document());
        let bus = &responses[0];
        assert_eq!(bus["request_id"], 1);
        assert_eq!(bus["route_length"], 5950.0);
        assert_eq!(bus["stop_count"], 6);
        assert_eq!(bus["unique_stop_count"], 5);
        assert!(approx(&bus["curvature"], 1.36124), "{bus}");
    }

    #[test]
    fn linear_bus_stats() {
        let responses = run(sample_document());
        let bus = &responses[1];
        assert_eq!(bus["route_length"], 27400.0);
        assert_eq!(bus["stop_count"], 7);
        assert_eq!(bus["unique_stop_count"], 3);
        assert!(approx(&bus["curvature"], 1.30853), "{bus}");
    }

    #[test]
    fn misses_are_not_found() {
        let responses = run(sample_document());
        assert_eq!(
            responses[2],
            json!({"request_id": 3, "error_message": "not found"})
        );
        assert_eq!(
            responses[3],
            json!({"request_id": 4, "error_message": "not found"})
        );
    }

    #[test]
    fn stop_responses() {
        let responses = run(sample_document());
        assert_eq!(responses[4], json!({"request_id": 5, "buses": []}));
        assert_eq!(
            responses[5],
            json!({"request_id": 6, "buses": ["256", "828"]})
        );
    }

    #[test]
    fn route_responses() {
        let responses = run(sample_document());
        let route = &responses[6];
        assert_eq!(route["request_id"], 7);
        // 828 runs Zapadnoye -> Universam directly: 2400 m at 40 km/h.
        assert!(approx(&route["total_time"], 6.0 + 2400.0 / (40000.0 / 60.0)), "{route}");
        assert_eq!(route["items"][0], json!({"type": "Wait", "stop_name": "Biryulyovo Zapadnoye", "time": 6.0}));
        assert_eq!(route["items"][1]["type"], "Bus");
        assert_eq!(route["items"][1]["span_count"], 1);

        assert_eq!(
            responses[7],
            json!({"request_id": 8, "error_message": "not found"})
        );
    }

    #[test]
    fn routing_disabled_without_settings() {
        let mut document = sample_document();
        document.as_object_mut().unwrap().remove("routing_settings");
        let responses = run(document);
        assert_eq!(
            responses[6],
            json!({"request_id": 7, "error_message": "not found"})
        );
        // Other queries still work.
        assert_eq!(responses[0]["stop_count"], 6);
    }

    #[test]
    fn unsupported_requests_answered_not_found() {
        let mut document = sample_document();
        let stats = document["stat_requests"].as_array_mut().unwrap();
        stats.insert(0, json!({"id": 9, "type": "Map"}));

        let responses = run(document);
        assert_eq!(responses.len(), 9);
        assert_eq!(
            responses[0],
            json!({"request_id": 9, "error_message": "not found"})
        );
        assert_eq!(responses[1]["request_id"], 1);
        assert_eq!(responses[1]["stop_count"], 6);
    }

    #[test]
    fn invalid_settings_rejected() {
        let mut document = sample_document();
        document["routing_settings"] = json!({"bus_wait_time": 6, "bus_velocity": 0});
        let document: RequestDocument = serde_json::from_value(document).unwrap();
        assert!(matches!(process(&document), Err(RequestError::Settings(_))));
    }

    #[test]
    fn load_aborts_on_first_error() {
        let base: Vec<BaseRequest> = serde_json::from_value(json!([
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
            {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false}
        ]))
        .unwrap();
        assert_eq!(
            load_catalogue(&base).unwrap_err(),
            CatalogueError::UnknownStop("B".into())
        );
    }

    #[test]
    fn distances_to_unknown_stops_rejected() {
        let base: Vec<BaseRequest> = serde_json::from_value(json!([
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
             "road_distances": {"Ghost": 10}}
        ]))
        .unwrap();
        assert_eq!(
            load_catalogue(&base).unwrap_err(),
            CatalogueError::UnknownStop("Ghost".into())
        );
    }

    #[test]
    fn read_and_write_roundtrip() {
        let input = sample_document().to_string();
        let document = read_document(input.as_bytes()).unwrap();
        let responses = process(&document).unwrap();

        let mut out = Vec::new();
        write_responses(&mut out, &responses).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[4], json!({"request_id": 5, "buses": []}));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            read_document("{\"base_requests\": [".as_bytes()),
            Err(RequestError::Json(_))
        ));
    }
}
