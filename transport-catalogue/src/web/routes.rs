//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/stops/:name", get(stop_info))
        .route("/buses", get(list_buses))
        .route("/buses/:name", get(bus_stats))
        .route("/route", get(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_stops(State(state): State<AppState>) -> Json<StopListResponse> {
    let stops = state.catalogue.stops().map(|stop| stop.name.clone()).collect();
    Json(StopListResponse { stops })
}

async fn list_buses(State(state): State<AppState>) -> Json<BusListResponse> {
    let buses = state.catalogue.buses().map(|bus| bus.name.clone()).collect();
    Json(BusListResponse { buses })
}

async fn bus_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BusResponse>, AppError> {
    let stats = state.catalogue.bus_stats(&name).ok_or_else(|| AppError::NotFound {
        message: format!("unknown bus {name}"),
    })?;
    Ok(Json(BusResponse::from_stats(&name, &stats)))
}

async fn stop_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StopResponse>, AppError> {
    let buses = state.catalogue.stop_info(&name).ok_or_else(|| AppError::NotFound {
        message: format!("unknown stop {name}"),
    })?;
    Ok(Json(StopResponse {
        buses: buses.iter().cloned().collect(),
        name,
    }))
}

/// Fastest route between two stops.
async fn plan_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let router = state.router.as_ref().ok_or_else(|| AppError::NotFound {
        message: "routing is not configured".to_string(),
    })?;

    let answer = state.routes.route(router, &query.from, &query.to).await;
    let route = Option::as_ref(&answer).ok_or_else(|| AppError::NotFound {
        message: format!("no route from {} to {}", query.from, query.to),
    })?;
    Ok(Json(RouteResponse::from(route)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
