//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::StationId;
use crate::network::{NetworkSnapshot, StationRecord, UnknownStation};
use crate::planner::{RouteError, plan_route};
use crate::spanning;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(stations))
        .route("/api/stations/search", get(search_stations))
        .route("/network", get(network))
        .route("/dijkstra", get(dijkstra))
        .route("/prim", get(prim))
        .route("/kruskal", get(kruskal))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every station, in id order.
async fn stations(State(state): State<AppState>) -> Json<Vec<StationRecord>> {
    Json(
        state
            .graph
            .stations()
            .map(StationRecord::from_station)
            .collect(),
    )
}

/// Search stations by name or line.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state
        .graph
        .search(&req.q, limit)
        .into_iter()
        .map(StationSearchResult::from_station)
        .collect();

    Json(StationSearchResponse { stations })
}

/// The whole network, for drawing.
async fn network(State(state): State<AppState>) -> Json<NetworkSnapshot> {
    Json(NetworkSnapshot::from_graph(&state.graph))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a required station id parameter.
fn station_param(name: &str, value: Option<&str>) -> Result<StationId, AppError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Missing parameter: {name}"),
        })?;
    value
        .parse()
        .map(StationId)
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid station id for {name}: {value}"),
        })
}

/// Fastest route between two stations.
async fn dijkstra(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let origin = station_param("s1", req.s1.as_deref())?;
    let destination = station_param("s2", req.s2.as_deref())?;

    let itinerary = plan_route(&state.graph, origin, destination)?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RouteResultsTemplate {
            route: RouteView::from_itinerary(&state.graph, &itinerary),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(RouteResponse::from_itinerary(&itinerary)).into_response())
    }
}

/// Prim spanning tree, from `start` or the lowest station id.
async fn prim(
    State(state): State<AppState>,
    Query(req): Query<PrimQuery>,
) -> Result<Json<SpanningTreeResponse>, AppError> {
    let start = match req.start.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(start) => station_param("start", Some(start))?,
        None => state.graph.ids().next().ok_or_else(|| AppError::NotFound {
            message: "The network has no stations".to_string(),
        })?,
    };

    let tree = spanning::prim(&state.graph, start)?;
    Ok(Json(SpanningTreeResponse {
        algorithm: "prim",
        tree,
    }))
}

/// Kruskal spanning tree.
async fn kruskal(State(state): State<AppState>) -> Json<SpanningTreeResponse> {
    Json(SpanningTreeResponse {
        algorithm: "kruskal",
        tree: spanning::kruskal(&state.graph),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<UnknownStation> for AppError {
    fn from(e: UnknownStation) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
