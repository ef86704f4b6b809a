//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, warn};

use crate::domain::{Minutes, StopCode};
use crate::planner::{self, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/route", get(find_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stops.
async fn list_stops(State(state): State<AppState>) -> Json<StopsResponse> {
    let mut stops: Vec<StopInfo> = state.network.stops().map(StopInfo::from_stop).collect();
    stops.sort_by(|a, b| a.code.cmp(&b.code));
    Json(StopsResponse { stops })
}

/// Find the fastest route between two stops.
async fn find_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let request = parse_route_query(&query)?;

    // Search is CPU-bound and synchronous; keep it off the async workers
    let network = state.network.clone();
    let config = state.config.clone();
    let search_request = request.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        planner::Router::new(&network, &config).search_with_stats(&search_request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("search task failed: {e}"),
    })??;

    let itinerary = outcome.itinerary.ok_or_else(|| AppError::NotFound {
        message: format!(
            "no route found from {} to {}",
            request.start, request.destination
        ),
    })?;

    Ok(Json(RouteResponse::from_itinerary(
        &itinerary,
        outcome.states_expanded,
    )))
}

fn required<'q>(value: &'q Option<String>, name: &str) -> Result<&'q str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: format!("missing query parameter '{name}'"),
        })
}

fn parse_route_query(query: &RouteQuery) -> Result<SearchRequest, AppError> {
    let start = StopCode::parse(required(&query.from, "from")?).map_err(|e| {
        AppError::BadRequest {
            message: format!("invalid start stop: {e}"),
        }
    })?;
    let destination = StopCode::parse(required(&query.to, "to")?).map_err(|e| {
        AppError::BadRequest {
            message: format!("invalid destination stop: {e}"),
        }
    })?;
    let departure = match query.departure.as_deref() {
        Some(s) if !s.trim().is_empty() => {
            Minutes::parse_departure(s).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?
        }
        _ => Minutes::ZERO,
    };

    Ok(SearchRequest::new(start, destination, departure))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::StopNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            SearchError::TimeOverflow { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            SearchError::Timeout | SearchError::ExpansionLimit(_) => AppError::Unavailable {
                message: e.to_string(),
            },
            SearchError::UnreachableEdge { .. } | SearchError::Network(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
