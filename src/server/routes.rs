//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::booking::book_appointment;
use crate::coord::SearchOrigin;
use crate::format::ResultSetView;
use crate::search::{Search, SearchRequest};
use crate::server::state::AppState;
use crate::state::SearchState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router<S: Search>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/search", post(search_handler::<S>))
        .route("/api/state", get(state_handler::<S>))
        .route("/api/book", post(book_handler::<S>))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Search request body
///
/// Exactly one of `address` or `here` must be given.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    /// Free-text address to search around
    pub address: Option<String>,
    /// Search around the device position
    #[serde(default)]
    pub here: bool,
}

impl SearchBody {
    fn into_request(self) -> Result<SearchRequest, ApiError> {
        match (self.address, self.here) {
            (Some(address), false) => Ok(SearchRequest::Address(address)),
            (None, true) => Ok(SearchRequest::Device),
            _ => Err(ApiError {
                error: "Provide either \"address\" or \"here\": true".to_string(),
                code: "INVALID_REQUEST".to_string(),
            }),
        }
    }
}

/// Presentation state as served to front ends
#[derive(Debug, Serialize, Deserialize)]
pub struct StateView {
    pub generation: u64,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SearchOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSetView>,
}

impl From<&SearchState> for StateView {
    fn from(state: &SearchState) -> Self {
        Self {
            generation: state.generation,
            loading: state.loading,
            origin: state.origin,
            error: state.error.clone(),
            location_error: state.location_error.clone(),
            results: state.results.as_ref().map(ResultSetView::from),
        }
    }
}

/// Run a search
///
/// POST /api/search
async fn search_handler<S: Search>(
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<StateView>, ApiError> {
    let request = body.into_request()?;
    let result = state.locator.search(&state.store, request).await;
    Ok(Json(StateView::from(&result)))
}

/// Current presentation state
///
/// GET /api/state
async fn state_handler<S: Search>(State(state): State<Arc<AppState<S>>>) -> Json<StateView> {
    let snapshot = state.store.snapshot().await;
    Json(StateView::from(&snapshot))
}

/// Booking request body
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    /// Id of a facility in the current results
    pub id: String,
}

/// Booking response
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub message: String,
}

/// Book an appointment at a listed facility
///
/// POST /api/book
async fn book_handler<S: Search>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<BookRequest>,
) -> Result<Json<BookResponse>, (StatusCode, Json<ApiError>)> {
    let snapshot = state.store.snapshot().await;

    snapshot
        .results
        .as_ref()
        .and_then(|results| results.get(&req.id))
        .map(|facility| {
            Json(BookResponse {
                message: book_appointment(facility),
            })
        })
        .ok_or_else(|| {
            (StatusCode::NOT_FOUND, Json(ApiError {
                error: format!("Facility not found: {}", req.id),
                code: "NOT_FOUND".to_string(),
            }))
        })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
