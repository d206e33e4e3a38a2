//! Raw upstream search handlers.
//!
//! These return deduplicated upstream records without filtering, for clients
//! that do their own presentation.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use nearby_core::{
    planner::{DEFAULT_RADIUS_M, DEFAULT_TEXT_RADIUS_M},
    searcher::SubQueryFailure, GeoPoint, RawPlace, SearchOutcome, SearchRequest,
};
use serde::{Deserialize, Serialize};

use super::{bad_request, search_error_response, ApiResult, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub included_types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesResponse {
    pub places: Vec<RawPlace>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SubQueryFailure>,
}

impl From<SearchOutcome> for PlacesResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            places: outcome.places,
            duration_ms: outcome.duration_ms,
            warnings: outcome.warnings,
        }
    }
}

/// Build a center from optional request coordinates.
pub fn request_center(
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<GeoPoint, (StatusCode, Json<ErrorResponse>)> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(GeoPoint::new(lat, lng)),
        _ => Err(bad_request("lat and lng are required")),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/places/nearby
///
/// Category search around a point; large radii are tiled.
pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NearbyRequest>,
) -> ApiResult<PlacesResponse> {
    let center = request_center(body.lat, body.lng)?;
    let included_types = body
        .included_types
        .unwrap_or_else(|| vec!["restaurant".to_string()]);

    let request = SearchRequest::nearby(
        center,
        body.radius.unwrap_or(DEFAULT_RADIUS_M),
        included_types,
    );

    state
        .orchestrator()
        .search(&request)
        .await
        .map(|outcome| Json(PlacesResponse::from(outcome)))
        .map_err(search_error_response)
}

/// POST /api/v1/places/textsearch
///
/// Free-text search biased towards a point.
pub async fn text_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TextSearchRequest>,
) -> ApiResult<PlacesResponse> {
    let center = request_center(body.lat, body.lng)?;

    let request = SearchRequest::text(
        center,
        body.radius.unwrap_or(DEFAULT_TEXT_RADIUS_M),
        body.query.unwrap_or_default(),
    );

    state
        .orchestrator()
        .search(&request)
        .await
        .map(|outcome| Json(PlacesResponse::from(outcome)))
        .map_err(search_error_response)
}
