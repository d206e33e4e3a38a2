//! Recommendation handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use nearby_core::{
    planner::DEFAULT_RADIUS_M, FilterSpec, Mood, RecommendQuery, Recommendations,
};
use serde::Deserialize;

use super::places::request_center;
use super::{search_error_response, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub filters: FilterSpec,
}

/// POST /api/v1/recommendations
///
/// Search by mood or keyword, then filter and sort the results.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecommendRequest>,
) -> ApiResult<Recommendations> {
    let center = request_center(body.lat, body.lng)?;

    let query = RecommendQuery {
        center,
        radius_m: body.radius.unwrap_or(DEFAULT_RADIUS_M),
        mood: body.mood,
        keyword: body.keyword,
        filters: body.filters,
    };

    state
        .recommender()
        .recommend(&query)
        .await
        .map(Json)
        .map_err(search_error_response)
}
