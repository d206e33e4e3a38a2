pub mod handlers;
pub mod middleware;
pub mod places;
pub mod recommendations;
pub mod routes;

pub use routes::create_router;

use axum::{http::StatusCode, Json};
use nearby_core::SearchError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler result: a JSON body or a status with an error body.
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a search failure to its HTTP status and error body.
pub fn search_error_response(error: SearchError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        SearchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        SearchError::AllUpstreamFailed(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// 400 response for a request missing something the core cannot default.
pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
