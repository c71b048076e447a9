use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Request-level error taxonomy surfaced over HTTP.
///
/// `Upstream` covers failures of the embedding, vector index, or generation
/// services before any output has been streamed. `Stream` covers failures
/// after streaming has started; those never reach `IntoResponse` directly
/// but terminate the response body instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("upstream service unavailable: {0}")]
    Upstream(String),
    #[error("stream error: {0}")]
    Stream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn upstream<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Upstream(err.to_string())
    }

    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::Stream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
