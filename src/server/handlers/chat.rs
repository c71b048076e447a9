use std::io;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use futures_util::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::core::errors::ApiError;
use crate::llm::ChatMessage;
use crate::state::AppState;

/// `POST /api/chat` — run the retrieval pipeline and stream the generated
/// answer as a chunked `text/plain` body.
///
/// Pre-stream failures surface as JSON error responses. A mid-stream failure
/// aborts the body; bytes already sent stand. Dropping the connection drops
/// the stream, which cancels the upstream generation.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(conversation): Json<Vec<ChatMessage>>,
) -> Result<Response, ApiError> {
    let rx = state.pipeline.stream_answer(conversation).await?;

    let stream = ReceiverStream::new(rx).map(|fragment| match fragment {
        Ok(text) => Ok(Bytes::from(text)),
        Err(err) => {
            tracing::warn!("generation stream failed: {}", err);
            Err(io::Error::new(io::ErrorKind::Other, err.to_string()))
        }
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from_stream(stream))
        .map_err(ApiError::internal)
}
