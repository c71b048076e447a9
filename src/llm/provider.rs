use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::ChatMessage;
use crate::core::errors::ApiError;

/// Maps text to a fixed-length embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError>;
}

/// Produces a streamed chat completion for a conversation.
///
/// The receiver yields text fragments in arrival order. A fragment-level
/// `Err` terminates the stream; nothing follows it. Dropping the receiver
/// cancels the upstream request.
#[async_trait]
pub trait ChatGenerator: Send + Sync {
    async fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError>;
}
