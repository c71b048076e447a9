//! The request pipeline: embed the latest query, retrieve similar reviews,
//! splice them into the conversation, and stream the generated answer.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::prompt::{render_context, SYSTEM_PROMPT};
use crate::core::errors::ApiError;
use crate::llm::{ChatGenerator, ChatMessage, Embedder};
use crate::vector::VectorIndex;

/// Stateless per-request pipeline over the three external capabilities.
/// All entities it produces are request-scoped.
#[derive(Clone)]
pub struct ChatPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn ChatGenerator>,
    top_k: usize,
}

impl ChatPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn ChatGenerator>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
            top_k,
        }
    }

    /// Run the pipeline for one conversation and hand back the generator's
    /// fragment stream.
    ///
    /// Steps are strictly sequential; any upstream failure before the stream
    /// starts aborts the whole request with no partial output. No retries.
    pub async fn stream_answer(
        &self,
        conversation: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError> {
        let last = conversation.last().ok_or_else(|| {
            ApiError::BadRequest("conversation must contain at least one message".to_string())
        })?;
        if last.content.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "last message must have non-empty content".to_string(),
            ));
        }

        let embedding = self.embedder.embed(&last.content).await?;

        let matches = self.index.query(&embedding, self.top_k).await?;
        tracing::debug!("retrieved {} matches for query", matches.len());

        let augmented = format!("{}{}", last.content, render_context(&matches));

        let mut outbound = Vec::with_capacity(conversation.len() + 1);
        outbound.push(ChatMessage::system(SYSTEM_PROMPT));
        outbound.extend(conversation[..conversation.len() - 1].iter().cloned());
        outbound.push(ChatMessage::user(augmented));

        self.generator.stream_chat(outbound).await
    }
}
