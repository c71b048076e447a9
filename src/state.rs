use std::sync::Arc;

use reqwest::Client;

use crate::chat::ChatPipeline;
use crate::core::config::Settings;
use crate::llm::OpenAiProvider;
use crate::vector::PineconeIndex;

/// Global application state shared across requests.
///
/// Holds only configuration and the wired-up pipeline; there is no mutable
/// cross-request state anywhere.
pub struct AppState {
    pub settings: Settings,
    pub pipeline: ChatPipeline,
}

impl AppState {
    pub fn new(settings: Settings) -> Arc<Self> {
        let client = Client::new();

        let openai = Arc::new(OpenAiProvider::new(
            settings.openai_base_url.clone(),
            settings.openai_api_key.clone(),
            settings.embedding_model.clone(),
            settings.chat_model.clone(),
            client.clone(),
        ));
        let index = Arc::new(PineconeIndex::new(
            settings.pinecone_index_host.clone(),
            settings.pinecone_api_key.clone(),
            settings.pinecone_namespace.clone(),
            client,
        ));

        // The OpenAI client serves as both the embedder and the generator.
        let pipeline = ChatPipeline::new(openai.clone(), index, openai, settings.top_k);

        Arc::new(AppState { settings, pipeline })
    }
}
