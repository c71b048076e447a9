use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use super::provider::{ChatGenerator, Embedder};
use super::types::ChatMessage;
use crate::core::errors::ApiError;

/// Client for an OpenAI-compatible API, covering both the embeddings and the
/// streaming chat-completions endpoints.
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(
        base_url: String,
        api_key: String,
        embedding_model: String,
        chat_model: String,
        client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            embedding_model,
            chat_model,
            client,
        }
    }

    fn authorized_post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

#[async_trait]
impl Embedder for OpenAiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let body = json!({
            "model": self.embedding_model,
            "input": text,
            "encoding_format": "float",
        });

        let res = self
            .authorized_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "embeddings call failed with {}: {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;

        let vector = payload["data"][0]["embedding"]
            .as_array()
            .map(|vals| {
                vals.iter()
                    .filter_map(|v| v.as_f64().map(|f| f as f32))
                    .collect::<Vec<f32>>()
            })
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ApiError::Upstream("embeddings response contained no vector".to_string())
            })?;

        Ok(vector)
    }
}

#[async_trait]
impl ChatGenerator for OpenAiProvider {
    async fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = json!({
            "model": self.chat_model,
            "messages": messages,
            "stream": true,
        });

        let res = self
            .authorized_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "chat completions call failed with {}: {}",
                status, text
            )));
        }

        let (tx, rx) = mpsc::channel(32);
        let mut stream = res.bytes_stream();

        tokio::spawn(async move {
            // SSE lines may be split across transport chunks; carry the
            // incomplete tail over to the next chunk.
            let mut pending = String::new();

            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        pending.push_str(&String::from_utf8_lossy(&bytes));

                        while let Some(newline) = pending.find('\n') {
                            let line = pending[..newline].trim().to_string();
                            pending.drain(..=newline);

                            if line.is_empty() {
                                continue;
                            }
                            if line == "data: [DONE]" {
                                return;
                            }

                            if let Some(data) = line.strip_prefix("data: ") {
                                if let Ok(event) = serde_json::from_str::<Value>(data) {
                                    if let Some(content) =
                                        event["choices"][0]["delta"]["content"].as_str()
                                    {
                                        if !content.is_empty()
                                            && tx.send(Ok(content.to_string())).await.is_err()
                                        {
                                            return;
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(ApiError::Stream(e.to_string()))).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}
