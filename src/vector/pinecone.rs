use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{RetrievedMatch, VectorIndex};
use crate::core::errors::ApiError;

/// Client for a Pinecone-style index `/query` endpoint.
#[derive(Clone)]
pub struct PineconeIndex {
    host: String,
    api_key: String,
    namespace: String,
    client: Client,
}

impl PineconeIndex {
    pub fn new(host: String, api_key: String, namespace: String, client: Client) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            api_key,
            namespace,
            client,
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RetrievedMatch>,
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedMatch>, ApiError> {
        let url = format!("{}/query", self.host);

        let body = json!({
            "topK": top_k,
            "includeMetadata": true,
            "vector": embedding,
            "namespace": self.namespace,
        });

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "vector index query failed with {}: {}",
                status, text
            )));
        }

        let payload: QueryResponse = res.json().await.map_err(ApiError::upstream)?;

        let mut matches = payload.matches;
        // The index owns the ranking; we only enforce the K bound.
        matches.truncate(top_k);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn index_for(server: &MockServer) -> PineconeIndex {
        PineconeIndex::new(
            server.uri(),
            "pc-test".to_string(),
            "ns1".to_string(),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn query_sends_top_k_namespace_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("Api-Key", "pc-test"))
            .and(body_partial_json(json!({
                "topK": 3,
                "includeMetadata": true,
                "vector": [0.1, 0.2],
                "namespace": "ns1",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [
                    {
                        "id": "Dr. Ada Byron",
                        "metadata": {
                            "review": "Brilliant lectures, tough exams.",
                            "subject": "Computer Science",
                            "stars": 4.5
                        }
                    },
                    {
                        "id": "Dr. Rosalind Payne",
                        "metadata": {
                            "review": "Fair grader.",
                            "subject": "Chemistry",
                            "stars": 4.0
                        }
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let index = index_for(&server);
        let matches = index.query(&[0.1, 0.2], 3).await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "Dr. Ada Byron");
        assert_eq!(matches[0].metadata.subject, "Computer Science");
        assert_eq!(matches[1].metadata.stars, 4.0);
    }

    #[tokio::test]
    async fn missing_metadata_fields_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [{ "id": "Dr. Anonymous" }]
            })))
            .mount(&server)
            .await;

        let index = index_for(&server);
        let matches = index.query(&[0.5], 3).await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].metadata.review, "");
        assert_eq!(matches[0].metadata.stars, 0.0);
    }

    #[tokio::test]
    async fn results_are_capped_at_top_k() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [
                    { "id": "a" }, { "id": "b" }, { "id": "c" }, { "id": "d" }
                ]
            })))
            .mount(&server)
            .await;

        let index = index_for(&server);
        let matches = index.query(&[0.5], 3).await.unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn server_error_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(503).set_body_string("index down"))
            .mount(&server)
            .await;

        let index = index_for(&server);
        let err = index.query(&[0.5], 3).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
