//! Vector index abstraction.
//!
//! The professor-review corpus lives in an external vector database that is
//! populated out of band; this module only reads from it.

pub mod pinecone;

pub use pinecone::PineconeIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One nearest-neighbor hit from the index, most similar first in any
/// returned sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedMatch {
    pub id: String,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Review fields stored alongside each vector. Absent fields default rather
/// than failing the whole query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub stars: f64,
}

/// Nearest-neighbor search over an external vector store.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` stored items most similar to `embedding`,
    /// ranked by similarity. Fewer than `top_k` results is not an error.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedMatch>, ApiError>;
}
