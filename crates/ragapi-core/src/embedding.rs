//! Embedder trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding models (e.g. Hugging Face feature extraction)
///
/// Implementations turn a piece of text into a fixed-length vector that can be
/// compared against the vectors stored in the vector database.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single query text
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the embedding model in use
    fn model_name(&self) -> &str;
}
