//! Vector store trait

use async_trait::async_trait;

use crate::{Result, RetrievedDocument};

/// Trait for vector stores (e.g. Qdrant)
///
/// Only similarity search is needed by the service; indexing happens elsewhere.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return up to `top_k` stored passages nearest to `vector`, best first
    async fn search_by_vector(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<RetrievedDocument>>;

    /// Name of the collection being searched
    fn collection_name(&self) -> &str;
}
