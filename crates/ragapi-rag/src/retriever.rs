//! Retriever composing an embedder with a vector store

use async_trait::async_trait;

use ragapi_core::{Embedder, Result, RetrievedDocument, Retriever, VectorStore};

/// Embeds the question, then asks the vector store for its nearest neighbours
pub struct EmbeddingRetriever<E: Embedder, V: VectorStore> {
    embedder: E,
    vector_store: V,
    top_k: u64,
}

impl<E: Embedder, V: VectorStore> EmbeddingRetriever<E, V> {
    pub fn new(embedder: E, vector_store: V, top_k: u64) -> Self {
        Self {
            embedder,
            vector_store,
            top_k,
        }
    }

    pub fn top_k(&self) -> u64 {
        self.top_k
    }
}

#[async_trait]
impl<E: Embedder, V: VectorStore> Retriever for EmbeddingRetriever<E, V> {
    async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedDocument>> {
        let vector = self.embedder.embed_query(question).await?;
        let documents = self.vector_store.search_by_vector(vector, self.top_k).await?;

        tracing::debug!(
            collection = self.vector_store.collection_name(),
            model = self.embedder.model_name(),
            requested = self.top_k,
            returned = documents.len(),
            "retrieved documents"
        );
        Ok(documents)
    }
}
