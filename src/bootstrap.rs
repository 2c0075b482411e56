//! Construction of the long-lived clients before the server starts

use std::sync::Arc;

use ragapi_core::{AppConfig, Result};
use ragapi_openai::{OpenAiClient, OpenAiConfig};
use ragapi_rag::{EmbeddingRetriever, HuggingFaceEmbedder, QdrantVectorStore, RagChain};

/// Build the chain shared by every request.
///
/// The embedder, the Qdrant client and the chat client are created once here
/// and never mutated afterwards.
pub fn build_chain(config: &AppConfig, openai: OpenAiConfig) -> Result<RagChain> {
    let embedder = HuggingFaceEmbedder::from_env(config.embedding_model_name.clone())?;
    let vector_store = QdrantVectorStore::connect(config)?;
    let retriever = EmbeddingRetriever::new(embedder, vector_store, config.num_chunks);

    let llm = OpenAiClient::new(openai)?;

    tracing::info!(
        collection = %config.collection_name,
        embedding_model = %config.embedding_model_name,
        num_chunks = config.num_chunks,
        "retrieval configured"
    );

    Ok(RagChain::new(
        Arc::new(retriever),
        Arc::new(llm),
        config.prompt_template.clone(),
    ))
}
