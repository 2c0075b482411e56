//! Retrieval and generation pipeline for the RAG API
//!
//! This crate provides the Hugging Face embedder, the Qdrant vector store, the
//! retriever composing the two, and the [`RagChain`] that turns a question into
//! an answer.

mod chain;
mod embedder;
mod retriever;
mod vector_store;


pub use chain::RagChain;
pub use embedder::{HuggingFaceEmbedder, DEFAULT_EMBEDDING_API_BASE};
pub use retriever::EmbeddingRetriever;
pub use vector_store::QdrantVectorStore;

// Re-export core types for convenience
pub use ragapi_core::{
    AppConfig, Embedder, Error, LLMProvider, PromptTemplate, Result, RetrievedDocument,
    Retriever, VectorStore,
};
