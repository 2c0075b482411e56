//! Core traits and types for the RAG API
//!
//! This crate defines the capability-facing interfaces used across the service:
//! LLM providers, embedders, vector stores and retrievers, together with the configuration
//! loader, the context formatter and the prompt template renderer. Keeping these
//! behind traits lets the request pipeline run against test doubles.

pub mod config;
pub mod context;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod retriever;
pub mod vector_store;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use context::{format_docs, DOCUMENT_SEPARATOR};
pub use embedding::Embedder;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, GenerationResult, LLMProvider};
pub use prompt::{render, PromptTemplate, CONTEXT_VAR, QUESTION_VAR};
pub use retriever::{RetrievedDocument, Retriever};
pub use vector_store::VectorStore;
