//! OpenAI-compatible generation provider for the RAG API
//!
//! This crate provides the chat-completions implementation of the LLMProvider trait.
//! Any endpoint that speaks the OpenAI wire format (OpenAI, OpenRouter, vLLM, ...)
//! can be targeted through the base URL.

mod client;
mod config;


pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use ragapi_core::{Error, GenerationConfig, GenerationResult, LLMProvider, Result};
