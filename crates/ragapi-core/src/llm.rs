//! LLM provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// Configuration for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub temperature: f32,
    pub timeout: Option<Duration>,
}

impl GenerationConfig {
    /// Greedy decoding against `model_id`, no timeout
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            temperature: 0.0,
            timeout: None,
        }
    }
}


/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers (e.g. OpenAI-compatible chat APIs)
///
/// The call is a single request/response exchange: no streaming and no retry.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate text for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<GenerationResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
