//! Chat-completions client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use ragapi_core::{Error, GenerationConfig, GenerationResult, LLMProvider, Result};

use crate::config::OpenAiConfig;

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
    generation: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    error: Option<ApiError>,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        let generation = GenerationConfig {
            timeout: config.timeout(),
            ..GenerationConfig::new(config.model.clone())
        };

        Ok(Self {
            config,
            client,
            generation,
        })
    }

    /// Set the model to use for generation
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.generation.model_id = model_id.into();
        self
    }

    /// Generation settings applied to every request
    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Perform the actual chat-completions request
    async fn perform_generation(&self, prompt: &str) -> Result<GenerationResult> {
        let request_body = ChatRequest {
            model: &self.generation.model_id,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.generation.temperature,
        };

        let url = self.config.chat_completions_url();
        tracing::debug!(%url, model = %self.generation.model_id, prompt_len = prompt.len(), "sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::LLMProvider(format!(
                "chat completion request failed with status {}: {}",
                status, response_text
            )));
        }

        parse_completion(&response_text, &self.generation.model_id)
    }
}

/// Extract the first choice's text from a chat-completions response body
fn parse_completion(body: &str, model_id: &str) -> Result<GenerationResult> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        Error::Serialization(format!("unexpected chat completion response: {}", e))
    })?;

    if let Some(error) = parsed.error {
        return Err(Error::LLMProvider(error.message));
    }

    let choice = parsed.choices.into_iter().next().ok_or_else(|| {
        Error::LLMProvider(format!("chat completion returned no choices: {}", body))
    })?;

    Ok(GenerationResult {
        text: choice.message.content.unwrap_or_default(),
        model_id: model_id.to_string(),
        tokens_used: parsed.usage.and_then(|u| u.total_tokens),
    })
}

#[async_trait]
impl LLMProvider for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let generation_future = self.perform_generation(prompt);

        match self.generation.timeout {
            Some(limit) => match timeout(limit, generation_future).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(format!(
                    "chat completion did not finish within {}s",
                    limit.as_secs()
                ))),
            },
            None => generation_future.await,
        }
    }

    fn model_id(&self) -> &str {
        &self.generation.model_id
    }
}
