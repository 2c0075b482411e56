//! Hugging Face feature-extraction embedder

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use ragapi_core::{Embedder, Error, Result};

/// Inference endpoint used when `EMBEDDING_API_BASE` is not set
pub const DEFAULT_EMBEDDING_API_BASE: &str = "https://router.huggingface.co/hf-inference/models";

/// Embedder backed by a Hugging Face feature-extraction endpoint
///
/// Works against the hosted inference API as well as a self-hosted
/// text-embeddings-inference server exposing the same route.
pub struct HuggingFaceEmbedder {
    client: Client,
    api_base: String,
    model_name: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Vector(Vec<f32>),
    Matrix(Vec<Vec<f32>>),
    Batch(Vec<Vec<Vec<f32>>>),
}

impl HuggingFaceEmbedder {
    /// Create an embedder for `model_name` against the default endpoint
    pub fn new(model_name: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_base: DEFAULT_EMBEDDING_API_BASE.to_string(),
            model_name: model_name.into(),
            token: None,
        })
    }

    /// Create an embedder reading `EMBEDDING_API_BASE` and `HF_TOKEN`
    pub fn from_env(model_name: impl Into<String>) -> Result<Self> {
        let mut embedder = Self::new(model_name)?;
        if let Ok(base) = env::var("EMBEDDING_API_BASE") {
            if !base.trim().is_empty() {
                embedder = embedder.with_api_base(base);
            }
        }
        if let Ok(token) = env::var("HF_TOKEN") {
            if !token.trim().is_empty() {
                embedder = embedder.with_token(token);
            }
        }
        if embedder.uses_hosted_api_without_token() {
            tracing::warn!(
                api_base = %embedder.api_base,
                "HF_TOKEN is not set; the hosted inference API rejects anonymous requests"
            );
        }
        Ok(embedder)
    }

    fn uses_hosted_api_without_token(&self) -> bool {
        self.token.is_none() && self.api_base.trim_end_matches('/') == DEFAULT_EMBEDDING_API_BASE
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Full URL of the feature-extraction route for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/pipeline/feature-extraction",
            self.api_base.trim_end_matches('/'),
            self.model_name
        )
    }
}

/// Reduce a feature-extraction response to a single vector.
///
/// Sentence models answer with one vector; token-level models answer with one
/// row per token, which is mean-pooled.
fn pool(response: FeatureExtractionResponse) -> Result<Vec<f32>> {
    let rows = match response {
        FeatureExtractionResponse::Vector(vector) => vec![vector],
        FeatureExtractionResponse::Matrix(rows) => rows,
        FeatureExtractionResponse::Batch(mut batch) => {
            if batch.is_empty() {
                Vec::new()
            } else {
                batch.swap_remove(0)
            }
        }
    };

    let dimension = rows.first().map(Vec::len).unwrap_or(0);
    if dimension == 0 {
        return Err(Error::Embedding("embedding service returned an empty vector".to_string()));
    }
    if rows.iter().any(|row| row.len() != dimension) {
        return Err(Error::Embedding(
            "embedding service returned rows of differing length".to_string(),
        ));
    }

    if rows.len() == 1 {
        return Ok(rows.into_iter().next().unwrap_or_default());
    }

    let mut pooled = vec![0.0f32; dimension];
    for row in &rows {
        for (acc, value) in pooled.iter_mut().zip(row) {
            *acc += value;
        }
    }
    let count = rows.len() as f32;
    for value in &mut pooled {
        *value /= count;
    }
    Ok(pooled)
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint();

        let mut request = self
            .client
            .post(&url)
            .json(&FeatureExtractionRequest { inputs: text });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Embedding(format!(
                "embedding request failed with status {}: {}",
                status, body
            )));
        }

        let parsed: FeatureExtractionResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Serialization(format!("unexpected embedding response: {}", e))
        })?;

        let vector = pool(parsed)?;
        tracing::debug!(model = %self.model_name, dimension = vector.len(), "embedded query");
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
