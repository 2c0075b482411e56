//! Application configuration loaded from a JSON file
//!
//! The file carries the vector database connection, the embedding model, the
//! retrieval depth and the prompt template. It is read once at startup; any
//! problem with it is fatal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;

use crate::prompt::{PromptTemplate, CONTEXT_VAR, QUESTION_VAR};
use crate::{Error, Result};

/// Payload field holding document text when none is configured
pub const DEFAULT_CONTENT_PAYLOAD_KEY: &str = "page_content";

const QDRANT_REST_PORT: u16 = 6333;
const QDRANT_GRPC_PORT: u16 = 6334;

fn default_content_payload_key() -> String {
    DEFAULT_CONTENT_PAYLOAD_KEY.to_string()
}

fn uses_rest_port(url: &Url) -> bool {
    url.port() == Some(QDRANT_REST_PORT)
}

#[derive(Deserialize)]
struct RawConfig {
    qdrant_url: String,
    qdrant_key: String,
    embedding_model_name: String,
    num_chunks: u64,
    collection_name: String,
    prompt_template: String,
    #[serde(default = "default_content_payload_key")]
    content_payload_key: String,
}

/// Immutable, process-wide settings
#[derive(Clone, Serialize)]
pub struct AppConfig {
    pub qdrant_url: String,
    pub qdrant_key: String,
    pub embedding_model_name: String,
    pub num_chunks: u64,
    pub collection_name: String,
    pub prompt_template: PromptTemplate,
    pub content_payload_key: String,
}

impl AppConfig {
    /// Load and validate the configuration file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&text).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)
            .map_err(|e| Error::Configuration(format!("malformed configuration: {}", e)))?;

        let prompt_template = PromptTemplate::parse(&raw.prompt_template)
            .map_err(|e| Error::Configuration(format!("prompt_template: {}", e)))?;

        let config = Self {
            qdrant_url: raw.qdrant_url,
            qdrant_key: raw.qdrant_key,
            embedding_model_name: raw.embedding_model_name,
            num_chunks: raw.num_chunks,
            collection_name: raw.collection_name,
            prompt_template,
            content_payload_key: raw.content_payload_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every field must hold
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("qdrant_url", &self.qdrant_url),
            ("qdrant_key", &self.qdrant_key),
            ("embedding_model_name", &self.embedding_model_name),
            ("collection_name", &self.collection_name),
            ("content_payload_key", &self.content_payload_key),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("'{}' must not be empty", key)));
            }
        }

        if self.prompt_template.as_str().trim().is_empty() {
            return Err(Error::Configuration(
                "'prompt_template' must not be empty".to_string(),
            ));
        }

        if self.num_chunks == 0 {
            return Err(Error::Configuration(
                "'num_chunks' must be a positive integer".to_string(),
            ));
        }

        let qdrant_url = Url::parse(&self.qdrant_url).map_err(|e| {
            Error::Configuration(format!("'qdrant_url' is not a valid URL: {}", e))
        })?;
        if !matches!(qdrant_url.scheme(), "http" | "https") || qdrant_url.host().is_none() {
            return Err(Error::Configuration(format!(
                "'qdrant_url' must be an http(s) URL with a host, got '{}'",
                self.qdrant_url
            )));
        }
        if uses_rest_port(&qdrant_url) {
            tracing::warn!(
                qdrant_url = %self.qdrant_url,
                "port {} is Qdrant's REST port; the client speaks gRPC (default port {})",
                QDRANT_REST_PORT,
                QDRANT_GRPC_PORT
            );
        }

        for var in [QUESTION_VAR, CONTEXT_VAR] {
            if !self.prompt_template.references(var) {
                return Err(Error::Configuration(format!(
                    "'prompt_template' must contain the {{{}}} placeholder",
                    var
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("qdrant_url", &self.qdrant_url)
            .field("qdrant_key", &"<redacted>")
            .field("embedding_model_name", &self.embedding_model_name)
            .field("num_chunks", &self.num_chunks)
            .field("collection_name", &self.collection_name)
            .field("prompt_template", &self.prompt_template.as_str())
            .field("content_payload_key", &self.content_payload_key)
            .finish()
    }
}
