//! OpenAI-compatible API configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

use ragapi_core::{Error, Result};

/// Model used when `OPENAI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";

/// Configuration for the chat-completions client
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

impl OpenAiConfig {
    /// Create configuration from environment variables (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("openai_api_key")
            .or_else(|| non_empty("OPENAI_API_KEY"))
            .ok_or_else(|| {
                Error::Configuration(
                    "openai_api_key or OPENAI_API_KEY environment variable not found".to_string(),
                )
            })?;

        let api_base = non_empty("openai_api_base")
            .or_else(|| non_empty("OPENAI_API_BASE"))
            .ok_or_else(|| {
                Error::Configuration(
                    "openai_api_base or OPENAI_API_BASE environment variable not found".to_string(),
                )
            })?;

        let model = non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match non_empty("OPENAI_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!(
                    "OPENAI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?),
            None => None,
        };

        Ok(Self {
            api_key,
            api_base,
            model,
            timeout_secs,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String, api_base: String) -> Self {
        Self {
            api_key,
            api_base,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the chat-completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
