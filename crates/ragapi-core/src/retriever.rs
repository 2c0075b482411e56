//! Retriever trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A passage returned by similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub score: Option<f32>,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

impl AsRef<str> for RetrievedDocument {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

/// Trait for retrievers
///
/// A retriever turns a question into the most relevant stored passages,
/// ordered by descending similarity as ranked by the backing store.
/// Errors from the embedding service or the store propagate unchanged;
/// there is no fallback and no partial result.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve the passages most similar to `question`
    async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedDocument>>;
}
