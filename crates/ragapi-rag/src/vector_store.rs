//! Qdrant vector store

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{SearchPointsBuilder, Value};
use qdrant_client::Qdrant;
use std::collections::HashMap;

use ragapi_core::{AppConfig, Error, Result, RetrievedDocument, VectorStore};

/// Similarity search over one Qdrant collection
///
/// The client keeps its gRPC channel open and is shared by all requests.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection_name: String,
    content_key: String,
}

impl QdrantVectorStore {
    /// Build a client for the collection named in `config`
    pub fn connect(config: &AppConfig) -> Result<Self> {
        let client = Qdrant::from_url(&config.qdrant_url)
            .api_key(config.qdrant_key.clone())
            .build()
            .map_err(|e| Error::VectorStore(format!("cannot create Qdrant client: {}", e)))?;

        Ok(Self {
            client,
            collection_name: config.collection_name.clone(),
            content_key: config.content_payload_key.clone(),
        })
    }
}

/// Text stored under `key`, or an empty string when the payload lacks it
fn payload_text(payload: &HashMap<String, Value>, key: &str) -> String {
    match payload.get(key) {
        Some(Value {
            kind: Some(Kind::StringValue(text)),
        }) => text.clone(),
        _ => String::new(),
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn search_by_vector(&self, vector: Vec<f32>, top_k: u64) -> Result<Vec<RetrievedDocument>> {
        let request = SearchPointsBuilder::new(self.collection_name.clone(), vector, top_k)
            .with_payload(true);

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| Error::VectorStore(e.to_string()))?;

        let documents = response
            .result
            .into_iter()
            .map(|point| {
                let content = payload_text(&point.payload, &self.content_key);
                if content.is_empty() {
                    tracing::warn!(
                        collection = %self.collection_name,
                        key = %self.content_key,
                        "search hit has no text payload"
                    );
                }
                RetrievedDocument::new(content).with_score(point.score)
            })
            .collect();

        Ok(documents)
    }

    fn collection_name(&self) -> &str {
        &self.collection_name
    }
}
