//! HTTP endpoints
//!
//! `GET /` is a liveness check; `POST /ask` answers a question through the
//! shared [`RagChain`].

mod handlers;

#[cfg(test)]
mod tests;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ragapi_rag::RagChain;

pub use handlers::{ApiError, AskRequest, AskResponse};

/// Browser origins allowed to call the API (local development front ends)
pub const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://127.0.0.1:8000",
];

/// State shared read-only by every request
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<RagChain>,
}

impl AppState {
    pub fn new(chain: RagChain) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/ask", post(handlers::ask))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .copied()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
