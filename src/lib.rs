//! HTTP front end of the RAG API
//!
//! Wires the configuration, the retrieval and generation clients and the axum
//! router together. `main.rs` only parses flags and starts serving.

pub mod bootstrap;
pub mod server;
pub mod telemetry;

pub use bootstrap::build_chain;
pub use server::{create_router, AppState, ALLOWED_ORIGINS};
