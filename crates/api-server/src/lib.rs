//! REST API server for sentence batching.
//!
//! Exposes the batching pipeline over JSON:
//! - `POST /api/parse-sentences`: split raw text into sentences
//! - `POST /api/k-batch`: group sentences into length-based batches
//! - `POST /api/analyze-batches`: compute per-batch statistics
//!
//! Contract violations (missing fields, malformed bodies, empty batches)
//! come back as `400` with an `{ "error": ... }` body.

mod handlers;
mod sentences;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::*;
pub use sentences::split_sentences;
pub use types::*;

/// Build the API router with all endpoints
pub fn build_router() -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Sentence splitting
        .route("/api/parse-sentences", post(parse_sentences))
        // Length-based batching
        .route("/api/k-batch", post(k_batch))
        // Per-batch statistics
        .route("/api/analyze-batches", post(analyze_batches))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the API server
pub async fn start_server(addr: &str) -> Result<(), std::io::Error> {
    tracing::info!("Starting API server on {}", addr);

    let app = build_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await
}
