//! HTTP layer: thin axum glue over the injected [`qa_engine::RagService`].
//!
//! Routes extract and validate the request, delegate to the service handle
//! carried in [`AppState`], and map the result to JSON DTOs. No business
//! logic lives here.

use std::{env, error::Error, sync::Arc};

pub mod core;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

pub use crate::core::app_state::AppState;
use crate::routes::{
    documents::{count_route::documents_count, upload_route::upload_document},
    health::health_route::health_check,
    query::query_route::process_query,
    service_info::service_info,
};

/// Serves the API until ctrl-c.
///
/// The listen address comes from `API_ADDRESS` (default `127.0.0.1:8001`).
/// The service handle is constructed by the binary and passed in — routes
/// never reach for ambient state.
pub async fn start(state: AppState) -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8001".to_string());

    let app = Router::new()
        .route("/", get(service_info))
        .route("/api/v1/query", post(process_query))
        .route("/api/v1/upload-document", post(upload_document))
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/documents/count", get(documents_count))
        .with_state(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    info!("API listening on {host_url}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
