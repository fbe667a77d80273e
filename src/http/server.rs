//! HTTP server exposing the job graph API

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{
    all_jobs_handler, calculate_path_handler, choices_handler, graph_info_handler,
    insert_job_handler, job_handler, status_handler, validate_handler,
};
use crate::service::GraphService;

/// Build the API router for a given service instance
pub fn router(service: Arc<GraphService>) -> Router {
    Router::new()
        .route("/jobs/all", get(all_jobs_handler))
        .route("/jobs/:id", get(job_handler))
        .route("/jobs", post(insert_job_handler))
        .route("/level/calculate-path", post(calculate_path_handler))
        .route("/level/choices", post(choices_handler))
        .route("/level/validate", post(validate_handler))
        .route("/graph/info", get(graph_info_handler))
        .route("/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// HTTP server managing the job graph API
pub struct HttpServer {
    service: Arc<GraphService>,
    address: String,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(service: Arc<GraphService>, address: String, port: u16) -> Self {
        Self {
            service,
            address,
            port,
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.service));

        let addr = format!("{}:{}", self.address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Job graph API listening on {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
