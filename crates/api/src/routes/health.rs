//! Health check endpoint.

use axum::Json;
use serde::Serialize;

use crate::config::SERVICE_NAME;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health — liveness probe, names the service so a misconfigured
/// portal base URL is easy to spot.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}
