//! Prometheus exposition endpoint.
//!
//! Renders the counters the handlers emit (signups, created grievances) in
//! text exposition format. The portal keeps its own counters; this route
//! only serves this process.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// GET /metrics
pub async fn render(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    )
}
