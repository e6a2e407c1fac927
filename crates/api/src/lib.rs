//! HTTP stand-in for the Shifa Setu remote service.
//!
//! Stateless handlers over in-memory collections: auth, grievances, schemes,
//! and the recommendation endpoint, with structured logging (tracing) and
//! Prometheus metrics. This is the wire contract the portal's fallback data
//! service targets; it has no durability of its own.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/grievances", get(routes::grievances::list))
        .route("/api/grievances", post(routes::grievances::create))
        .route("/api/schemes", get(routes::schemes::list))
        .route("/api/recommendations", get(routes::schemes::recommendations))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates empty application state with the static scheme list loaded.
pub fn create_default_state() -> Arc<AppState> {
    Arc::new(AppState::new())
}
