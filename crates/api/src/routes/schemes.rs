//! Scheme list and recommendation endpoints.
//!
//! Recommendations stand in for the independent recommendation service the
//! portal queries separately; the role is lower-cased before matching, as
//! that service does.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use domain::Scheme;
use serde::Deserialize;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub role: Option<String>,
}

/// GET /api/schemes — the static master list.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Scheme>> {
    Json(state.schemes.clone())
}

/// GET /api/recommendations?role= — schemes carrying the role as a tag;
/// empty without a role.
#[tracing::instrument(skip(state))]
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationsQuery>,
) -> Json<Vec<Scheme>> {
    let Some(role) = query.role.filter(|role| !role.is_empty()) else {
        return Json(Vec::new());
    };
    let role = role.to_lowercase();
    let matched = state
        .schemes
        .iter()
        .filter(|scheme| scheme.matches_role(&role))
        .cloned()
        .collect();
    Json(matched)
}
