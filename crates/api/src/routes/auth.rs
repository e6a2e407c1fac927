//! Signup and login endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::{DEFAULT_ROLE, Session, User};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/signup — register a user and return the session identity.
///
/// 400 on missing fields, 409 on duplicate email. The role defaults to
/// `"soldier"` when omitted.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<Session>, ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Missing fields".to_string()));
    }

    let mut users = state.users.write().await;
    if users.iter().any(|user| user.email == req.email) {
        return Err(ApiError::Conflict("Email exists".to_string()));
    }

    let user = User {
        name: req.name,
        email: req.email,
        password: req.password,
        role: req
            .role
            .filter(|role| !role.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
    };
    let session = user.to_session();
    users.push(user);

    metrics::counter!("auth_signups_total").increment(1);
    Ok(Json(session))
}

/// POST /api/auth/login — exact email+password match, 401 otherwise.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    let users = state.users.read().await;
    let user = users
        .iter()
        .find(|user| user.email == req.email && user.password == req.password)
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    Ok(Json(user.to_session()))
}
