//! Grievance ticket endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use domain::{GUEST_OWNER, Ticket};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: Option<String>,
}

/// GET /api/grievances?email= — list tickets, owner-filtered when `email`
/// is given, newest-first.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Ticket>> {
    let tickets = state.tickets.read().await;
    let selected = match &query.email {
        Some(email) => tickets
            .iter()
            .filter(|ticket| &ticket.owner == email)
            .cloned()
            .collect(),
        None => tickets.clone(),
    };
    Json(selected)
}

/// POST /api/grievances — open a ticket; 400 on missing fields.
#[tracing::instrument(skip(state, req), fields(subject = %req.subject))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<Ticket>, ApiError> {
    if [&req.subject, &req.category, &req.priority, &req.description]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(ApiError::BadRequest("Missing fields".to_string()));
    }

    let ticket = Ticket::open(
        req.subject,
        req.category,
        req.priority,
        req.description,
        req.owner
            .filter(|owner| !owner.is_empty())
            .unwrap_or_else(|| GUEST_OWNER.to_string()),
        Utc::now(),
    );

    let mut tickets = state.tickets.write().await;
    tickets.insert(0, ticket.clone());

    metrics::counter!("grievances_created_total").increment(1);
    Ok(Json(ticket))
}
