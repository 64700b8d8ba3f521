use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use crate::errors::AppError;
use crate::leads::validation::LeadSubmission;
use crate::models::lead::Lead;
use crate::models::Pagination;
use crate::state::AppState;

/// POST /api/v1/leads
pub async fn handle_create_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let Json(submission) = payload?;
    let lead = submission.validate()?;

    let created = state.leads.create(&lead).await.inspect_err(|e| {
        error!(email = %lead.email, company = %lead.company, "Failed to create lead: {e}")
    })?;

    info!(
        "New lead created: {} from {} (id {})",
        created.email, created.company, created.id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/leads
///
/// Unauthenticated, and `limit` is not capped.
pub async fn handle_list_leads(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let Query(page) = page?;
    let leads = state.leads.list(page).await.inspect_err(|e| {
        error!(skip = page.skip, limit = page.limit, "Failed to fetch leads: {e}")
    })?;
    Ok(Json(leads))
}
