//! Candidate handlers. Every query is scoped to the authenticated user.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::db::{candidate_create, candidates_list_by_user};
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{CandidateRow, NewCandidate};

#[derive(Debug, Serialize)]
pub struct CandidateCreatedResponse {
    pub message: &'static str,
    pub candidate: CandidateRow,
}

/// POST /api/candidate
///
/// An unreadable body is reported like any other failure to add the record (500).
pub async fn create_candidate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<CandidateCreatedResponse>), AppError> {
    let Json(body) = payload
        .map_err(|e| AppError::Internal(anyhow::anyhow!("candidate body: {}", e.body_text())))?;
    let candidate = candidate_create(state.db(), &body, user_id).await?;
    info!(user_id, candidate_id = candidate.id, "candidate added");
    Ok((
        StatusCode::CREATED,
        Json(CandidateCreatedResponse {
            message: "Candidate added successfully",
            candidate,
        }),
    ))
}

/// GET /api/candidate
pub async fn list_candidates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let rows = candidates_list_by_user(state.db(), user_id).await?;
    Ok(Json(rows))
}
