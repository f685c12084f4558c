//! Session read endpoints. None of them write.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;

use fc_domain::session::{Message, Session, SessionSummary};

use crate::state::AppState;

use super::error::ApiError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /api/chat/sessions/:userId
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Session>>, ApiError> {
    Ok(Json(state.orchestrator.list_sessions(&user_id).await?))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /api/chat/sessions/:userId/summaries
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn list_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    Ok(Json(state.orchestrator.list_summaries(&user_id).await?))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /api/chat/session/:sessionId
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(state.orchestrator.get_session(&session_id).await?))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /api/chat/session/:sessionId/history?limit=N
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// `0` (the default) returns the whole history.
    #[serde(default)]
    limit: i64,
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(
        state
            .orchestrator
            .get_history(&session_id, query.limit)
            .await?,
    ))
}
