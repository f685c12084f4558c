//! Chat API endpoints: run one turn and return the assistant reply.
//!
//! - `POST /api/chat/send`: new session or a known session of the user
//! - `POST /api/chat/continue`: existing session by id, or a new one

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::runtime::{TurnInput, TurnOutcome};
use crate::state::AppState;

use super::error::ApiError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request shapes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub message: String,
    /// Absent or empty starts a new session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Ad-hoc context for this turn only.
    #[serde(default)]
    pub context_data: Option<String>,
    #[serde(default)]
    pub subthread_id: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
    /// Owner of the replacement session when `session_id` is unknown.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub context_data: Option<String>,
    #[serde(default)]
    pub subthread_id: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(message));
    }
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/chat/send
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<SendRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    require(&body.user_id, "User ID is required")?;
    require(&body.message, "Message is required")?;

    let input = TurnInput {
        message: body.message,
        context: body.context_data,
        subthread_id: body.subthread_id,
        thread_id: body.thread_id,
    };
    let outcome = state
        .orchestrator
        .send(&body.user_id, body.session_id.as_deref(), input)
        .await?;
    Ok(Json(outcome))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /api/chat/continue
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn continue_conversation(
    State(state): State<AppState>,
    Json(body): Json<ContinueRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    require(
        &body.session_id,
        "Session ID is required to continue conversation",
    )?;
    require(&body.message, "Message is required")?;

    let input = TurnInput {
        message: body.message,
        context: body.context_data,
        subthread_id: body.subthread_id,
        thread_id: body.thread_id,
    };
    let outcome = state
        .orchestrator
        .continue_session(&body.session_id, body.user_id.as_deref(), input)
        .await?;
    Ok(Json(outcome))
}
