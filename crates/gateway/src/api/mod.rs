pub mod chat;
pub mod error;
pub mod health;
pub mod sessions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub use error::ApiError;

/// Build the API router. Call `.with_state(state)` on the result.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Turns
        .route("/api/chat/send", post(chat::send))
        .route("/api/chat/continue", post(chat::continue_conversation))
        // Reads
        .route("/api/chat/sessions/:user_id", get(sessions::list_sessions))
        .route(
            "/api/chat/sessions/:user_id/summaries",
            get(sessions::list_summaries),
        )
        .route("/api/chat/session/:session_id", get(sessions::get_session))
        .route(
            "/api/chat/session/:session_id/history",
            get(sessions::get_history),
        )
}
