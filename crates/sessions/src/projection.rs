//! Read-side views of a session: listing summaries and the recent-history
//! window. Both are recomputed on every read and never stored.

use fc_domain::session::{Message, Session, SessionSummary};

/// Characters of the last message kept in a summary preview.
pub const PREVIEW_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// Project a session into its listing summary.
pub fn summarize(session: &Session) -> SessionSummary {
    let last = session.last_message();
    SessionSummary {
        session_id: session.session_id.clone(),
        user_id: session.user_id.clone(),
        created_at: session.created_at,
        updated_at: session.updated_at,
        message_count: session.messages.len(),
        last_message: last.map(|m| preview(&m.content)),
        last_message_role: last.map(|m| m.role),
    }
}

/// Cut `content` to [`PREVIEW_CHARS`] characters, marking the cut with `...`.
fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_owned(),
    }
}

/// The most recent `limit` messages in conversation order.
///
/// `limit <= 0` or a limit at least as long as the history returns the
/// whole history.
pub fn history_window(messages: &[Message], limit: i64) -> &[Message] {
    match usize::try_from(limit) {
        Ok(n) if n > 0 && messages.len() > n => &messages[messages.len() - n..],
        _ => messages,
    }
}
