//! Conversation model: sessions, messages and the derived summary view.
//!
//! Field names serialize in camelCase so that stored sessions and API
//! payloads keep the shape existing clients already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a session's conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A persisted conversation between one user and the completion provider.
///
/// `session_id` is assigned at creation and never changes. `messages` only
/// grows. `version` is the optimistic-concurrency stamp checked by the store
/// on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Storage-internal record id, assigned by the store on first save.
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// System instruction fixed at creation; enriched at most once with
    /// discussion context.
    #[serde(rename = "initialPrompt")]
    pub system_instruction: String,
    #[serde(default)]
    pub version: u64,
}

impl Session {
    /// Start a fresh, unsaved session with a newly generated id.
    pub fn new(user_id: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            record_id: None,
            session_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            system_instruction: system_instruction.into(),
            version: 0,
        }
    }

    /// Append a message stamped with the current time.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::now(role, content));
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Summary (derived, never stored)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Listing view of a session without its full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
    pub last_message: Option<String>,
    pub last_message_role: Option<Role>,
}
