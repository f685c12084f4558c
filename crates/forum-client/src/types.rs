//! Data Transfer Objects for the forum service API.
//!
//! Field names use `camelCase` on the wire and `snake_case` in Rust code.
//! Unknown fields are ignored; missing or null fields read as defaults.

use serde::{Deserialize, Deserializer, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /subthreads/{id}/messages: one element of the response array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvote_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub subthread_id: Option<String>,
}

impl ForumMessage {
    /// Live and upvoted at least once.
    pub fn is_voted(&self) -> bool {
        !self.deleted && self.upvote_count > 0
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Subthreads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /threads/{id}/subthreads: one element of the response array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumSubthread {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// The service spells this key `initalMessage`.
    #[serde(default, alias = "initalMessage")]
    pub initial_message: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Empty when fetched with `includeMessages=false`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ForumMessage>,
}

impl ForumSubthread {
    /// The opening post, when present and not blank.
    pub fn initial_text(&self) -> Option<&str> {
        self.initial_message
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

fn null_as_default<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
