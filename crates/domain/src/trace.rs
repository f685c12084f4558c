use serde::Serialize;

/// Structured trace events emitted across all ForumChat crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionResolved {
        session_id: String,
        user_id: String,
        is_new: bool,
    },
    SessionSaved {
        session_id: String,
        version: u64,
        messages: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        messages: usize,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
    ForumCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    ForumContextBuilt {
        subthread_id: String,
        outcome: String,
        voted_messages: usize,
        context_chars: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "fc_event");
    }
}
