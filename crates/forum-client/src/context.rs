//! `ForumContextBuilder` turns a forum subthread into a text block that is
//! appended to a session's system instruction.
//!
//! Gracefully degrades: if the forum service is unreachable or returns
//! errors, the failed part is treated as empty and the builder still
//! returns a (possibly header-only) block.

use fc_domain::trace::TraceEvent;
use tracing::warn;

use crate::provider::ForumSource;
use crate::types::ForumMessage;

const HEADER: &str = "Forum discussion context:";
const VOTED_HEADING: &str = "Top voted messages:";

/// How the forum answered while the context was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOutcome {
    /// At least one of initial message or voted messages was found.
    Context,
    /// The service answered but had nothing usable.
    Empty,
    /// At least one fetch failed.
    Unavailable,
}

impl ContextOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Empty => "empty",
            Self::Unavailable => "unavailable",
        }
    }
}

/// The assembled block plus what went into it.
#[derive(Debug, Clone)]
pub struct ForumContext {
    pub text: String,
    pub outcome: ContextOutcome,
    /// Number of voted messages listed in `text`.
    pub voted: usize,
}

/// Builds the forum context block for one subthread.
pub struct ForumContextBuilder<'a> {
    source: &'a dyn ForumSource,
}

impl<'a> ForumContextBuilder<'a> {
    pub fn new(source: &'a dyn ForumSource) -> Self {
        Self { source }
    }

    /// Fetch the subthread (and its opening post, when `thread_id` is given)
    /// and assemble the context block.
    ///
    /// Never fails.
    pub async fn build(&self, subthread_id: &str, thread_id: Option<&str>) -> ForumContext {
        let mut failed = false;

        // ── 1. Opening post of the subthread ─────────────────────────
        let mut initial: Option<String> = None;
        if let Some(thread_id) = thread_id.filter(|t| !t.is_empty()) {
            match self.source.thread_subthreads(thread_id).await {
                Ok(subthreads) => {
                    initial = subthreads
                        .iter()
                        .find(|s| s.id == subthread_id)
                        .and_then(|s| s.initial_text())
                        .map(str::to_owned);
                }
                Err(e) => {
                    failed = true;
                    warn!(thread_id = %thread_id, error = %e, "failed to fetch forum subthreads");
                }
            }
        }

        // ── 2. Voted messages ────────────────────────────────────────
        let messages = match self.source.subthread_messages(subthread_id).await {
            Ok(messages) => messages,
            Err(e) => {
                failed = true;
                warn!(subthread_id = %subthread_id, error = %e, "failed to fetch forum messages");
                Vec::new()
            }
        };
        let voted: Vec<&ForumMessage> = messages.iter().filter(|m| m.is_voted()).collect();

        // ── 3. Assemble ──────────────────────────────────────────────
        let text = render(initial.as_deref(), &voted);
        let outcome = if initial.is_some() || !voted.is_empty() {
            ContextOutcome::Context
        } else if failed {
            ContextOutcome::Unavailable
        } else {
            ContextOutcome::Empty
        };

        TraceEvent::ForumContextBuilt {
            subthread_id: subthread_id.to_owned(),
            outcome: outcome.as_str().to_owned(),
            voted_messages: voted.len(),
            context_chars: text.chars().count(),
        }
        .emit();

        ForumContext {
            text,
            outcome,
            voted: voted.len(),
        }
    }
}

fn render(initial: Option<&str>, voted: &[&ForumMessage]) -> String {
    let mut sections = vec![HEADER.to_owned()];

    if let Some(initial) = initial {
        sections.push(format!("Initial message: {initial}"));
    }

    if !voted.is_empty() {
        let mut block = String::from(VOTED_HEADING);
        for msg in voted {
            block.push_str(&format!("\n- {} (upvotes: {})", msg.body, msg.upvote_count));
        }
        sections.push(block);
    }

    sections.join("\n")
}
