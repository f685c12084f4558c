//! Conversation orchestrator: resolves sessions, runs one turn against the
//! completion provider, persists the exchange, and serves the read-side
//! projections.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;

use fc_domain::error::{Error, Result};
use fc_domain::session::{Message, Role, Session, SessionSummary};
use fc_domain::trace::TraceEvent;
use fc_forum::{ForumContextBuilder, ForumSource};
use fc_providers::{CompletionProvider, CompletionRequest};
use fc_sessions::{history_window, summarize, SessionRepository};

use super::prompt;
use super::session_lock::SessionLockMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Turn parameters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Model and default system instruction, fixed at construction.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub system_prompt: String,
}

/// A session ready for a turn, plus whether this request created it.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session: Session,
    pub is_new: bool,
}

/// Input to a single turn.
#[derive(Debug, Clone, Default)]
pub struct TurnInput {
    pub message: String,
    /// Free text appended to the system instruction for this turn only.
    pub context: Option<String>,
    /// Forum subthread whose discussion seeds a new session.
    pub subthread_id: Option<String>,
    /// Thread owning `subthread_id`; enables the opening-post lookup.
    pub thread_id: Option<String>,
}

/// Result of a completed turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub session_id: String,
    pub message: String,
    pub user_id: String,
    /// Epoch milliseconds at completion.
    pub timestamp: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Orchestrator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ConversationOrchestrator {
    sessions: Arc<dyn SessionRepository>,
    provider: Arc<dyn CompletionProvider>,
    forum: Arc<dyn ForumSource>,
    locks: SessionLockMap,
    settings: ChatSettings,
}

impl ConversationOrchestrator {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        provider: Arc<dyn CompletionProvider>,
        forum: Arc<dyn ForumSource>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            sessions,
            provider,
            forum,
            locks: SessionLockMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    // ── resolution ───────────────────────────────────────────────────

    fn fresh_session(&self, user_id: &str) -> ResolvedSession {
        ResolvedSession {
            session: Session::new(user_id, self.settings.system_prompt.clone()),
            is_new: true,
        }
    }

    fn resolved(&self, resolved: ResolvedSession) -> ResolvedSession {
        TraceEvent::SessionResolved {
            session_id: resolved.session.session_id.clone(),
            user_id: resolved.session.user_id.clone(),
            is_new: resolved.is_new,
        }
        .emit();
        resolved
    }

    /// Send-path resolution. No id → new session. An id must belong to
    /// `user_id`, otherwise [`Error::SessionNotFound`].
    pub async fn resolve_strict(
        &self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<ResolvedSession> {
        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return Ok(self.resolved(self.fresh_session(user_id)));
        };

        let session = self
            .sessions
            .find_by_id_and_owner(session_id, user_id)
            .await?
            .ok_or_else(|| Error::SessionNotFound(session_id.to_owned()))?;

        Ok(self.resolved(ResolvedSession {
            session,
            is_new: false,
        }))
    }

    /// Continue-path resolution. Looks the id up regardless of owner; an
    /// unknown id starts a new session (with a fresh id) for `user_id`, or
    /// fails with [`Error::SessionNotFound`] when no owner is given.
    pub async fn resolve_lenient(
        &self,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<ResolvedSession> {
        if let Some(session) = self.sessions.find_by_id(session_id).await? {
            return Ok(self.resolved(ResolvedSession {
                session,
                is_new: false,
            }));
        }

        match user_id.filter(|u| !u.is_empty()) {
            Some(user_id) => {
                tracing::info!(
                    requested = %session_id,
                    user_id = %user_id,
                    "unknown session on continue, starting a new one"
                );
                Ok(self.resolved(self.fresh_session(user_id)))
            }
            None => Err(Error::SessionNotFound(session_id.to_owned())),
        }
    }

    // ── turns ────────────────────────────────────────────────────────

    /// Run one turn on an already resolved session.
    ///
    /// The store is written only when the provider produced a completion.
    pub async fn send_turn(
        &self,
        resolved: ResolvedSession,
        input: TurnInput,
    ) -> Result<TurnOutcome> {
        let ResolvedSession {
            mut session,
            is_new,
        } = resolved;
        let first_turn = is_new && session.messages.is_empty();

        session.push(Role::User, input.message.as_str());

        if first_turn {
            if let Some(subthread_id) = input.subthread_id.as_deref().filter(|s| !s.is_empty()) {
                let context = ForumContextBuilder::new(self.forum.as_ref())
                    .build(subthread_id, input.thread_id.as_deref())
                    .await;
                session.system_instruction.push_str("\n\n");
                session.system_instruction.push_str(&context.text);
            }
        }

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: prompt::assemble(&session, input.context.as_deref()),
        };

        let started = Instant::now();
        let response = self.provider.complete(&request).await?;
        tracing::debug!(
            session_id = %session.session_id,
            provider = %self.provider.provider_id(),
            duration_ms = started.elapsed().as_millis() as u64,
            "completion received"
        );

        let assistant_text = response
            .first_content()
            .ok_or_else(|| Error::Provider {
                provider: self.provider.provider_id().to_owned(),
                message: "no completion candidates returned".into(),
            })?
            .to_owned();

        session.push(Role::Assistant, assistant_text.as_str());
        session.updated_at = Utc::now();
        let saved = self.sessions.save(session).await?;

        Ok(TurnOutcome {
            session_id: saved.session_id,
            message: assistant_text,
            user_id: saved.user_id,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    /// Send path: strict resolution, then one turn, serialized per session.
    pub async fn send(
        &self,
        user_id: &str,
        session_id: Option<&str>,
        input: TurnInput,
    ) -> Result<TurnOutcome> {
        let span = tracing::info_span!("turn", path = "send", user_id = %user_id);
        let outcome = async {
            let _turn = match session_id.filter(|id| !id.is_empty()) {
                Some(id) => Some(self.locks.acquire(id).await),
                None => None,
            };
            let resolved = self.resolve_strict(user_id, session_id).await?;
            self.send_turn(resolved, input).await
        }
        .instrument(span)
        .await;
        self.locks.prune_idle();
        outcome
    }

    /// Continue path: lenient resolution, then one turn, serialized per
    /// session.
    pub async fn continue_session(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        input: TurnInput,
    ) -> Result<TurnOutcome> {
        let span = tracing::info_span!("turn", path = "continue", session_id = %session_id);
        let outcome = async {
            let _turn = self.locks.acquire(session_id).await;
            let resolved = self.resolve_lenient(session_id, user_id).await?;
            self.send_turn(resolved, input).await
        }
        .instrument(span)
        .await;
        self.locks.prune_idle();
        outcome
    }

    // ── reads ────────────────────────────────────────────────────────

    /// All sessions of `user_id`, in store order.
    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        self.sessions.find_by_owner(user_id).await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Session> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| Error::SessionNotFound(session_id.to_owned()))
    }

    pub async fn list_summaries(&self, user_id: &str) -> Result<Vec<SessionSummary>> {
        Ok(self
            .list_sessions(user_id)
            .await?
            .iter()
            .map(summarize)
            .collect())
    }

    /// The last `limit` messages of a session; `limit <= 0` means all.
    pub async fn get_history(&self, session_id: &str, limit: i64) -> Result<Vec<Message>> {
        let session = self.get_session(session_id).await?;
        Ok(history_window(&session.messages, limit).to_vec())
    }
}
