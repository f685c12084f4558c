//! In-process doubles for the three collaborators of the orchestrator.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use fc_domain::config::Config;
use fc_domain::error::{Error, Result};
use fc_domain::session::Session;
use fc_forum::{ForumMessage, ForumSource, ForumSubthread};
use fc_gateway::bootstrap::assemble_state;
use fc_gateway::state::AppState;
use fc_providers::{
    Choice, ChoiceMessage, CompletionProvider, CompletionRequest, CompletionResponse,
};
use fc_sessions::{SessionRepository, SessionStore};

// ── session store ────────────────────────────────────────────────────

/// The in-memory store, counting saves.
pub struct CountingStore {
    inner: SessionStore,
    saves: AtomicUsize,
}

impl Default for CountingStore {
    fn default() -> Self {
        Self {
            inner: SessionStore::in_memory(),
            saves: AtomicUsize::new(0),
        }
    }
}

impl CountingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for CountingStore {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        self.inner.find_by_id(session_id).await
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Session>> {
        self.inner.find_by_owner(user_id).await
    }

    async fn find_by_id_and_owner(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<Option<Session>> {
        self.inner.find_by_id_and_owner(session_id, user_id).await
    }

    async fn save(&self, session: Session) -> Result<Session> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(session).await
    }
}

// ── completion provider ──────────────────────────────────────────────

/// Replies from a script; an exhausted script echoes a fixed reply.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

pub fn reply(text: &str) -> CompletionResponse {
    CompletionResponse {
        choices: vec![Choice {
            message: ChoiceMessage {
                content: text.to_owned(),
            },
            finish_reason: Some("stop".into()),
        }],
        ..Default::default()
    }
}

impl ScriptedProvider {
    pub fn then(self, response: Result<CompletionResponse>) -> Self {
        self.script.lock().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().push(req.clone());
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(reply("Hello! How can I help you today?")))
    }

    fn provider_id(&self) -> &str {
        "scripted"
    }
}

// ── forum ────────────────────────────────────────────────────────────

/// Serves canned forum data; `down()` makes every call fail.
#[derive(Default)]
pub struct FakeForum {
    messages: Vec<ForumMessage>,
    subthreads: Vec<ForumSubthread>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl FakeForum {
    pub fn with_messages(messages: Vec<ForumMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn subthreads(mut self, subthreads: Vec<ForumSubthread>) -> Self {
        self.subthreads = subthreads;
        self
    }

    pub fn down() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForumSource for FakeForum {
    async fn subthread_messages(&self, _subthread_id: &str) -> Result<Vec<ForumMessage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Error::Http("connection refused".into()));
        }
        Ok(self.messages.clone())
    }

    async fn thread_subthreads(&self, _thread_id: &str) -> Result<Vec<ForumSubthread>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Error::Http("connection refused".into()));
        }
        Ok(self.subthreads.clone())
    }
}

pub fn voted(body: &str, upvotes: i64) -> ForumMessage {
    ForumMessage {
        id: body.to_owned(),
        body: body.to_owned(),
        upvote_count: upvotes,
        ..Default::default()
    }
}

// ── harness ──────────────────────────────────────────────────────────

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub struct Harness {
    pub store: Arc<CountingStore>,
    pub provider: Arc<ScriptedProvider>,
    pub forum: Arc<FakeForum>,
    pub state: AppState,
}

pub fn harness(provider: ScriptedProvider, forum: FakeForum) -> Harness {
    let mut config = Config::default();
    config.chat.system_prompt = SYSTEM_PROMPT.into();
    config.llm.model = "gpt-3.5-turbo".into();

    let store = Arc::new(CountingStore::default());
    let provider = Arc::new(provider);
    let forum = Arc::new(forum);
    let state = assemble_state(
        Arc::new(config),
        store.clone(),
        provider.clone(),
        forum.clone(),
    );
    Harness {
        store,
        provider,
        forum,
        state,
    }
}
