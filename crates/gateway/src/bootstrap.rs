//! AppState construction shared by `serve` and `run`, so the one-shot CLI
//! boots exactly the runtime the HTTP server does.

use std::sync::Arc;

use anyhow::Context;

use fc_domain::config::{Config, ConfigSeverity};
use fc_forum::{ForumSource, RestForumClient};
use fc_providers::{CompletionProvider, OpenAiCompatProvider};
use fc_sessions::{SessionRepository, SessionStore};

use crate::runtime::{ChatSettings, ConversationOrchestrator};
use crate::state::AppState;

/// Log every config issue and fail when any of them is an error.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("config validation failed with {errors} error(s)");
    }
    Ok(())
}

/// Validate config, open the session store, build the provider and forum
/// clients, and return a fully-wired [`AppState`].
pub async fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    check_config(&config)?;

    // ── Session store ────────────────────────────────────────────────
    let sessions: Arc<dyn SessionRepository> = Arc::new(
        SessionStore::open(&config.store.state_path).context("opening session store")?,
    );

    // ── Completion provider ──────────────────────────────────────────
    let provider: Arc<dyn CompletionProvider> = Arc::new(
        OpenAiCompatProvider::from_config(&config.llm)
            .context("initializing completion provider")?,
    );
    tracing::info!(
        provider = %config.llm.id,
        url = %config.llm.base_url,
        model = %config.llm.model,
        "completion provider ready"
    );

    // ── Forum client ─────────────────────────────────────────────────
    let forum: Arc<dyn ForumSource> = Arc::new(
        RestForumClient::new(&config.forum).context("creating forum client")?,
    );
    tracing::info!(url = %config.forum.base_url, "forum client ready");

    Ok(assemble_state(config, sessions, provider, forum))
}

/// Wire an [`AppState`] from already-built collaborators.
pub fn assemble_state(
    config: Arc<Config>,
    sessions: Arc<dyn SessionRepository>,
    provider: Arc<dyn CompletionProvider>,
    forum: Arc<dyn ForumSource>,
) -> AppState {
    let settings = ChatSettings {
        model: config.llm.model.clone(),
        system_prompt: config.chat.system_prompt.clone(),
    };
    let orchestrator = Arc::new(ConversationOrchestrator::new(
        sessions, provider, forum, settings,
    ));
    AppState {
        config,
        orchestrator,
    }
}
