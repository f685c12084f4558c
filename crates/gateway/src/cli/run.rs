//! `forumchat run`: one-shot turn without the HTTP server.
//!
//! Boots the same runtime as `serve`, runs one turn, prints the reply and
//! exits. Useful for scripting and quick checks against a live provider.

use std::sync::Arc;

use fc_domain::config::Config;

use crate::bootstrap;
use crate::runtime::TurnInput;

/// Arguments of `forumchat run`.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub message: String,
    pub user: String,
    pub session: Option<String>,
    pub context: Option<String>,
    pub subthread: Option<String>,
    pub thread: Option<String>,
    pub json: bool,
}

/// Execute a single turn and print the reply.
pub async fn run(config: Arc<Config>, args: RunArgs) -> anyhow::Result<()> {
    if args.message.trim().is_empty() {
        anyhow::bail!("message must not be blank");
    }

    let state = bootstrap::build_app_state(config).await?;

    let input = TurnInput {
        message: args.message,
        context: args.context,
        subthread_id: args.subthread,
        thread_id: args.thread,
    };
    let outcome = state
        .orchestrator
        .send(&args.user, args.session.as_deref(), input)
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| anyhow::anyhow!("serializing outcome: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", outcome.message);
        eprintln!("session: {}", outcome.session_id);
    }

    Ok(())
}
