pub mod config;
pub mod run;

use clap::{Parser, Subcommand};

/// ForumChat: a conversation service with forum-aware context.
#[derive(Debug, Parser)]
#[command(name = "forumchat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Send a single message and print the reply.
    Run {
        /// The message to send.
        message: String,
        /// Owning user id.
        #[arg(long, default_value = "cli")]
        user: String,
        /// Continue this session instead of starting a new one.
        #[arg(long)]
        session: Option<String>,
        /// Ad-hoc context appended to the system instruction for this turn.
        #[arg(long)]
        context: Option<String>,
        /// Forum subthread used to seed a new session.
        #[arg(long)]
        subthread: Option<String>,
        /// Forum thread owning `--subthread`.
        #[arg(long)]
        thread: Option<String>,
        /// Output the full outcome as JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `FC_CONFIG` (or `config.toml`
/// by default). A missing file yields the defaults. Returns the parsed
/// [`Config`](fc_domain::config::Config) and the path that was used.
pub fn load_config() -> anyhow::Result<(fc_domain::config::Config, String)> {
    let config_path = std::env::var("FC_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        fc_domain::config::Config::default()
    };

    Ok((config, config_path))
}
