use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Completion provider
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Connection settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Identifier used in logs and error messages.
    #[serde(default = "d_provider_id")]
    pub id: String,
    /// Base URL up to (not including) `/chat/completions`.
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion request.
    #[serde(default = "d_model")]
    pub model: String,
    /// Upper bound for a single completion call. Exhaustion fails the turn.
    #[serde(default = "d_30")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            id: d_provider_id(),
            base_url: d_base_url(),
            model: d_model(),
            timeout_secs: 30,
            auth: AuthConfig::default(),
        }
    }
}

/// Where the API key comes from. Resolution order: `key`, keychain
/// (`service` + `account`), `env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header name (e.g. "Authorization", "api-key").
    #[serde(default)]
    pub header: Option<String>,
    /// Header value prefix (e.g. "Bearer ").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Env var containing the key.
    #[serde(default = "d_key_env")]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env or keychain).
    #[serde(default)]
    pub key: Option<String>,
    /// Keychain service name (e.g., "forumchat").
    #[serde(default)]
    pub service: Option<String>,
    /// Keychain account name (e.g., "openai-api-key").
    #[serde(default)]
    pub account: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: None,
            prefix: None,
            env: d_key_env(),
            key: None,
            service: None,
            account: None,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_provider_id() -> String {
    "openai".into()
}
fn d_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn d_model() -> String {
    "gpt-3.5-turbo".into()
}
fn d_30() -> u64 {
    30
}
fn d_key_env() -> Option<String> {
    Some("OPENAI_API_KEY".into())
}
