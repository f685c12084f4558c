use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Discussion (forum) service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumConfig {
    /// Base URL of the forum REST API, e.g. `http://forum:8081/api`.
    #[serde(default = "d_forum_url")]
    pub base_url: String,
    /// Per-request timeout. A timed-out call degrades to "no context".
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
    /// Optional key sent as `X-Api-Key`.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: d_forum_url(),
            timeout_ms: 30_000,
            api_key: None,
        }
    }
}

fn d_forum_url() -> String {
    "http://localhost:8081/api".into()
}
fn d_30000() -> u64 {
    30_000
}
