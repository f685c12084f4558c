use serde::{Deserialize, Serialize};

/// Conversation defaults applied to every new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System instruction a new session starts with.
    #[serde(default = "d_system_prompt")]
    pub system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: d_system_prompt(),
        }
    }
}

fn d_system_prompt() -> String {
    "You are a helpful assistant.".into()
}
