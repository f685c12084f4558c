use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of the JSON session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `sessions/sessions.json`.
    #[serde(default = "d_state_path")]
    pub state_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_path: d_state_path(),
        }
    }
}

fn d_state_path() -> PathBuf {
    PathBuf::from("./data")
}
