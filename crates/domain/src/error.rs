/// Shared error type used across all ForumChat crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session {session_id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        session_id: String,
        expected: u64,
        found: u64,
    },

    #[error("validation: {0}")]
    Validation(String),

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for every failure that originates in the completion provider
    /// call: empty or malformed responses, HTTP errors and timeouts.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Error::Provider { .. } | Error::Http(_) | Error::Timeout(_) | Error::Auth(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
