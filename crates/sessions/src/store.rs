//! JSON-file session store.
//!
//! Persists every session in `sessions.json` under the configured state
//! path. Reads are served from an in-memory map; each save rewrites the file
//! before the map is updated, so the map never holds state the disk lacks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use fc_domain::error::{Error, Result};
use fc_domain::session::Session;
use fc_domain::trace::TraceEvent;

use crate::repository::SessionRepository;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Session store backed by a JSON file (or by memory only, for tests and
/// the one-shot CLI).
pub struct SessionStore {
    /// `None` for a memory-only store.
    sessions_path: Option<PathBuf>,
    sessions: RwLock<HashMap<String, Session>>,
    /// Serializes the check-write-commit sequence of `save`.
    write_lock: tokio::sync::Mutex<()>,
}

impl SessionStore {
    /// Load or create the store at `state_path/sessions/sessions.json`.
    pub fn open(state_path: &Path) -> Result<Self> {
        let dir = state_path.join("sessions");
        std::fs::create_dir_all(&dir).map_err(Error::Io)?;

        let sessions_path = dir.join("sessions.json");
        let sessions: HashMap<String, Session> = if sessions_path.exists() {
            let raw = std::fs::read_to_string(&sessions_path).map_err(Error::Io)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };

        tracing::info!(
            sessions = sessions.len(),
            path = %sessions_path.display(),
            "session store loaded"
        );

        Ok(Self {
            sessions_path: Some(sessions_path),
            sessions: RwLock::new(sessions),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            sessions_path: None,
            sessions: RwLock::new(HashMap::new()),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    async fn write_snapshot(&self, snapshot: &HashMap<String, Session>) -> Result<()> {
        let Some(path) = self.sessions_path.clone() else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::Other(format!("serializing sessions: {e}")))?;

        // Write to a sibling temp file, then rename over the live file.
        tokio::task::spawn_blocking(move || {
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, json).map_err(Error::Io)?;
            std::fs::rename(&tmp, &path).map_err(Error::Io)?;
            Ok::<(), Error>(())
        })
        .await
        .map_err(|e| Error::Other(format!("spawn_blocking join: {e}")))?
    }
}

/// Store order: oldest session first, ties broken by id.
fn sort_store_order(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().get(session_id).cloned())
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Session>> {
        let mut owned: Vec<Session> = self
            .sessions
            .read()
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sort_store_order(&mut owned);
        Ok(owned)
    }

    async fn find_by_id_and_owner(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .read()
            .get(session_id)
            .filter(|s| s.user_id == user_id)
            .cloned())
    }

    async fn save(&self, mut session: Session) -> Result<Session> {
        let _guard = self.write_lock.lock().await;

        let mut snapshot = {
            let sessions = self.sessions.read();
            if let Some(stored) = sessions.get(&session.session_id) {
                if stored.version != session.version {
                    return Err(Error::Conflict {
                        session_id: session.session_id.clone(),
                        expected: session.version,
                        found: stored.version,
                    });
                }
            }
            sessions.clone()
        };

        if session.record_id.is_none() {
            session.record_id = Some(uuid::Uuid::new_v4().to_string());
        }
        session.version += 1;
        snapshot.insert(session.session_id.clone(), session.clone());

        self.write_snapshot(&snapshot).await?;
        *self.sessions.write() = snapshot;

        TraceEvent::SessionSaved {
            session_id: session.session_id.clone(),
            version: session.version,
            messages: session.messages.len(),
        }
        .emit();

        Ok(session)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
