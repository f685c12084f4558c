//! The `SessionRepository` trait: the storage contract the orchestrator
//! depends on.

use async_trait::async_trait;
use fc_domain::error::Result;
use fc_domain::session::Session;

/// Durable session storage addressable by session id and by owner.
///
/// Implementations may be the bundled JSON file store, a document database
/// adapter, or a test double.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Point lookup by session id.
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// All sessions owned by `user_id`, in store order.
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Session>>;

    /// Point lookup scoped to an owner. A session owned by someone else is
    /// reported as absent.
    async fn find_by_id_and_owner(&self, session_id: &str, user_id: &str)
        -> Result<Option<Session>>;

    /// Full overwrite-save.
    ///
    /// Assigns a storage-internal `record_id` on first save. Fails with
    /// [`Error::Conflict`](fc_domain::error::Error::Conflict) when the stored
    /// copy carries a different `version` than `session`; on success the
    /// returned session carries the incremented version.
    async fn save(&self, session: Session) -> Result<Session>;
}
