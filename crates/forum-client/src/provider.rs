//! The `ForumSource` trait defines the read surface of the forum service
//! (REST, test doubles).

use async_trait::async_trait;
use fc_domain::error::Result;

use crate::types::{ForumMessage, ForumSubthread};

/// Read-only view of the forum service.
///
/// Implementations report failures; callers that must not fail (the context
/// builder) absorb them.
#[async_trait]
pub trait ForumSource: Send + Sync {
    /// All messages of a subthread, in service order
    /// (GET /subthreads/{id}/messages).
    async fn subthread_messages(&self, subthread_id: &str) -> Result<Vec<ForumMessage>>;

    /// Subthreads of a thread, without their messages
    /// (GET /threads/{id}/subthreads?includeMessages=false).
    async fn thread_subthreads(&self, thread_id: &str) -> Result<Vec<ForumSubthread>>;
}
