//! Per-session turn serialization.
//!
//! Only one turn runs per session id at a time. A second message for the
//! same session waits until the first turn has saved, so it reads the
//! updated history instead of racing it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as TurnLock, OwnedMutexGuard};

/// Held for the duration of one turn; releases on drop.
pub type TurnGuard = OwnedMutexGuard<()>;

/// Manages per-session turn locks.
///
/// Each session id maps to an async mutex. Waiters are served in arrival
/// order.
pub struct SessionLockMap {
    locks: Mutex<HashMap<String, Arc<TurnLock<()>>>>,
}

impl Default for SessionLockMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLockMap {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the turn lock for `session_id`, waiting for any turn already
    /// in flight.
    pub async fn acquire(&self, session_id: &str) -> TurnGuard {
        let lock = {
            let mut locks = self.locks.lock();
            locks
                .entry(session_id.to_owned())
                .or_insert_with(|| Arc::new(TurnLock::new(())))
                .clone()
        };

        lock.lock_owned().await
    }

    /// Number of tracked sessions.
    pub fn session_count(&self) -> usize {
        self.locks.lock().len()
    }

    /// Forget locks nobody holds or waits on.
    ///
    /// Guards and waiters keep their own `Arc`, so a count of one means the
    /// map is the only owner.
    pub fn prune_idle(&self) {
        let mut locks = self.locks.lock();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
