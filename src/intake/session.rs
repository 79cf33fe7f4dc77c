//! Per-session conversation state storage.
//!
//! Each HTTP request is stateless; the session store is the dialogue's
//! only memory. State is held as raw JSON so a malformed blob surfaces at
//! deserialization time, where the service can recover from it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Keyed storage for per-session conversation state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored state for a session, if any.
    async fn load(&self, session_id: &str) -> Option<serde_json::Value>;

    /// Store the state for a session, replacing any previous value.
    async fn save(&self, session_id: &str, state: serde_json::Value);

    /// Drop the stored state for a session.
    async fn clear(&self, session_id: &str);
}

/// In-process session store.
///
/// Conversation state does not outlive the process; the dialogue restarts
/// cleanly after a restart, so a map behind an async lock is enough.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Option<serde_json::Value> {
        self.entries.read().await.get(session_id).cloned()
    }

    async fn save(&self, session_id: &str, state: serde_json::Value) {
        self.entries
            .write()
            .await
            .insert(session_id.to_string(), state);
    }

    async fn clear(&self, session_id: &str) {
        self.entries.write().await.remove(session_id);
    }
}

/// Per-session mutual exclusion for the load → transition → save cycle.
///
/// Concurrent requests for the same session would otherwise race on the
/// read-modify-write and lose updates. Sessions lock independently, so one
/// slow commit does not block other sessions.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one session, creating it on first use.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(
                locks
                    .entry(session_id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}
