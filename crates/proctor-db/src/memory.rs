//! In-process fallback storage.
//!
//! Holds session records in insertion order for the lifetime of the process.
//! Nothing is persisted. Ids are the insert's wall-clock milliseconds, bumped to
//! `last + 1` when two inserts land in the same millisecond, so ids stay
//! unique and strictly increasing under concurrent inserts.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use proctor_core::entities::{SessionInput, SessionRecord};
use proctor_core::ids::{SessionId, SessionKey};

#[derive(Debug, Default)]
struct MemoryState {
    sessions: Vec<SessionRecord>,
    last_id: Option<i64>,
}

/// Shared in-memory session collection.
///
/// Inserts serialize on a write lock (id assignment and append happen in one
/// critical section). Reads share a read lock and return clones.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a session stamped at `created_at` and return its fallback id.
    pub async fn insert(&self, session: SessionInput, created_at: DateTime<Utc>) -> SessionId {
        let mut state = self.state.write().await;

        let now_ms = created_at.timestamp_millis();
        let id = match state.last_id {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        state.last_id = Some(id);
        state
            .sessions
            .push(SessionRecord::new(SessionId::Fallback(id), session, created_at));

        tracing::debug!(id, "session stored in memory");
        SessionId::Fallback(id)
    }

    /// Snapshot of all sessions in insertion order.
    pub async fn list(&self) -> Vec<SessionRecord> {
        self.state.read().await.sessions.clone()
    }

    /// Linear scan for the session matching `key`.
    ///
    /// Only numeric keys can match: fallback records have no native id.
    pub async fn get(&self, key: &SessionKey) -> Option<SessionRecord> {
        self.state
            .read()
            .await
            .sessions
            .iter()
            .find(|record| key.matches(&record.id))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
