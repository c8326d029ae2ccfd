//! Durable-or-fallback session store.
//!
//! `SessionStore` decides its storage mode once. [`SessionStore::connect`]
//! starts the durable connection attempt on a background task and returns
//! immediately in [`StoreMode::Connecting`]. The outcome is published on a
//! `watch` channel; every operation waits for it before touching storage, so
//! no request can run against a half-decided mode. Once resolved, the mode is
//! fixed for the life of the store.
//!
//! ```text
//! connect() ──spawn──► open backend (bounded by connect timeout)
//!    │                   ├─ ok  ──► Durable(ProctorDb)
//!    │                   └─ err ──► Fallback(MemoryStore)   (logged, not returned)
//!    ▼
//! insert / list_all / get_by_id ──wait for resolution──► active backend
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{OnceCell, watch};

use proctor_config::{BackendConfig, BackendTarget, ConfigError};
use proctor_core::entities::{SessionInput, SessionRecord};
use proctor_core::enums::StoreMode;
use proctor_core::ids::{SessionId, SessionKey};

use crate::ProctorDb;
use crate::error::StoreError;
use crate::memory::MemoryStore;

/// Storage behind a resolved store.
#[derive(Clone)]
enum Backend {
    Connecting,
    Durable(Arc<ProctorDb>),
    Fallback(Arc<MemoryStore>),
}

impl Backend {
    const fn mode(&self) -> StoreMode {
        match self {
            Self::Connecting => StoreMode::Connecting,
            Self::Durable(_) => StoreMode::Durable,
            Self::Fallback(_) => StoreMode::Fallback,
        }
    }

    fn fallback() -> Self {
        Self::Fallback(Arc::new(MemoryStore::new()))
    }
}

struct StoreInner {
    announced: watch::Receiver<Backend>,
    resolved: OnceCell<Backend>,
}

/// Session persistence with a single mode for its whole lifetime.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Start resolving the store mode in the background.
    ///
    /// Returns at once. Must be called from within a tokio runtime.
    #[must_use]
    pub fn connect(config: &BackendConfig) -> Self {
        let (tx, rx) = watch::channel(Backend::Connecting);
        let target = config.target();
        let timeout = config.connect_timeout();

        tokio::spawn(async move {
            let backend = resolve_backend(target, timeout).await;
            if tx.send(backend).is_err() {
                tracing::debug!("session store dropped before its backend resolved");
            }
        });

        Self::from_receiver(rx)
    }

    /// A store already resolved to the durable backend.
    #[must_use]
    pub fn durable(db: ProctorDb) -> Self {
        Self::resolved(Backend::Durable(Arc::new(db)))
    }

    /// A store already resolved to an empty in-memory fallback.
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// A store already resolved to the given in-memory fallback.
    #[must_use]
    pub fn from_memory(memory: MemoryStore) -> Self {
        Self::resolved(Backend::Fallback(Arc::new(memory)))
    }

    fn resolved(backend: Backend) -> Self {
        let (_tx, rx) = watch::channel(backend);
        Self::from_receiver(rx)
    }

    fn from_receiver(announced: watch::Receiver<Backend>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                announced,
                resolved: OnceCell::new(),
            }),
        }
    }

    /// Current mode, without waiting. May be `Connecting`.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        match self.inner.resolved.get() {
            Some(backend) => backend.mode(),
            None => self.inner.announced.borrow().mode(),
        }
    }

    /// Wait until the mode is decided and return it.
    pub async fn wait_resolved(&self) -> StoreMode {
        self.backend().await.mode()
    }

    /// The resolved backend. The first caller waits for the start-up attempt;
    /// everyone after reads the memoized result.
    async fn backend(&self) -> Backend {
        self.inner
            .resolved
            .get_or_init(|| async {
                let mut announced = self.inner.announced.clone();
                let result = announced
                    .wait_for(|b| b.mode().is_resolved())
                    .await
                    .map(|b| b.clone());
                match result {
                    Ok(backend) => backend,
                    Err(_) => {
                        tracing::warn!(
                            "backend connection task ended without a result; using in-memory fallback"
                        );
                        Backend::fallback()
                    }
                }
            })
            .await
            .clone()
    }

    /// Validate, stamp `created_at`, and store a session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for an invalid record, or the backend
    /// error if the durable insert fails.
    pub async fn insert(&self, session: SessionInput) -> Result<SessionId, StoreError> {
        session.validate()?;
        let created_at = Utc::now();

        match self.backend().await {
            Backend::Durable(db) => {
                let id = db.insert_session(&session, created_at, None).await?;
                Ok(SessionId::Native(id))
            }
            Backend::Fallback(memory) => Ok(memory.insert(session, created_at).await),
            Backend::Connecting => Err(unresolved()),
        }
    }

    /// All stored sessions. Insertion order in both modes.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the durable query fails.
    pub async fn list_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        match self.backend().await {
            Backend::Durable(db) => db.list_sessions().await,
            Backend::Fallback(memory) => Ok(memory.list().await),
            Backend::Connecting => Err(unresolved()),
        }
    }

    /// Look up a session by either id form.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the durable query fails. No match is `Ok(None)`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<SessionRecord>, StoreError> {
        self.get_by_key(&SessionKey::parse(id)).await
    }

    /// Look up a session by a parsed key.
    ///
    /// Durable mode resolves native keys against the primary key and numeric
    /// keys against `legacy_id`. Fallback mode compares numeric keys with the
    /// fallback ids.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the durable query fails. No match is `Ok(None)`.
    pub async fn get_by_key(&self, key: &SessionKey) -> Result<Option<SessionRecord>, StoreError> {
        match self.backend().await {
            Backend::Durable(db) => match key {
                SessionKey::Native(id) => db.get_session(id).await,
                SessionKey::Numeric(n) => db.get_session_by_legacy_id(*n).await,
                SessionKey::Unrecognized => Ok(None),
            },
            Backend::Fallback(memory) => Ok(memory.get(key).await),
            Backend::Connecting => Err(unresolved()),
        }
    }

    /// Copy an exported record into the durable backend.
    ///
    /// A record that already has a native id keeps it; a fallback record gets
    /// a fresh one. `created_at` is kept, and the numeric id (fallback id, or
    /// an earlier `legacy_id`) is preserved as `legacy_id` so numeric lookups
    /// still find it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` in fallback mode, `StoreError::Validation`
    /// for an invalid record, or the backend error if the insert fails.
    pub async fn import(&self, record: SessionRecord) -> Result<SessionId, StoreError> {
        record.session.validate()?;
        match self.backend().await {
            Backend::Durable(db) => {
                let legacy_id = record.numeric_id();
                let id = match record.id.as_native() {
                    Some(native) => {
                        db.insert_session_with_id(
                            native,
                            &record.session,
                            record.created_at,
                            legacy_id,
                        )
                        .await?;
                        native.to_owned()
                    }
                    None => {
                        db.insert_session(&record.session, record.created_at, legacy_id)
                            .await?
                    }
                };
                tracing::debug!(%id, ?legacy_id, "session imported");
                Ok(SessionId::Native(id))
            }
            Backend::Fallback(_) => Err(StoreError::InvalidState(
                "import requires the durable backend".into(),
            )),
            Backend::Connecting => Err(unresolved()),
        }
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the durable query fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        match self.backend().await {
            Backend::Durable(db) => db.count_sessions().await,
            Backend::Fallback(memory) => Ok(u64::try_from(memory.len().await).unwrap_or(u64::MAX)),
            Backend::Connecting => Err(unresolved()),
        }
    }
}

fn unresolved() -> StoreError {
    StoreError::InvalidState("store mode is not resolved".into())
}

/// Run the start-up connection attempt and decide the mode.
///
/// Never fails: every problem becomes a logged fallback.
async fn resolve_backend(target: Result<BackendTarget, ConfigError>, timeout: Duration) -> Backend {
    let opened = match target {
        Ok(BackendTarget::Remote { url, auth_token }) => {
            tokio::time::timeout(timeout, ProctorDb::open_remote(&url, &auth_token)).await
        }
        Ok(BackendTarget::Local { path }) => {
            tokio::time::timeout(timeout, ProctorDb::open_local(&path)).await
        }
        Ok(BackendTarget::Unconfigured) => {
            tracing::info!("no durable backend configured; sessions will be kept in memory only");
            return Backend::fallback();
        }
        Err(error) => {
            tracing::warn!(%error, "invalid backend configuration; sessions will be kept in memory only");
            return Backend::fallback();
        }
    };

    match opened {
        Ok(Ok(db)) => {
            tracing::info!(remote = db.is_remote(), "durable session backend connected");
            Backend::Durable(Arc::new(db))
        }
        Ok(Err(error)) => {
            tracing::warn!(%error, "durable backend unavailable; sessions will be kept in memory only");
            Backend::fallback()
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "durable backend connection timed out; sessions will be kept in memory only"
            );
            Backend::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::sample_input;

    async fn durable_store() -> SessionStore {
        SessionStore::durable(ProctorDb::open_local(":memory:").await.unwrap())
    }

    #[tokio::test]
    async fn resolved_constructors_report_mode() {
        assert_eq!(SessionStore::fallback().mode(), StoreMode::Fallback);
        assert_eq!(durable_store().await.mode(), StoreMode::Durable);
    }

    #[tokio::test]
    async fn unconfigured_backend_resolves_to_fallback() {
        let store = SessionStore::connect(&BackendConfig::default());
        assert_eq!(store.wait_resolved().await, StoreMode::Fallback);
        assert_eq!(store.mode(), StoreMode::Fallback);
    }

    #[tokio::test]
    async fn local_path_resolves_to_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.db");
        let config = BackendConfig {
            path: path.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let store = SessionStore::connect(&config);
        assert_eq!(store.wait_resolved().await, StoreMode::Durable);
    }

    #[tokio::test]
    async fn store_dropped_while_connecting_is_harmless() {
        drop(SessionStore::connect(&BackendConfig::default()));
        tokio::task::yield_now().await;

        let store = SessionStore::connect(&BackendConfig::default());
        assert_eq!(store.wait_resolved().await, StoreMode::Fallback);
    }

    #[tokio::test]
    async fn unreachable_remote_resolves_to_fallback() {
        let config = BackendConfig {
            url: "http://127.0.0.1:9".into(),
            connect_timeout_secs: 5,
            ..Default::default()
        };
        let store = SessionStore::connect(&config);
        assert_eq!(store.wait_resolved().await, StoreMode::Fallback);
    }

    #[tokio::test]
    async fn invalid_config_resolves_to_fallback() {
        let config = BackendConfig {
            url: "mongodb://localhost".into(),
            ..Default::default()
        };
        let store = SessionStore::connect(&config);
        assert_eq!(store.wait_resolved().await, StoreMode::Fallback);
    }

    #[tokio::test]
    async fn first_operation_waits_for_resolution() {
        let (tx, rx) = watch::channel(Backend::Connecting);
        let store = SessionStore::from_receiver(rx);
        assert_eq!(store.mode(), StoreMode::Connecting);

        let pending = {
            let store = store.clone();
            tokio::spawn(async move { store.insert(sample_input("early")).await })
        };
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        let db = ProctorDb::open_local(":memory:").await.unwrap();
        assert!(tx.send(Backend::Durable(Arc::new(db))).is_ok());

        let id = pending.await.unwrap().unwrap();
        assert!(id.as_native().is_some(), "insert should land in durable mode");
        assert_eq!(store.mode(), StoreMode::Durable);
    }

    #[tokio::test]
    async fn mode_is_fixed_once_resolved() {
        let (tx, rx) = watch::channel(Backend::Connecting);
        let store = SessionStore::from_receiver(rx);

        assert!(tx.send(Backend::fallback()).is_ok());
        let id = store.insert(sample_input("a")).await.unwrap();
        assert!(id.as_fallback().is_some());

        // A late announcement cannot promote the store.
        let db = ProctorDb::open_local(":memory:").await.unwrap();
        let _ = tx.send(Backend::Durable(Arc::new(db)));
        assert_eq!(store.mode(), StoreMode::Fallback);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dropped_connector_falls_back_once() {
        let (tx, rx) = watch::channel(Backend::Connecting);
        let store = SessionStore::from_receiver(rx);
        drop(tx);

        store.insert(sample_input("a")).await.unwrap();
        store.insert(sample_input("b")).await.unwrap();
        assert_eq!(store.mode(), StoreMode::Fallback);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn invalid_record_is_rejected_in_both_modes() {
        for store in [SessionStore::fallback(), durable_store().await] {
            let mut input = sample_input("bad");
            input.end_time = input.start_time - chrono::Duration::seconds(1);
            let err = store.insert(input).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
            assert_eq!(store.count().await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn created_at_is_stamped_by_store() {
        let before = Utc::now();
        let store = SessionStore::fallback();
        let id = store.insert(sample_input("Alice")).await.unwrap();
        let record = store.get_by_id(&id.to_string()).await.unwrap().unwrap();
        assert!(record.created_at >= before);
        assert!(record.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn durable_numeric_key_uses_legacy_path() {
        let store = durable_store().await;
        let native = store.insert(sample_input("native")).await.unwrap();

        let mut exported = store.get_by_id(&native.to_string()).await.unwrap().unwrap();
        exported.id = SessionId::Fallback(1_700_000_000_000);
        let imported = store.import(exported).await.unwrap();

        let by_legacy = store.get_by_id("1700000000000").await.unwrap().unwrap();
        assert_eq!(by_legacy.id, imported);
        assert_eq!(by_legacy.legacy_id, Some(1_700_000_000_000));

        assert_eq!(store.get_by_id("not-an-id").await.unwrap(), None);
    }

    #[tokio::test]
    async fn native_record_keeps_its_id_across_databases() {
        let source = durable_store().await;
        let id = source.insert(sample_input("Alice")).await.unwrap();
        let record = source.get_by_id(&id.to_string()).await.unwrap().unwrap();

        let target = durable_store().await;
        assert_eq!(target.import(record.clone()).await.unwrap(), id);

        let copied = target.get_by_key(&SessionKey::parse(&id.to_string())).await.unwrap();
        assert_eq!(copied, Some(record));
    }

    #[tokio::test]
    async fn import_is_refused_in_fallback_mode() {
        let store = SessionStore::fallback();
        let id = store.insert(sample_input("a")).await.unwrap();
        let record = store.get_by_id(&id.to_string()).await.unwrap().unwrap();
        let err = store.import(record).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }
}
