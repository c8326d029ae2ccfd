//! Session repository: the boundary callers use.
//!
//! Thin layer over [`SessionStore`]. It maps store errors into
//! [`RepositoryError`] and turns a missing session into `NotFound` where the
//! caller asked for one specific record.

use proctor_core::entities::{SessionInput, SessionRecord};
use proctor_core::enums::StoreMode;
use proctor_core::ids::SessionId;
use proctor_core::responses::{CreatedSession, StoreStatus};

use crate::error::RepositoryError;
use crate::store::SessionStore;

#[derive(Clone)]
pub struct SessionRepository {
    store: SessionStore,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(store: SessionStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Persist a session and return its assigned id.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected record, `Storage` if the backend fails.
    pub async fn save(&self, session: SessionInput) -> Result<SessionId, RepositoryError> {
        let id = self.store.insert(session).await?;
        tracing::info!(%id, mode = %self.store.mode(), "session saved");
        Ok(id)
    }

    /// Same as [`Self::save`], wrapped in the response body sent to clients.
    ///
    /// # Errors
    ///
    /// See [`Self::save`].
    pub async fn create_session(
        &self,
        session: SessionInput,
    ) -> Result<CreatedSession, RepositoryError> {
        Ok(CreatedSession {
            id: self.save(session).await?,
        })
    }

    /// # Errors
    ///
    /// `Storage` if the backend fails.
    pub async fn list_all(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        Ok(self.store.list_all().await?)
    }

    /// Alias of [`Self::list_all`].
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    pub async fn list_sessions(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        self.list_all().await
    }

    /// Look up a session by native or numeric id. No match is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<SessionRecord>, RepositoryError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Look up a session that must exist.
    ///
    /// # Errors
    ///
    /// `NotFound` when no session matches, `Storage` if the backend fails.
    pub async fn get_session(&self, id: &str) -> Result<SessionRecord, RepositoryError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    /// Current mode, without waiting for start-up to finish.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    /// Resolved mode and record count. Waits for start-up to finish.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails.
    pub async fn status(&self) -> Result<StoreStatus, RepositoryError> {
        let sessions = self.store.count().await?;
        Ok(StoreStatus {
            mode: self.store.mode(),
            sessions,
        })
    }
}
