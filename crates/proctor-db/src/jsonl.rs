//! JSONL snapshot export and import.
//!
//! One `SessionRecord` per line, in insertion order. Export works in either
//! mode and is how an in-memory fallback session set survives a restart:
//! export it, then import it once the durable backend is reachable again.

use std::path::Path;

use anyhow::Context;

use proctor_core::entities::SessionRecord;
use proctor_core::enums::StoreMode;
use proctor_core::ids::SessionKey;
use proctor_core::responses::ImportSummary;

use crate::error::{RepositoryError, StoreError};
use crate::repository::SessionRepository;

impl SessionRepository {
    /// Write every stored session to `path`, replacing the file.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// `Storage` if the backend fails or the file cannot be written.
    pub async fn export_jsonl(&self, path: impl AsRef<Path>) -> Result<usize, RepositoryError> {
        let path = path.as_ref();
        let sessions = self.list_all().await?;

        serde_jsonlines::write_json_lines(path, &sessions)
            .with_context(|| format!("failed to write {}", path.display()))
            .map_err(StoreError::from)?;

        tracing::info!(count = sessions.len(), path = %path.display(), "sessions exported");
        Ok(sessions.len())
    }

    /// Import an exported snapshot into the durable backend.
    ///
    /// Native ids are kept; fallback records get a fresh native id and keep
    /// their numeric id as `legacy_id`. A record whose native id or numeric id
    /// already resolves in the durable backend is skipped, so importing the
    /// same snapshot twice is harmless whichever database exported it. The
    /// whole file is parsed before anything is written.
    ///
    /// # Errors
    ///
    /// `Storage` if the store is in fallback mode, the file cannot be read or
    /// parsed, or an insert fails. `Validation` if a record is invalid; records
    /// before it stay imported.
    pub async fn import_jsonl(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ImportSummary, RepositoryError> {
        let path = path.as_ref();

        let mode = self.store().wait_resolved().await;
        if mode != StoreMode::Durable {
            return Err(StoreError::InvalidState(format!(
                "import requires the durable backend (store is in {mode} mode)"
            ))
            .into());
        }

        let records = serde_jsonlines::json_lines::<SessionRecord, _>(path)
            .and_then(|lines| lines.collect::<std::io::Result<Vec<_>>>())
            .with_context(|| format!("failed to read {}", path.display()))
            .map_err(StoreError::from)?;

        let mut summary = ImportSummary::default();
        for record in records {
            if self.already_imported(&record).await? {
                tracing::debug!(id = %record.id, "session already present, skipping");
                summary.skipped += 1;
                continue;
            }
            let id = self.store().import(record).await?;
            summary.imported += 1;
            summary.ids.push(id);
        }

        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            path = %path.display(),
            "sessions imported"
        );
        Ok(summary)
    }

    async fn already_imported(&self, record: &SessionRecord) -> Result<bool, RepositoryError> {
        if let Some(native) = record.id.as_native() {
            let key = SessionKey::Native(native.to_owned());
            if self.store().get_by_key(&key).await?.is_some() {
                return Ok(true);
            }
        }
        match record.numeric_id() {
            Some(n) => Ok(self
                .store()
                .get_by_key(&SessionKey::Numeric(n))
                .await?
                .is_some()),
            None => Ok(false),
        }
    }
}
