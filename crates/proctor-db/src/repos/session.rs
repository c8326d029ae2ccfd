//! Session repository (durable backend).
//!
//! Insert, list, and the two lookup paths: by native id, and by the numeric
//! `legacy_id` of records imported from a fallback snapshot.

use chrono::{DateTime, Utc};

use proctor_core::entities::{SessionInput, SessionRecord};
use proctor_core::ids::SessionId;

use crate::ProctorDb;
use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_json_column, to_json_column, to_unsigned};

const SESSION_COLUMNS: &str = "id, legacy_id, candidate_name, start_time, end_time, duration, \
     focus_lost_count, no_face_count, multiple_faces_count, suspicious_objects, \
     integrity_score, alerts, created_at";

impl ProctorDb {
    /// Insert a session and return its generated native id.
    ///
    /// `legacy_id` is set only when importing a record that already carried a
    /// fallback id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if id generation or the INSERT fails.
    pub async fn insert_session(
        &self,
        session: &SessionInput,
        created_at: DateTime<Utc>,
        legacy_id: Option<i64>,
    ) -> Result<String, StoreError> {
        let id = self.generate_id().await?;
        self.insert_session_with_id(&id, session, created_at, legacy_id).await?;
        Ok(id)
    }

    /// Insert a session under an existing native id.
    ///
    /// Used when importing records exported from another durable database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the INSERT fails, including when `id` is taken.
    pub async fn insert_session_with_id(
        &self,
        id: &str,
        session: &SessionInput,
        created_at: DateTime<Utc>,
        legacy_id: Option<i64>,
    ) -> Result<(), StoreError> {
        let duration = i64::try_from(session.duration).map_err(|_| {
            StoreError::InvalidState(format!("duration {} exceeds i64", session.duration))
        })?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO sessions ({SESSION_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                libsql::params![
                    id,
                    legacy_id.map_or(libsql::Value::Null, libsql::Value::Integer),
                    session.candidate_name.as_str(),
                    session.start_time.to_rfc3339(),
                    session.end_time.to_rfc3339(),
                    duration,
                    i64::from(session.focus_lost_count),
                    i64::from(session.no_face_count),
                    i64::from(session.multiple_faces_count),
                    to_json_column(&session.suspicious_objects)?,
                    session.integrity_score,
                    to_json_column(&session.alerts)?,
                    created_at.to_rfc3339()
                ],
            )
            .await?;

        Ok(())
    }

    /// Get a session by native id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails. A missing row is `Ok(None)`.
    pub async fn get_session(&self, id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_record(&row)).transpose()
    }

    /// Get the earliest session stored with the given legacy numeric id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails. A missing row is `Ok(None)`.
    pub async fn get_session_by_legacy_id(
        &self,
        legacy_id: i64,
    ) -> Result<Option<SessionRecord>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions
                     WHERE legacy_id = ?1 ORDER BY rowid LIMIT 1"
                ),
                [legacy_id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_record(&row)).transpose()
    }

    /// List every session in insertion order. No pagination.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row cannot be decoded.
    pub async fn list_sessions(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY rowid"),
                (),
            )
            .await?;

        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_record(&row)?);
        }
        Ok(sessions)
    }

    /// Count stored sessions.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count_sessions(&self) -> Result<u64, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM sessions", ())
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        to_unsigned(row.get::<i64>(0)?, "count")
    }
}

/// Convert a libSQL row (selected with `SESSION_COLUMNS`) to a `SessionRecord`.
fn row_to_record(row: &libsql::Row) -> Result<SessionRecord, StoreError> {
    Ok(SessionRecord {
        id: SessionId::Native(row.get::<String>(0)?),
        legacy_id: row.get::<Option<i64>>(1)?,
        session: SessionInput {
            candidate_name: row.get::<String>(2)?,
            start_time: parse_datetime(&row.get::<String>(3)?)?,
            end_time: parse_datetime(&row.get::<String>(4)?)?,
            duration: to_unsigned(row.get::<i64>(5)?, "duration")?,
            focus_lost_count: to_unsigned(row.get::<i64>(6)?, "focus_lost_count")?,
            no_face_count: to_unsigned(row.get::<i64>(7)?, "no_face_count")?,
            multiple_faces_count: to_unsigned(row.get::<i64>(8)?, "multiple_faces_count")?,
            suspicious_objects: parse_json_column(
                &row.get::<String>(9)?,
                "suspicious_objects",
            )?,
            integrity_score: row.get::<f64>(10)?,
            alerts: parse_json_column(&row.get::<String>(11)?, "alerts")?,
        },
        created_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}
