use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Alert, SuspiciousFinding};
use crate::ids::SessionId;

/// Summary of a completed proctoring session, as submitted by the client.
///
/// `duration` is caller-supplied seconds and is not cross-checked against
/// `end_time - start_time`. Any `createdAt` or `id` in the payload is ignored:
/// both are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub candidate_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: u64,
    pub focus_lost_count: u32,
    pub no_face_count: u32,
    pub multiple_faces_count: u32,
    #[serde(default)]
    pub suspicious_objects: Vec<SuspiciousFinding>,
    pub integrity_score: f64,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// A persisted session integrity record.
///
/// Created once at save time and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: SessionId,
    /// Fallback id this record carried before it was imported into the durable backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<i64>,
    #[serde(flatten)]
    pub session: SessionInput,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(id: SessionId, session: SessionInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            legacy_id: None,
            session,
            created_at,
        }
    }

    /// Numeric id a legacy lookup resolves against: the fallback id itself, or
    /// the preserved one after import.
    #[must_use]
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.as_fallback().or(self.legacy_id)
    }
}
