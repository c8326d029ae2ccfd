//! Response types returned across the repository boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::StoreMode;
use crate::ids::SessionId;

/// Result of creating a session: the identifier the store assigned.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreatedSession {
    pub id: SessionId,
}

/// Result of importing a batch of exported records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: u32,
    /// Records already present in the durable backend, left untouched.
    #[serde(default)]
    pub skipped: u32,
    pub ids: Vec<SessionId>,
}

/// Current store mode and record count.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoreStatus {
    pub mode: StoreMode,
    pub sessions: u64,
}
