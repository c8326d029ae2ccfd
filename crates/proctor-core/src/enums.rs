//! Alert kinds and store modes.
//!
//! Both enums serialize as `snake_case` strings.

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ---------------------------------------------------------------------------
// AlertKind
// ---------------------------------------------------------------------------

/// Category of a proctoring event recorded during a session.
///
/// Serialized as its `snake_case` name. Alerts are client-supplied, so any
/// unlisted name is kept verbatim in `Other` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertKind {
    /// The exam window lost focus (tab switch, minimize).
    FocusLost,
    /// No face visible in the frame.
    NoFace,
    /// More than one face visible in the frame.
    MultipleFaces,
    /// A suspicious object was detected.
    SuspiciousObject,
    Other(String),
}

impl AlertKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::FocusLost => "focus_lost",
            Self::NoFace => "no_face",
            Self::MultipleFaces => "multiple_faces",
            Self::SuspiciousObject => "suspicious_object",
            Self::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for AlertKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "focus_lost" => Self::FocusLost,
            "no_face" => Self::NoFace,
            "multiple_faces" => Self::MultipleFaces,
            "suspicious_object" => Self::SuspiciousObject,
            _ => Self::Other(kind),
        }
    }
}

impl From<AlertKind> for String {
    fn from(kind: AlertKind) -> Self {
        match kind {
            AlertKind::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for AlertKind {
    fn schema_name() -> Cow<'static, str> {
        "AlertKind".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "description": "Alert category: focus_lost, no_face, multiple_faces, \
                suspicious_object, or any other client-defined name."
        })
    }
}

// ---------------------------------------------------------------------------
// StoreMode
// ---------------------------------------------------------------------------

/// Storage mode of a session store.
///
/// ```text
/// connecting → durable
///            → fallback
/// ```
///
/// A store leaves `Connecting` exactly once and keeps the resolved mode for
/// the rest of its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// The start-up connection attempt has not finished yet.
    Connecting,
    /// Records go to the durable libSQL backend.
    Durable,
    /// Records are kept in process memory only.
    Fallback,
}

impl StoreMode {
    /// Whether the mode has been decided.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Connecting)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Durable => "durable",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
