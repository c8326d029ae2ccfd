//! Session identifiers.
//!
//! A stored session carries one of two identities:
//!
//! - **Native**: assigned by the durable backend, `ses-` followed by 24 lowercase
//!   hex characters (e.g., `"ses-65a1f0c2b9d84e1f7a3c0d12"`).
//! - **Fallback**: wall-clock milliseconds at insert, assigned by the in-process
//!   store when the durable backend is unavailable (e.g., `1700000000000`).
//!
//! Lookups arrive as strings. [`SessionKey::parse`] turns a raw string into the
//! canonical form both stores compare against.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Prefix of every backend-native session id.
pub const PREFIX_SESSION: &str = "ses";

/// Number of hex characters after the `ses-` prefix.
pub const NATIVE_HEX_LEN: usize = 24;

/// Identifier of a stored session.
///
/// Serialized untagged: native ids as JSON strings, fallback ids as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SessionId {
    Native(String),
    Fallback(i64),
}

impl SessionId {
    /// The numeric fallback id, if this is one.
    #[must_use]
    pub const fn as_fallback(&self) -> Option<i64> {
        match self {
            Self::Fallback(n) => Some(*n),
            Self::Native(_) => None,
        }
    }

    /// The native id string, if this is one.
    #[must_use]
    pub fn as_native(&self) -> Option<&str> {
        match self {
            Self::Native(s) => Some(s),
            Self::Fallback(_) => None,
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(s) => f.write_str(s),
            Self::Fallback(n) => write!(f, "{n}"),
        }
    }
}

/// Returns `true` if `s` has the shape of a backend-native session id.
///
/// Hex digits are accepted in either case; stored ids are always lowercase.
#[must_use]
pub fn is_native_id(s: &str) -> bool {
    s.strip_prefix(PREFIX_SESSION)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == NATIVE_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// A lookup id parsed into canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    /// Native id, normalized to lowercase.
    Native(String),
    /// Decimal integer: a fallback id or the legacy id of an imported record.
    Numeric(i64),
    /// Neither shape. Never matches a stored session.
    Unrecognized,
}

impl SessionKey {
    /// Parse a raw lookup string.
    ///
    /// Surrounding whitespace is ignored. A string that is a native id is never
    /// treated as numeric, so `"123"` and `123` resolve identically while
    /// `"ses-…"` always goes to the native path.
    ///
    /// Numeric keys must be plain decimal integers. Float or exponent spellings
    /// such as `"1700000000000.0"` or `"1.7e12"` are `Unrecognized`, never
    /// coerced.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_native_id(trimmed) {
            return Self::Native(trimmed.to_ascii_lowercase());
        }
        trimmed
            .parse::<i64>()
            .map_or(Self::Unrecognized, Self::Numeric)
    }

    /// Whether this key identifies the given stored id.
    #[must_use]
    pub fn matches(&self, id: &SessionId) -> bool {
        match (self, id) {
            (Self::Native(key), SessionId::Native(id)) => key == id,
            (Self::Numeric(key), SessionId::Fallback(id)) => key == id,
            _ => false,
        }
    }
}

impl From<&SessionId> for SessionKey {
    fn from(id: &SessionId) -> Self {
        match id {
            SessionId::Native(s) => Self::parse(s),
            SessionId::Fallback(n) => Self::Numeric(*n),
        }
    }
}
