//! Durable backend (libSQL) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default bound on the start-up connection attempt, in seconds.
const fn default_connect_timeout_secs() -> u64 {
    10
}

/// URL schemes libSQL's remote client accepts.
const REMOTE_SCHEMES: [&str; 4] = ["libsql://", "https://", "http://", "wss://"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Remote database URL (e.g., `libsql://proctoring-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database. May be empty for an unauthenticated `sqld`.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file, used when no `url` is set.
    #[serde(default)]
    pub path: String,

    /// Upper bound on the start-up connection attempt. Operations issued while
    /// connecting wait at most this long before the store falls back.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            path: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Where the durable backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendTarget {
    Remote { url: String, auth_token: String },
    Local { path: String },
    /// Nothing configured: the store goes straight to fallback mode.
    Unconfigured,
}

impl BackendConfig {
    /// Check if any durable backend is configured.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() || !self.path.is_empty()
    }

    /// Resolve the configured target. `url` wins over `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL scheme is not one libSQL
    /// can connect to, or the connect timeout is zero.
    pub fn target(&self) -> Result<BackendTarget, ConfigError> {
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.connect_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        if !self.url.is_empty() {
            if !REMOTE_SCHEMES.iter().any(|s| self.url.starts_with(s)) {
                return Err(ConfigError::InvalidValue {
                    field: "backend.url".into(),
                    reason: format!("unsupported scheme in '{}'", self.url),
                });
            }
            return Ok(BackendTarget::Remote {
                url: self.url.clone(),
                auth_token: self.auth_token.clone(),
            });
        }

        if !self.path.is_empty() {
            return Ok(BackendTarget::Local {
                path: self.path.clone(),
            });
        }

        Ok(BackendTarget::Unconfigured)
    }

    /// The connect timeout as a `Duration`.
    pub const fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout_secs)
    }
}
