//! # proctor-config
//!
//! Layered configuration loading for Proctor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PROCTOR_*` prefix, `__` as separator)
//! 2. Project-level `.proctor/config.toml`
//! 3. User-level `~/.config/proctor/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PROCTOR_BACKEND__URL` -> `backend.url`,
//! `PROCTOR_CLASSIFIER__KEYWORDS` -> `classifier.keywords`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use proctor_config::ProctorConfig;
//!
//! let config = ProctorConfig::load().expect("config");
//!
//! if config.backend.is_configured() {
//!     println!("Durable backend: {}", config.backend.url);
//! }
//! ```

mod backend;
mod classifier;
mod error;

pub use backend::{BackendConfig, BackendTarget};
pub use classifier::ClassifierConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProctorConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl ProctorConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; the binary loads it before calling this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".proctor/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("PROCTOR_").split("__"));

        figment
    }

    /// Fail unless a durable backend is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `backend` section.
    pub fn require_backend(&self) -> Result<&BackendConfig, ConfigError> {
        if self.backend.is_configured() {
            Ok(&self.backend)
        } else {
            Err(ConfigError::NotConfigured {
                section: "backend".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("proctor").join("config.toml"))
    }
}
