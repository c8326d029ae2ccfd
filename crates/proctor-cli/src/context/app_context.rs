use proctor_config::ProctorConfig;
use proctor_db::repository::SessionRepository;
use proctor_db::store::SessionStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub repository: SessionRepository,
    pub config: ProctorConfig,
}

impl AppContext {
    /// Build the context and start the store's background connection attempt.
    ///
    /// Returns before the backend answers. A missing or unreachable backend is
    /// not an error here: the store logs it and resolves to fallback mode.
    pub fn init(config: ProctorConfig) -> Self {
        let store = SessionStore::connect(&config.backend);
        Self {
            repository: SessionRepository::new(store),
            config,
        }
    }
}
