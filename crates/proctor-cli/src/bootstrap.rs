use std::path::{Path, PathBuf};

use anyhow::Context;
use proctor_config::ProctorConfig;

pub fn load_config() -> anyhow::Result<ProctorConfig> {
    load_project_dotenv()?;
    ProctorConfig::load().map_err(anyhow::Error::from)
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    if let Some(env_path) = find_project_dotenv(&cwd) {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}

/// The `.env` next to the nearest `.proctor` directory at or above `start`.
fn find_project_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".proctor").is_dir())
        .map(|root| root.join(".env"))
        .filter(|env_path| env_path.exists())
}
