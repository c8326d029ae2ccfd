use proctor_config::ProctorConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &ProctorConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ProctorConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.backend.is_configured() && has_env_prefix(&env_keys, "PROCTOR_BACKEND") {
        warnings.push(
            "Backend config appears default while PROCTOR_BACKEND* env vars exist. Use double underscores (example: PROCTOR_BACKEND__URL)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "PROCTOR_CLASSIFIER_")
        && !has_env_prefix(&env_keys, "PROCTOR_CLASSIFIER__")
    {
        warnings.push(
            "PROCTOR_CLASSIFIER_* env vars are ignored. Use double underscores (example: PROCTOR_CLASSIFIER__KEYWORDS)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
