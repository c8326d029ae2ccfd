//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use proctor_config::{BackendTarget, ProctorConfig};

#[test]
fn loads_backend_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "libsql://proctoring-acme.turso.io"
auth_token = "turso-token"
connect_timeout_secs = 4
"#,
        )?;

        let config: ProctorConfig = Figment::from(Serialized::defaults(ProctorConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.backend.url, "libsql://proctoring-acme.turso.io");
        assert_eq!(config.backend.auth_token, "turso-token");
        assert_eq!(config.backend.connect_timeout_secs, 4);
        assert!(config.backend.is_configured());
        assert_eq!(
            config.backend.target().expect("valid target"),
            BackendTarget::Remote {
                url: "libsql://proctoring-acme.turso.io".into(),
                auth_token: "turso-token".into(),
            }
        );
        Ok(())
    });
}

#[test]
fn loads_local_backend_path_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[backend]
path = "./sessions.db"
"#,
        )?;

        let config: ProctorConfig = Figment::from(Serialized::defaults(ProctorConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.backend.target().expect("valid target"),
            BackendTarget::Local {
                path: "./sessions.db".into()
            }
        );
        // Unset fields keep their defaults.
        assert_eq!(config.backend.connect_timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn loads_classifier_keywords_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[classifier]
keywords = ["Cell Phone", "tablet", "  "]
"#,
        )?;

        let config: ProctorConfig = Figment::from(Serialized::defaults(ProctorConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.classifier.keywords, vec!["Cell Phone", "tablet", "  "]);
        // Normalization happens when the classifier is built.
        assert_eq!(config.classifier.build().keywords(), ["cell phone", "tablet"]);
        Ok(())
    });
}

#[test]
fn missing_sections_use_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "")?;

        let config: ProctorConfig = Figment::from(Serialized::defaults(ProctorConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(!config.backend.is_configured());
        assert_eq!(config.backend.target().expect("valid target"), BackendTarget::Unconfigured);
        assert_eq!(config.classifier.keywords.len(), 5);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("PROCTOR_BACKEND__URL", "libsql://from-env.turso.io");

        jail.create_file(
            "config.toml",
            r#"
[backend]
url = "libsql://from-toml.turso.io"
auth_token = "toml-token"
"#,
        )?;

        let config: ProctorConfig = Figment::from(Serialized::defaults(ProctorConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PROCTOR_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.backend.url, "libsql://from-env.turso.io");
        // TOML value not overridden by env should remain
        assert_eq!(config.backend.auth_token, "toml-token");
        Ok(())
    });
}

#[test]
fn env_var_sets_keyword_list() {
    Jail::expect_with(|jail| {
        jail.set_env("PROCTOR_CLASSIFIER__KEYWORDS", r#"["tablet", "smart watch"]"#);

        let config: ProctorConfig = ProctorConfig::figment().extract()?;
        assert_eq!(config.classifier.keywords, vec!["tablet", "smart watch"]);
        Ok(())
    });
}

/// Typo'd env var keys are silently ignored by figment; the CLI warns about them.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("PROCTOR_BACKEND_URL", "libsql://typo.turso.io");
        jail.set_env("PROCTOR_BACKEND__URLL", "libsql://typo.turso.io");

        let config: ProctorConfig = ProctorConfig::figment().extract()?;

        assert!(
            config.backend.url.is_empty(),
            "typo'd env var should be silently ignored by figment"
        );
        Ok(())
    });
}

#[test]
fn project_config_is_read_from_dot_proctor() {
    Jail::expect_with(|jail| {
        jail.create_dir(".proctor")?;
        jail.create_file(
            ".proctor/config.toml",
            r#"
[backend]
path = "exam-sessions.db"
connect_timeout_secs = 2
"#,
        )?;

        let config: ProctorConfig = ProctorConfig::figment().extract()?;
        assert_eq!(config.backend.path, "exam-sessions.db");
        assert_eq!(config.backend.connect_timeout().as_secs(), 2);
        Ok(())
    });
}
