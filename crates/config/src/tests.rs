use figment::Jail;

use crate::{AppConfig, ConfigError, MAX_SESSION_TTL_SECS, SessionConfig};

#[test]
fn test_defaults_without_files() {
    Jail::expect_with(|_jail| {
        let config = AppConfig::load(".").map_err(|e| e.to_string())?;
        assert_eq!(config.session.ttl_secs, 120);
        assert_eq!(config.session.cookie_name, "session_token");
        assert_eq!(config.server.port, 8080);
        assert!(!config.is_production());
        Ok(())
    });
}

#[test]
fn test_env_file_overrides_default_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
            app_name = "forum"
            app_env = "development"

            [session]
            ttl_secs = 300
            "#,
        )?;
        jail.create_file(
            "production.toml",
            r#"
            app_env = "production"

            [telemetry]
            json = true
            "#,
        )?;
        jail.set_env("APP_ENV", "production");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;
        assert!(config.is_production());
        assert!(config.telemetry.json);
        assert_eq!(config.session.ttl_secs, 300);
        Ok(())
    });
}

#[test]
fn test_prefixed_env_overrides_files() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "[session]\nttl_secs = 300\n")?;
        jail.set_env("FORUM_SESSION__TTL_SECS", "45");
        jail.set_env("FORUM_SERVER__PORT", "9000");

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;
        assert_eq!(config.session.ttl_secs, 45);
        assert_eq!(config.session.ttl(), chrono::Duration::seconds(45));
        assert_eq!(config.server.port, 9000);
        Ok(())
    });
}

#[test]
fn test_rejects_non_positive_ttl() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "[session]\nttl_secs = 0\n")?;

        let err = AppConfig::load(".").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    });
}

#[test]
fn test_rejects_oversized_ttl() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "[session]\nttl_secs = 10000000000000\n")?;

        let err = AppConfig::load(".").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    });
}

#[test]
fn test_accepts_ttl_at_upper_bound() {
    Jail::expect_with(|jail| {
        jail.set_env("FORUM_SESSION__TTL_SECS", MAX_SESSION_TTL_SECS.to_string());

        let config = AppConfig::load(".").map_err(|e| e.to_string())?;
        assert_eq!(config.session.ttl(), chrono::Duration::days(365));
        Ok(())
    });
}

#[test]
fn test_ttl_conversion_never_panics() {
    let session = SessionConfig {
        ttl_secs: i64::MAX,
        ..SessionConfig::default()
    };

    assert_eq!(session.ttl(), chrono::Duration::seconds(MAX_SESSION_TTL_SECS));
}
