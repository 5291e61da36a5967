//! Configuration Loader Tests
//!
//! Every test runs inside a `figment::Jail`, which serializes environment
//! mutations and gives each test a scratch working directory.

use figment::Jail;
use zbx_domain::error::Error;
use zbx_domain::value_objects::Credentials;
use zbx_infrastructure::config::loader::validate_app_config;
use zbx_infrastructure::config::{AppConfig, ConfigLoader};
use zbx_infrastructure::constants::{
    DEFAULT_HTTP_PORT, SESSION_IDLE_TIMEOUT_SECS, SESSION_SWEEP_INTERVAL_SECS,
};

fn to_figment(e: Error) -> figment::Error {
    e.to_string().into()
}

#[test]
fn test_defaults_with_token_from_toml() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "zbx-mcp.toml",
            r#"
                [upstream]
                url = "https://mon.example.com/zabbix"
                token = "abc123"
            "#,
        )?;

        let config = ConfigLoader::new().load().map_err(to_figment)?;

        assert_eq!(config.server.port, DEFAULT_HTTP_PORT);
        assert!(config.policy.read_only);
        assert_eq!(config.sessions.idle_timeout_secs, SESSION_IDLE_TIMEOUT_SECS);
        assert_eq!(
            config.sessions.sweep_interval_secs,
            SESSION_SWEEP_INTERVAL_SECS
        );
        assert_eq!(
            config.upstream.credentials().map_err(to_figment)?,
            Credentials::Token("abc123".to_string())
        );
        Ok(())
    });
}

#[test]
fn test_prefixed_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "custom.toml",
            r#"
                [server]
                port = 9000

                [upstream]
                url = "https://mon.example.com/zabbix"
                token = "abc123"
            "#,
        )?;
        jail.set_env("ZBX__SERVER__PORT", "9100");
        jail.set_env("ZBX__POLICY__READ_ONLY", "false");

        let config = ConfigLoader::new()
            .with_config_path("custom.toml")
            .load()
            .map_err(to_figment)?;

        assert_eq!(config.server.port, 9100);
        assert!(!config.policy.read_only);
        Ok(())
    });
}

#[test]
fn test_legacy_env_aliases() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("ZABBIX_URL", "https://legacy.example.com/zabbix");
        jail.set_env("ZABBIX_USER", "Admin");
        jail.set_env("ZABBIX_PASSWORD", "zabbix");
        jail.set_env("READ_ONLY", "false");
        jail.set_env("PORT", "8181");

        let config = ConfigLoader::new().load().map_err(to_figment)?;

        assert_eq!(config.upstream.url, "https://legacy.example.com/zabbix");
        assert_eq!(config.server.port, 8181);
        assert!(!config.policy.read_only);
        assert!(config.upstream.credentials().map_err(to_figment)?.can_relogin());
        Ok(())
    });
}

#[test]
fn test_prefixed_env_wins_over_legacy_alias() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("ZABBIX_TOKEN", "legacy");
        jail.set_env("ZBX__UPSTREAM__TOKEN", "prefixed");

        let config = ConfigLoader::new().load().map_err(to_figment)?;

        assert_eq!(config.upstream.token.as_deref(), Some("prefixed"));
        Ok(())
    });
}

#[test]
fn test_missing_credentials_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();

        let result = ConfigLoader::new().load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("ZBX__UPSTREAM__TOKEN", "abc123");

        let result = ConfigLoader::new().with_config_path("absent.toml").load();

        match result {
            Err(Error::Configuration { message, .. }) => {
                assert!(message.contains("absent.toml"));
            }
            other => panic!("Expected configuration error, got {other:?}"),
        }
        Ok(())
    });
}

#[test]
fn test_validation_rules() {
    let mut config = AppConfig::default();
    config.upstream.token = Some("abc123".to_string());
    assert!(validate_app_config(&config).is_ok());

    let mut bad_url = config.clone();
    bad_url.upstream.url = "ftp://mon.example.com".to_string();
    assert!(validate_app_config(&bad_url).is_err());

    let mut bad_sweep = config.clone();
    bad_sweep.sessions.sweep_interval_secs = bad_sweep.sessions.idle_timeout_secs + 1;
    assert!(validate_app_config(&bad_sweep).is_err());

    let mut bad_capacity = config.clone();
    bad_capacity.sessions.channel_capacity = 0;
    assert!(validate_app_config(&bad_capacity).is_err());

    let mut bad_level = config;
    bad_level.logging.level = "loud".to_string();
    assert!(validate_app_config(&bad_level).is_err());
}

#[test]
fn test_token_preferred_over_password() {
    let mut config = AppConfig::default();
    config.upstream.token = Some("abc123".to_string());
    config.upstream.user = Some("Admin".to_string());
    config.upstream.password = Some("zabbix".to_string());

    assert_eq!(
        config.upstream.credentials().unwrap(),
        Credentials::Token("abc123".to_string())
    );
}

#[test]
fn test_upstream_debug_redacts_secrets() {
    let mut config = AppConfig::default();
    config.upstream.token = Some("abc123".to_string());
    config.upstream.password = Some("hunter2".to_string());

    let rendered = format!("{:?}", config.upstream);
    assert!(!rendered.contains("abc123"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}
