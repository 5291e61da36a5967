//! Configuration loader
//!
//! Handles loading configuration from default values, a TOML file and
//! environment variables, then validates the result before startup.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use zbx_domain::error::{Error, Result};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME, LEGACY_ENV_ALIASES,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Legacy flat variables (`ZABBIX_URL`, `READ_ONLY`, ...)
    /// 4. Prefixed variables with `__` nesting (e.g. `ZBX__UPSTREAM__URL`)
    pub fn load(&self) -> Result<AppConfig> {
        let app_config: AppConfig = self
            .figment()?
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Build the layered figment without extracting it
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                log_config_loaded(config_path, false);
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
            log_config_loaded(config_path, true);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        let legacy_names: Vec<&str> = LEGACY_ENV_ALIASES.iter().map(|(name, _)| *name).collect();
        figment = figment.merge(Env::raw().only(&legacy_names).map(|key| {
            LEGACY_ENV_ALIASES
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| key.as_str().into(), |(_, path)| (*path).into())
        }));

        figment = figment.merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}__")).split("__"));

        Ok(figment)
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
        ];

        candidates
            .into_iter()
            .find(|path| !path.as_os_str().is_empty() && path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections so that startup
/// fails before anything is bound or spawned.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_upstream_config(config)?;
    validate_session_config(config)?;
    crate::logging::parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    Ok(())
}

fn validate_upstream_config(config: &AppConfig) -> Result<()> {
    let url = config.upstream.url.trim();
    if url.is_empty() {
        return Err(Error::configuration("Upstream URL cannot be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::configuration(format!(
            "Upstream URL must start with http:// or https://, got {url}"
        )));
    }
    if config.upstream.timeout_secs == 0 {
        return Err(Error::configuration("Upstream timeout cannot be 0"));
    }
    config.upstream.credentials()?;
    Ok(())
}

fn validate_session_config(config: &AppConfig) -> Result<()> {
    let sessions = &config.sessions;
    if sessions.idle_timeout_secs == 0 {
        return Err(Error::configuration("Session idle timeout cannot be 0"));
    }
    if sessions.sweep_interval_secs == 0 {
        return Err(Error::configuration("Session sweep interval cannot be 0"));
    }
    if sessions.sweep_interval_secs > sessions.idle_timeout_secs {
        return Err(Error::configuration(
            "Session sweep interval cannot exceed the idle timeout",
        ));
    }
    if sessions.channel_capacity == 0 {
        return Err(Error::configuration("Session channel capacity cannot be 0"));
    }
    Ok(())
}
