//! Upstream API configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zbx_domain::error::{Error, Result};
use zbx_domain::value_objects::Credentials;

use crate::constants::{DEFAULT_UPSTREAM_URL, UPSTREAM_REQUEST_TIMEOUT_SECS};

/// Monitoring API connection settings
///
/// Either `token` or both `user` and `password` must be set. A token takes
/// precedence when both are present.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Frontend base URL, with or without the `api_jsonrpc.php` suffix
    pub url: String,
    /// API token
    pub token: Option<String>,
    /// Login name for `user.login`
    pub user: Option<String>,
    /// Login password for `user.login`
    pub password: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            token: None,
            user: None,
            password: None,
            timeout_secs: UPSTREAM_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl UpstreamConfig {
    /// Resolve the configured login identity
    pub fn credentials(&self) -> Result<Credentials> {
        let non_empty = |value: &Option<String>| value.as_ref().filter(|v| !v.is_empty()).cloned();

        if let Some(token) = non_empty(&self.token) {
            return Ok(Credentials::Token(token));
        }
        match (non_empty(&self.user), non_empty(&self.password)) {
            (Some(user), Some(password)) => Ok(Credentials::Password { user, password }),
            _ => Err(Error::configuration(
                "Upstream credentials missing: set upstream.token or upstream.user and upstream.password",
            )),
        }
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("token", &redact(&self.token))
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
