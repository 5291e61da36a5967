//! Monitoring API JSON-RPC client
//!
//! Implements the [`UpstreamGateway`] port over HTTP. Every authenticated
//! call walks a short attempt plan: the remembered strategy first, then the
//! other strategy, then (for password logins) a fresh `user.login`. The plan
//! never exceeds [`MAX_AUTH_ATTEMPTS`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use zbx_domain::constants::{MAX_AUTH_ATTEMPTS, UNAUTHENTICATED_METHODS};
use zbx_domain::error::{Error, Result};
use zbx_domain::ports::UpstreamGateway;
use zbx_domain::value_objects::{AuthStatus, AuthStrategy, Credentials};

use super::envelope::{is_auth_rejection, normalize_endpoint, parse_response, request_body};
use crate::config::UpstreamConfig;
use crate::constants::CONTENT_TYPE_JSON_RPC;
use crate::error_ext::ErrorContext;

/// One step of the authentication plan for a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// Send with the current token attached this way
    With(AuthStrategy),
    /// Drop the rejected session token, log in again, then send
    Relogin(AuthStrategy),
}

/// Authenticated client for the monitoring platform's JSON-RPC API
pub struct ZabbixClient {
    http: Client,
    base_url: String,
    endpoint: String,
    credentials: Credentials,
    timeout: Duration,
    next_id: AtomicU64,
    /// Session token from `user.login`; the lock is held across the login
    /// so concurrent callers share one in-flight attempt
    session: Mutex<Option<String>>,
    status: RwLock<AuthStatus>,
}

impl ZabbixClient {
    /// Build a client from configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("zbx-mcp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .config_context("Failed to build HTTP client")?;
        Self::with_http_client(config, http)
    }

    /// Build a client around an existing reqwest client
    pub fn with_http_client(config: &UpstreamConfig, http: Client) -> Result<Self> {
        let credentials = config.credentials()?;
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        Ok(Self {
            endpoint: normalize_endpoint(&base_url),
            base_url,
            http,
            credentials,
            timeout: config.timeout(),
            next_id: AtomicU64::new(1),
            session: Mutex::new(None),
            status: RwLock::new(AuthStatus::unauthenticated()),
        })
    }

    /// Full JSON-RPC endpoint URL
    pub fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn preferred_strategy(&self) -> AuthStrategy {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .strategy
            .unwrap_or(AuthStrategy::BearerHeader)
    }

    fn attempt_plan(&self) -> Vec<Attempt> {
        let preferred = self.preferred_strategy();
        let mut plan: Vec<Attempt> = AuthStrategy::sequence_from(preferred)
            .map(Attempt::With)
            .collect();
        if self.credentials.can_relogin() {
            plan.push(Attempt::Relogin(preferred));
        }
        plan.truncate(MAX_AUTH_ATTEMPTS);
        plan
    }

    fn record_success(&self, strategy: AuthStrategy) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        if status.strategy != Some(strategy) {
            info!(strategy = %strategy, "Upstream authentication strategy selected");
        }
        *status = AuthStatus {
            authenticated: true,
            strategy: Some(strategy),
            last_error: None,
        };
    }

    fn record_failure(&self, error: &Error) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        status.authenticated = false;
        status.last_error = Some(error.to_string());
    }

    /// Current token, logging in first when password credentials have none
    async fn token(&self) -> Result<String> {
        let (user, password) = match &self.credentials {
            Credentials::Token(token) => return Ok(token.clone()),
            Credentials::Password { user, password } => (user, password),
        };

        let mut session = self.session.lock().await;
        if let Some(token) = session.as_ref() {
            return Ok(token.clone());
        }
        let token = self.login(user, password).await.inspect_err(|e| {
            self.record_failure(e);
        })?;
        *session = Some(token.clone());
        Ok(token)
    }

    /// Forget `stale` unless another caller already replaced it
    async fn invalidate_session(&self, stale: &str) {
        let mut session = self.session.lock().await;
        if session.as_deref() == Some(stale) {
            debug!("Discarding rejected upstream session token");
            *session = None;
        }
    }

    /// Exchange username and password for a session token
    ///
    /// Newer frontends take `username`; older ones only accept `user`.
    async fn login(&self, user: &str, password: &str) -> Result<String> {
        info!(user, "Logging in to upstream API");
        let current = json!({"username": user, "password": password});
        let result = match self.send("user.login", current, None).await {
            Ok(result) => result,
            Err(e) if matches!(e, Error::Upstream { .. }) && !is_auth_rejection(&e) => {
                debug!(error = %e, "Retrying login with legacy parameter names");
                let legacy = json!({"user": user, "password": password});
                self.send("user.login", legacy, None)
                    .await
                    .map_err(|e| login_error(user, e))?
            }
            Err(e) => return Err(login_error(user, e)),
        };

        result
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| Error::authentication("Upstream login returned no session token"))
    }

    async fn call_authenticated(&self, method: &str, params: Value) -> Result<Value> {
        let plan = self.attempt_plan();
        let mut last_error = None;
        // Token sent by this caller's previous attempt
        let mut rejected: Option<String> = None;

        for (index, attempt) in plan.iter().enumerate() {
            let strategy = match *attempt {
                Attempt::With(strategy) => strategy,
                Attempt::Relogin(strategy) => {
                    if let Some(stale) = rejected.as_deref() {
                        self.invalidate_session(stale).await;
                    }
                    strategy
                }
            };
            let token = self.token().await?;

            match self
                .send(method, params.clone(), Some((strategy, &token)))
                .await
            {
                Ok(result) => {
                    self.record_success(strategy);
                    return Ok(result);
                }
                Err(e) if is_auth_rejection(&e) => {
                    warn!(
                        method,
                        strategy = %strategy,
                        attempt = index + 1,
                        error = %e,
                        "Upstream rejected authentication"
                    );
                    last_error = Some(e);
                    rejected = Some(token);
                }
                Err(e) => return Err(e),
            }
        }

        let reason = last_error.map_or_else(|| "no attempts made".to_string(), |e| e.to_string());
        let error = Error::authentication(format!(
            "Upstream rejected {method} after {} attempts: {reason}",
            plan.len()
        ));
        self.record_failure(&error);
        Err(error)
    }

    /// Send one JSON-RPC request
    async fn send(
        &self,
        method: &str,
        params: Value,
        auth: Option<(AuthStrategy, &str)>,
    ) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(method, params, id, auth);
        debug!(method, id, strategy = ?auth.map(|(s, _)| s), "Upstream request");

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON_RPC)
            .timeout(self.timeout)
            .json(&body);
        if let Some((AuthStrategy::BearerHeader, token)) = auth {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Err(e) if e.is_timeout() => {
                return Err(Error::network(format!(
                    "Upstream request {method} timed out after {:?}",
                    self.timeout
                )));
            }
            sent => sent.network_context(format!("Upstream request {method} failed"))?,
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::authentication(format!(
                "Upstream returned HTTP {status} for {method}"
            )));
        }
        if !status.is_success() {
            return Err(Error::network(format!(
                "Upstream returned HTTP {status} for {method}"
            )));
        }

        let envelope: Value = response
            .json()
            .await
            .network_context(format!("Invalid upstream response for {method}"))?;
        parse_response(method, envelope)
    }
}

fn login_error(user: &str, error: Error) -> Error {
    match error {
        Error::Network { .. } => error,
        other => Error::authentication(format!("Login failed for user {user}: {other}")),
    }
}

#[async_trait]
impl UpstreamGateway for ZabbixClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        if UNAUTHENTICATED_METHODS.contains(&method) {
            return self.send(method, params, None).await;
        }
        self.call_authenticated(method, params).await
    }

    async fn ensure_authenticated(&self) -> Result<()> {
        if self.auth_status().authenticated {
            return Ok(());
        }
        self.call("hostgroup.get", json!({"output": ["groupid"], "limit": 1}))
            .await
            .map(|_| ())
    }

    fn auth_status(&self) -> AuthStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
