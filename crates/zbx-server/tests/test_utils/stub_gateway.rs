//! In-memory upstream gateway
//!
//! Answers every method from fixtures and counts the calls it receives.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use zbx_domain::error::{Error, Result};
use zbx_domain::ports::UpstreamGateway;
use zbx_domain::value_objects::{AuthStatus, AuthStrategy};

/// Version reported by `apiinfo.version`
pub const STUB_API_VERSION: &str = "7.0.4";

/// Base URL reported in health output
pub const STUB_ENDPOINT: &str = "http://zabbix.test";

/// Five monitored hosts
pub fn host_fixture() -> Value {
    json!([
        {"hostid": "10084", "host": "zabbix-server", "name": "Zabbix server", "status": "0"},
        {"hostid": "10101", "host": "web-01", "name": "Web 01", "status": "0"},
        {"hostid": "10102", "host": "web-02", "name": "Web 02", "status": "0"},
        {"hostid": "10103", "host": "db-01", "name": "Database 01", "status": "0"},
        {"hostid": "10104", "host": "cache-01", "name": "Cache 01", "status": "1"}
    ])
}

/// Gateway stub with call accounting
#[derive(Debug, Default)]
pub struct StubGateway {
    calls: AtomicUsize,
    methods: Mutex<Vec<String>>,
    last_params: Mutex<Option<Value>>,
    reject_auth: bool,
    failing_method: Option<&'static str>,
    delay: Option<Duration>,
}

impl StubGateway {
    /// Gateway that answers every method
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose authentication always fails
    pub fn rejecting_auth() -> Self {
        Self {
            reject_auth: true,
            ..Self::default()
        }
    }

    /// Gateway that fails `method` with an upstream error
    pub fn failing(method: &'static str) -> Self {
        Self {
            failing_method: Some(method),
            ..Self::default()
        }
    }

    /// Gateway that waits before answering
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Number of `call` invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Methods called so far, in order
    pub fn methods(&self) -> Vec<String> {
        self.methods.lock().unwrap().clone()
    }

    /// Parameters of the most recent call
    pub fn last_params(&self) -> Option<Value> {
        self.last_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamGateway for StubGateway {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.methods.lock().unwrap().push(method.to_string());
        *self.last_params.lock().unwrap() = Some(params);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_method == Some(method) {
            return Err(Error::upstream(
                method,
                -32500,
                "Application error. No permissions to referred object or it does not exist!",
            ));
        }

        // The stub ignores `limit` so callers must cap results themselves.
        match method {
            "apiinfo.version" => Ok(json!(STUB_API_VERSION)),
            "host.get" => Ok(host_fixture()),
            "host.create" => Ok(json!({"hostids": ["10200"]})),
            "host.delete" => Ok(json!({"hostids": ["10104"]})),
            "event.acknowledge" => Ok(json!({"eventids": ["501"]})),
            m if m.ends_with(".get") => Ok(json!([])),
            _ => Ok(json!({})),
        }
    }

    async fn ensure_authenticated(&self) -> Result<()> {
        if self.reject_auth {
            Err(Error::authentication("Login name or password is incorrect."))
        } else {
            Ok(())
        }
    }

    fn auth_status(&self) -> AuthStatus {
        if self.reject_auth {
            AuthStatus::unauthenticated()
        } else {
            AuthStatus {
                authenticated: true,
                strategy: Some(AuthStrategy::BearerHeader),
                last_error: None,
            }
        }
    }

    fn endpoint(&self) -> &str {
        STUB_ENDPOINT
    }
}
