//! Infrastructure layer constants
//!
//! Contains defaults used by configuration and the upstream client.
//! Protocol constants are defined in `zbx_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "zbx-mcp.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "zbx-mcp";

/// Environment variable prefix for configuration (nested with `__`)
pub const CONFIG_ENV_PREFIX: &str = "ZBX";

/// Flat environment variables accepted for compatibility, with their config path
pub const LEGACY_ENV_ALIASES: &[(&str, &str)] = &[
    ("ZABBIX_URL", "upstream.url"),
    ("ZABBIX_TOKEN", "upstream.token"),
    ("ZABBIX_USER", "upstream.user"),
    ("ZABBIX_PASSWORD", "upstream.password"),
    ("READ_ONLY", "policy.read_only"),
    ("PORT", "server.port"),
];

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

// ============================================================================
// UPSTREAM CONSTANTS
// ============================================================================

/// Default upstream base URL
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost/zabbix";

/// Per-request upstream timeout in seconds
pub const UPSTREAM_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Content type for JSON-RPC requests
pub const CONTENT_TYPE_JSON_RPC: &str = "application/json-rpc";

// ============================================================================
// SESSION CONSTANTS
// ============================================================================

/// Idle time after which a session is evicted (30 minutes)
pub const SESSION_IDLE_TIMEOUT_SECS: u64 = 30 * 60;

/// Period of the idle-session sweep (5 minutes)
pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// Capacity of each session's outbound queue
pub const SESSION_CHANNEL_CAPACITY: usize = 64;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "ZBX_LOG";
