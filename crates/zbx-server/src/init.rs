//! Server Initialization
//!
//! Handles configuration loading, upstream verification, startup and
//! graceful shutdown.
//!
//! Startup order:
//!
//! 1. Load and validate configuration, applying command-line overrides
//! 2. Initialize logging
//! 3. Connect to the upstream API and authenticate; failure aborts startup
//! 4. Start the idle session reaper
//! 5. Serve HTTP until Rocket shuts down, then close every session

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use zbx_domain::ports::{SharedUpstreamGateway, UpstreamGateway};
use zbx_infrastructure::config::{AppConfig, ConfigLoader, loader::validate_app_config};
use zbx_infrastructure::logging::init_logging;
use zbx_infrastructure::upstream::ZabbixClient;

use crate::McpServerBuilder;
use crate::session::CloseReason;

/// Command-line overrides applied on top of the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Force read-only mode
    pub read_only: bool,
    /// Listen port override
    pub port: Option<u16>,
}

/// Run the zbx-mcp server until it is shut down
pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    let config = load_config(&options)?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        upstream = %config.upstream.url,
        read_only = config.policy.read_only,
        "Starting zbx-mcp server"
    );

    let gateway = connect_upstream(&config).await?;

    let server = McpServerBuilder::new()
        .with_gateway(gateway)
        .with_read_only(config.policy.read_only)
        .with_session_config(config.sessions.clone())
        .build()?;

    let shutdown = CancellationToken::new();
    let reaper = server.reaper().clone().spawn(shutdown.clone());

    let launched = server
        .rocket_with_config(&config.server)
        .launch()
        .await;

    shutdown.cancel();
    let closed = server.sessions().close_all(CloseReason::Shutdown);
    if let Err(e) = reaper.await {
        error!(error = %e, "Session reaper task failed");
    }
    info!(closed, "zbx-mcp server stopped");

    launched
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {e}"))
}

/// Load configuration and apply command-line overrides
fn load_config(options: &RunOptions) -> anyhow::Result<AppConfig> {
    let loader = match &options.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load().context("Failed to load configuration")?;

    if options.read_only {
        config.policy.read_only = true;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    validate_app_config(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Build the upstream client and prove it can authenticate
async fn connect_upstream(config: &AppConfig) -> anyhow::Result<SharedUpstreamGateway> {
    let client = ZabbixClient::new(&config.upstream).context("Failed to create upstream client")?;

    let version = client
        .api_version()
        .await
        .context("Upstream API is unreachable")?;
    client
        .ensure_authenticated()
        .await
        .context("Upstream API rejected the configured credentials")?;

    let status = client.auth_status();
    info!(
        upstream = %client.api_endpoint(),
        api_version = %version,
        strategy = status.strategy.map(|strategy| strategy.as_str()),
        "Upstream API ready"
    );

    Ok(Arc::new(client))
}
