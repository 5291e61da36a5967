//! zbx-mcp - MCP server for a Zabbix monitoring installation
//!
//! Serves monitoring tools to MCP clients over a session-oriented event
//! stream.
//!
//! ## Architecture
//!
//! - Domain layer: error taxonomy and the upstream gateway port (zbx-domain)
//! - Infrastructure: configuration, logging and the upstream client (zbx-infrastructure)
//! - Server: sessions, transport and tools (zbx-server)

use std::process::ExitCode;

use clap::Parser;
use zbx_server::init::{RunOptions, run};

/// Command line interface for zbx-mcp
#[derive(Parser, Debug)]
#[command(name = "zbx-mcp")]
#[command(about = "MCP server exposing Zabbix monitoring tools over SSE")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Refuse tools that modify monitoring data
    #[arg(long)]
    pub read_only: bool,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[rocket::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = RunOptions {
        config: cli.config,
        read_only: cli.read_only,
        port: cli.port,
    };

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("zbx-mcp: {e:#}");
            ExitCode::FAILURE
        }
    }
}
