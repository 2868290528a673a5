//! Daemon entry point for the Cellosaurus MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! shared HTTP client, and serves the MCP protocol over stdio or streamable HTTP.

mod config;

use std::sync::Arc;

use cellosaurus_core::client::CellosaurusClient;
use cellosaurus_mcp::server::{serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::config::CellosaurusConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = CellosaurusConfig::from_args()?;
    init_tracing(&config.log_filter);

    let client = Arc::new(CellosaurusClient::new(config.client_config())?);
    if config.enable_stdio {
        serve_stdio(client).await
    } else {
        serve_streamable_http(client, config.http_server_config()).await
    }
}

// stdout carries the stdio transport, so logs always go to stderr.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
