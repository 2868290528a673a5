use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use cellosaurus_core::client::{BASE_URL, ClientConfig};
use cellosaurus_mcp::server::{DEFAULT_MCP_HTTP_ADDR, DEFAULT_SSE_KEEP_ALIVE, McpHttpServerConfig};
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "cellosaurus-mcpd", version, about = "Cellosaurus MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "CELLOSAURUS_BASE_URL", default_value = BASE_URL)]
    base_url: String,

    #[arg(
        long,
        env = "CELLOSAURUS_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout_secs: u64,

    #[arg(
        long = "stdio",
        env = "CELLOSAURUS_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "CELLOSAURUS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long = "stateful",
        env = "CELLOSAURUS_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// SSE keep-alive interval in seconds; 0 disables keep-alive pings.
    #[arg(
        long,
        env = "CELLOSAURUS_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE.as_secs()
    )]
    sse_keep_alive_secs: u64,

    #[arg(long, env = "CELLOSAURUS_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct CellosaurusConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub sse_keep_alive: Option<Duration>,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl CellosaurusConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout)
    }

    pub const fn http_server_config(&self) -> McpHttpServerConfig {
        McpHttpServerConfig::new(self.mcp_http_addr)
            .with_stateful_mode(self.mcp_stateful)
            .with_sse_keep_alive(self.sse_keep_alive)
    }
}

impl TryFrom<CliArgs> for CellosaurusConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let base_url = Url::parse(args.base_url.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidSetting {
                name: "CELLOSAURUS_BASE_URL",
                value: args.base_url.clone(),
            })?;

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "CELLOSAURUS_TIMEOUT_SECS",
                value: args.timeout_secs.to_string(),
            });
        }

        let log_filter = if args.log_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log_filter
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
            sse_keep_alive: (args.sse_keep_alive_secs > 0)
                .then_some(Duration::from_secs(args.sse_keep_alive_secs)),
            log_filter,
        })
    }
}
