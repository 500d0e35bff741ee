//! Server configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Graphwarden HTTP server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "graphwarden")]
#[command(about = "Role-scoped SPARQL access proxy")]
pub struct ServerConfig {
    /// Directory holding config.json, policies.json, and prefixes.json
    #[arg(long, env = "GRAPHWARDEN_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "GRAPHWARDEN_LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen_addr: SocketAddr,

    /// Enable CORS (Cross-Origin Resource Sharing)
    #[arg(long, env = "GRAPHWARDEN_CORS_ENABLED", default_value = "true")]
    pub cors_enabled: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "GRAPHWARDEN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("."),
            listen_addr: "0.0.0.0:3000".parse().expect("valid default address"),
            cors_enabled: true,
            log_level: "info".to_string(),
        }
    }
}
