//! Graphwarden server CLI
//!
//! Run with: `cargo run -p graphwarden-server -- --help`

use clap::Parser;
use graphwarden_server::{init_logging, GraphwardenServer, ServerConfig, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    let telemetry_config = TelemetryConfig::from_env(&config.log_level);
    init_logging(&telemetry_config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        config_dir = %config.config_dir.display(),
        cors = config.cors_enabled,
        "starting graphwarden"
    );

    // Declaration files are loaded and validated here; a malformed rule or
    // namespace file stops the process before the listener opens.
    let server = GraphwardenServer::new(config)?;
    server.run().await.map_err(Into::into)
}
