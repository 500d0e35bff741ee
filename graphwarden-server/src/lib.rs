//! Graphwarden HTTP server
//!
//! A thin HTTP boundary around `graphwarden-intent`: it accepts a caller's
//! role and SPARQL query on `/sparql`, forms an intent, runs the pipeline,
//! and translates the outcome (or failure) into an HTTP response.
//!
//! # Example
//!
//! ```ignore
//! use graphwarden_server::{GraphwardenServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let server = GraphwardenServer::new(config).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod settings;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use settings::{ConfigError, Settings};
pub use state::AppState;
pub use telemetry::{init_logging, TelemetryConfig};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Graphwarden HTTP server
pub struct GraphwardenServer {
    state: Arc<AppState>,
    router: Router,
}

impl GraphwardenServer {
    /// Create a server from configuration, loading the policy, namespace,
    /// and endpoint declarations from the configured directory. Malformed
    /// declarations are fatal here, before the listener ever opens.
    pub fn new(config: ServerConfig) -> std::result::Result<Self, ConfigError> {
        let settings = settings::load(&config.config_dir)?;
        Ok(Self::with_settings(config, settings))
    }

    /// Create a server from already-loaded settings
    pub fn with_settings(config: ServerConfig, settings: Settings) -> Self {
        let state = Arc::new(AppState::with_settings(config, settings));
        let router = routes::build_router(state.clone());
        Self { state, router }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(addr = %addr, "graphwarden listening");
        axum::serve(listener, self.router).await
    }
}
