//! Application state
//!
//! Shared across handlers via `Arc<AppState>`. The pipeline inside holds
//! the only durable state (rule set, namespace map, upstream client), all
//! immutable after startup; handlers only ever read it.

use crate::config::ServerConfig;
use crate::settings::Settings;
use graphwarden_intent::IntentPipeline;
use std::time::Instant;

/// Application state shared across all request handlers
pub struct AppState {
    /// The intent pipeline (immutable rule set + upstream client)
    pub pipeline: IntentPipeline,

    /// Server configuration
    pub config: ServerConfig,

    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build state from configuration and loaded settings
    pub fn with_settings(config: ServerConfig, settings: Settings) -> Self {
        let upstream = settings.upstream_client();
        let pipeline = IntentPipeline::new(settings.rules, settings.namespaces, upstream);

        Self {
            pipeline,
            config,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
