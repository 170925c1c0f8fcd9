//! Application state for the Actix-web server
//!
//! Shared across all HTTP handlers through `web::Data`. There is no shared
//! browser pool: a browser process is acquired per request and never
//! outlives it. Only the shipping HTTP client and the metrics tracker are
//! long-lived.

use crate::config::Config;
use crate::http_client::RetryingHttpClient;
use crate::metrics::MetricsTracker;

pub struct AppState {
    /// Retrying HTTP client for the shipping flow (destination search + fee
    /// table). The product flow owns its browser per request instead.
    pub http_client: RetryingHttpClient,
    /// Per-pipeline success/failure/latency tracking.
    pub metrics: MetricsTracker,
    /// Application configuration loaded from config.toml.
    pub config: Config,
}
