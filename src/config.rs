use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub shipping: ShippingSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Explicit Chrome binary path. Deployments with a bundled trimmed binary
    /// (serverless images) set this or the CHROME_PATH environment variable;
    /// when absent the locally installed browser is auto-detected.
    #[serde(default)]
    pub chrome_path: Option<String>,

    /// Navigation timeout in seconds. Exceeding it aborts the request.
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Bounded wait for the document body after navigation.
    #[serde(default = "default_base_ready_timeout")]
    pub base_ready_timeout_secs: u64,

    /// Best-effort wait for the lazy-loaded review section. Exceeding it
    /// degrades the response to an empty reviews array.
    #[serde(default = "default_deferred_timeout")]
    pub deferred_section_timeout_secs: u64,

    /// Fixed pause after the deferred section appears, letting late DOM
    /// mutations finish.
    #[serde(default = "default_settle")]
    pub settle_millis: u64,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShippingSettings {
    /// Carrier site base URL; overridable so tests can point at a mock server.
    #[serde(default = "default_carrier_base_url")]
    pub base_url: String,

    /// Fixed origin locality code the storefront ships from.
    #[serde(default = "default_origin_code")]
    pub origin_code: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,

    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,
}

fn default_navigation_timeout() -> u64 { 30 }
fn default_base_ready_timeout() -> u64 { 5 }
fn default_deferred_timeout() -> u64 { 10 }
fn default_settle() -> u64 { 750 }
fn default_viewport_width() -> u32 { 1366 }
fn default_viewport_height() -> u32 { 768 }
fn default_carrier_base_url() -> String { "https://www.jne.co.id".to_string() }
fn default_origin_code() -> String { "CGK10000".to_string() }
fn default_http_timeout() -> u64 { 30 }
fn default_max_retries() -> usize { 3 }
fn default_initial_retry_delay() -> u64 { 500 }
fn default_max_retry_delay() -> u64 { 8000 }

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            navigation_timeout_secs: default_navigation_timeout(),
            base_ready_timeout_secs: default_base_ready_timeout(),
            deferred_section_timeout_secs: default_deferred_timeout(),
            settle_millis: default_settle(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl Default for ShippingSettings {
    fn default() -> Self {
        Self {
            base_url: default_carrier_base_url(),
            origin_code: default_origin_code(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay(),
            max_retry_delay_ms: default_max_retry_delay(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("config.toml is invalid, using defaults: {}", e),
                }
            }
        }
        Self::default()
    }
}

impl HttpSettings {
    /// Build the retrying HTTP client used by the shipping flow.
    pub fn create_http_client(&self) -> Result<crate::http_client::RetryingHttpClient, reqwest::Error> {
        use crate::http_client::{HttpClientConfig, RetryingHttpClient};
        use std::time::Duration;

        RetryingHttpClient::with_config(HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            initial_retry_delay_ms: self.initial_retry_delay_ms,
            max_retry_delay_ms: self.max_retry_delay_ms,
        })
    }
}

impl BrowserSettings {
    /// Build the runtime browser configuration, resolving the Chrome binary
    /// from config first, then the CHROME_PATH environment variable.
    pub fn create_browser_config(&self) -> crate::browser::BrowserConfig {
        use std::time::Duration;

        crate::browser::BrowserConfig {
            chrome_path: self
                .chrome_path
                .clone()
                .or_else(|| std::env::var("CHROME_PATH").ok()),
            navigation_timeout: Duration::from_secs(self.navigation_timeout_secs),
            base_ready_timeout: Duration::from_secs(self.base_ready_timeout_secs),
            deferred_section_timeout: Duration::from_secs(self.deferred_section_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_millis),
            viewport: (self.viewport_width, self.viewport_height),
            ..crate::browser::BrowserConfig::default()
        }
    }
}
