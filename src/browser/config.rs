use std::time::Duration;

/// Runtime configuration for one browser session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Explicit Chrome binary path; `None` auto-detects the local install.
    pub chrome_path: Option<String>,

    /// Fixed desktop user agent presented to the scraped site.
    pub user_agent: String,

    /// Accept-Language header, Indonesian prioritized over English.
    pub accept_language: String,

    /// Fixed viewport, desktop-sized so the desktop markup variant renders.
    pub viewport: (u32, u32),

    /// Navigation timeout. Fatal when exceeded.
    pub navigation_timeout: Duration,

    /// Bounded wait for the document body after navigation.
    pub base_ready_timeout: Duration,

    /// Best-effort wait for the lazy-loaded review section. Non-fatal.
    pub deferred_section_timeout: Duration,

    /// Fixed pause after the deferred section appears.
    pub settle_delay: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
                    .to_string(),
            accept_language: "id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            viewport: (1366, 768),
            navigation_timeout: Duration::from_secs(30),
            base_ready_timeout: Duration::from_secs(5),
            deferred_section_timeout: Duration::from_secs(10),
            settle_delay: Duration::from_millis(750),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.chrome_path.is_none());
        assert_eq!(config.viewport, (1366, 768));
        assert!(config.accept_language.starts_with("id-ID"));
        assert!(config.navigation_timeout > config.deferred_section_timeout);
    }
}
