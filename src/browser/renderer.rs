use super::config::BrowserConfig;
use crate::error::ScrapeError;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Drives navigation and readiness waits on a session's tab.
///
/// The timeout policy is two-tier by design: navigation and the base-ready
/// wait are fatal, while the deferred-section wait degrades gracefully. The
/// two must not be collapsed into a single retry abstraction.
pub struct PageRenderer<'a> {
    tab: &'a Arc<Tab>,
    config: &'a BrowserConfig,
}

impl<'a> PageRenderer<'a> {
    pub fn new(tab: &'a Arc<Tab>, config: &'a BrowserConfig) -> Self {
        Self { tab, config }
    }

    /// Navigate to the product page. A timeout here aborts the request.
    pub fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::Render(format!("failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Render(format!("navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Bounded wait for the minimal readiness marker (document body).
    pub fn wait_for_base_ready(&self) -> Result<(), ScrapeError> {
        self.wait_for_selector("body", self.config.base_ready_timeout)
            .map_err(|e| ScrapeError::Render(format!("page body never appeared: {}", e)))
    }

    /// Best-effort wait for a lazy-loaded content region.
    ///
    /// Scrolls the anchor into view to trigger loading, then waits bounded for
    /// the nested region. On timeout this logs a warning and reports `false`;
    /// the region is enhancement, and its absence never fails the request.
    pub fn wait_for_deferred_section(&self, selector: &str, scroll_anchor: &str) -> bool {
        if let Err(e) = self.scroll_into_view(scroll_anchor) {
            log::debug!("scroll to {} failed: {}", scroll_anchor, e);
        }

        match self.wait_for_selector(selector, self.config.deferred_section_timeout) {
            Ok(()) => {
                self.settle();
                true
            }
            Err(e) => {
                log::warn!(
                    "deferred section {} did not appear within {:?}: {}",
                    selector,
                    self.config.deferred_section_timeout,
                    e
                );
                false
            }
        }
    }

    /// Fixed pause letting late DOM mutations finish after the deferred
    /// section appears. A heuristic, not a correctness guarantee.
    pub fn settle(&self) {
        std::thread::sleep(self.config.settle_delay);
    }

    /// Final serialized HTML. Extraction is offline from this point on.
    pub fn content(&self) -> Result<String, ScrapeError> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::Render(format!("HTML snapshot failed: {}", e)))
    }

    fn scroll_into_view(&self, selector: &str) -> Result<(), String> {
        let script = format!(
            r#"(function() {{
                var el = document.querySelector('{}');
                if (el) {{ el.scrollIntoView({{ block: 'center' }}); return true; }}
                return false;
            }})()"#,
            selector.replace('\'', "\\'")
        );

        self.tab
            .evaluate(&script, false)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Poll for a selector via querySelector; selector errors count as
    /// "not found yet" rather than aborting the wait.
    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), String> {
        let start = Instant::now();
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            selector.replace('\'', "\\'")
        );

        loop {
            if start.elapsed() > timeout {
                return Err(format!("timed out waiting for selector {}", selector));
            }

            if let Ok(result) = self.tab.evaluate(&script, false) {
                if let Some(value) = result.value {
                    if value.as_bool() == Some(true) {
                        return Ok(());
                    }
                }
            }

            std::thread::sleep(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::BrowserSession;

    #[test]
    #[ignore] // Requires Chrome/Chromium and internet
    fn test_navigate_and_content() {
        let config = BrowserConfig::default();
        let mut session = BrowserSession::acquire(&config).unwrap();
        {
            let renderer = PageRenderer::new(session.tab(), &config);
            renderer.navigate("https://example.com").unwrap();
            renderer.wait_for_base_ready().unwrap();
            let html = renderer.content().unwrap();
            assert!(html.contains("Example Domain"));
        }
        session.release();
    }

    #[test]
    #[ignore] // Requires Chrome/Chromium and internet
    fn test_deferred_section_timeout_is_non_fatal() {
        let config = BrowserConfig {
            deferred_section_timeout: Duration::from_secs(2),
            ..BrowserConfig::default()
        };
        let mut session = BrowserSession::acquire(&config).unwrap();
        {
            let renderer = PageRenderer::new(session.tab(), &config);
            renderer.navigate("https://example.com").unwrap();
            renderer.wait_for_base_ready().unwrap();
            assert!(!renderer.wait_for_deferred_section("#no-such-region", "#no-such-anchor"));
            // The page must still be usable afterwards.
            assert!(renderer.content().is_ok());
        }
        session.release();
    }
}
