use super::config::BrowserConfig;
use crate::error::ScrapeError;
use headless_chrome::browser::tab::{RequestInterceptor, RequestPausedDecision};
use headless_chrome::browser::transport::{SessionId, Transport};
use headless_chrome::protocol::cdp::Fetch::events::RequestPausedEvent;
use headless_chrome::protocol::cdp::Fetch::FailRequest;
use headless_chrome::protocol::cdp::Network::{ErrorReason, ResourceType};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

/// Aborts requests for resources extraction never reads. The scraper works on
/// markup and text, so images, styles, fonts and media are pure latency.
struct HeavyResourceBlocker;

impl RequestInterceptor for HeavyResourceBlocker {
    fn intercept(
        &self,
        _transport: Arc<Transport>,
        _session_id: SessionId,
        event: RequestPausedEvent,
    ) -> RequestPausedDecision {
        match event.params.resource_Type {
            ResourceType::Image
            | ResourceType::Stylesheet
            | ResourceType::Font
            | ResourceType::Media => RequestPausedDecision::Fail(FailRequest {
                request_id: event.params.request_id,
                error_reason: ErrorReason::BlockedByClient,
            }),
            _ => RequestPausedDecision::Continue(None),
        }
    }
}

/// One Chrome subprocess plus a configured tab, scoped to a single request.
///
/// The underlying resource is an OS subprocess, not garbage-collected memory:
/// callers must pair every acquire with a release. `release` is idempotent and
/// also runs on drop, so an early-returning error path cannot leak the
/// process.
pub struct BrowserSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
    released: bool,
}

impl BrowserSession {
    /// Launch Chrome and open a configured tab.
    ///
    /// Launch failure is fatal for the request; `Browser` tears down the
    /// subprocess on drop, so a half-constructed session leaves no orphan.
    pub fn acquire(config: &BrowserConfig) -> Result<Self, ScrapeError> {
        let launch_options = Self::build_launch_options(config)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| ScrapeError::Render(format!("browser launch failed: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Render(format!("tab creation failed: {}", e)))?;

        tab.set_default_timeout(config.navigation_timeout);

        tab.set_user_agent(&config.user_agent, Some(&config.accept_language), None)
            .map_err(|e| ScrapeError::Render(format!("user agent setup failed: {}", e)))?;

        tab.set_bounds(headless_chrome::types::Bounds::Normal {
            left: Some(0),
            top: Some(0),
            width: Some(config.viewport.0 as f64),
            height: Some(config.viewport.1 as f64),
        })
        .map_err(|e| ScrapeError::Render(format!("viewport setup failed: {}", e)))?;

        tab.enable_fetch(None, None)
            .map_err(|e| ScrapeError::Render(format!("fetch domain setup failed: {}", e)))?;
        tab.enable_request_interception(Arc::new(HeavyResourceBlocker))
            .map_err(|e| ScrapeError::Render(format!("request interception failed: {}", e)))?;

        Ok(Self {
            browser: Some(browser),
            tab,
            released: false,
        })
    }

    fn build_launch_options(config: &BrowserConfig) -> Result<LaunchOptions, ScrapeError> {
        // Constrained deployments ship a trimmed binary and point chrome_path
        // (or CHROME_PATH) at it; otherwise the local install is auto-detected.
        let path = config.chrome_path.clone().map(PathBuf::from);

        // Container-friendly flags; Chrome's sandbox needs privileges most
        // container runtimes do not grant.
        let args: Vec<&OsStr> = vec![
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--disable-setuid-sandbox"),
            OsStr::new("--disable-gpu"),
        ];

        LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(path)
            .window_size(Some(config.viewport))
            .args(args)
            .build()
            .map_err(|e| ScrapeError::Render(format!("browser configuration failed: {}", e)))
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Close the tab and tear down the browser subprocess.
    ///
    /// Safe to call more than once: extraction failures after the tab already
    /// closed must not turn into double-close errors.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = self.tab.close(true) {
            log::debug!("tab close during release: {}", e);
        }
        // Dropping Browser kills the Chrome process and reaps it.
        self.browser.take();
        log::debug!("browser session released");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires Chrome/Chromium
    fn test_acquire_and_release() {
        let config = BrowserConfig::default();
        let mut session = BrowserSession::acquire(&config).unwrap();
        session.release();
        // Second release must be a no-op.
        session.release();
    }

    #[test]
    #[ignore] // Requires Chrome/Chromium
    fn test_drop_releases() {
        let config = BrowserConfig::default();
        let session = BrowserSession::acquire(&config);
        assert!(session.is_ok());
        // Dropping the Ok value must tear the process down without panicking.
    }
}
