//! Headless browser plumbing for the product detail scraper.
//!
//! `BrowserSession` owns the Chrome subprocess for exactly one request and
//! guarantees its release on every exit path. `PageRenderer` drives
//! navigation and the two-tier readiness waits on the session's tab.

mod config;
mod renderer;
mod session;

pub use config::BrowserConfig;
pub use renderer::PageRenderer;
pub use session::BrowserSession;
