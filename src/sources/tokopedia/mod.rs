//! Product detail scraping for the marketplace storefront.
//!
//! Renders the listing in a headless browser, snapshots the DOM, then runs
//! pure offline extraction over the parsed HTML. The review section is
//! lazy-loaded enhancement: its wait is best-effort and its absence degrades
//! the response to empty review arrays rather than failing the request.

pub mod product;
pub mod reviews;
pub mod selectors;

use crate::browser::{BrowserConfig, BrowserSession, PageRenderer};
use crate::error::ScrapeError;
use crate::models::ScrapedProductData;
use scraper::Html;

/// Scrape one product detail page.
///
/// Owns the full browser lifecycle for this request: the session acquired
/// here is released on every exit path, including extraction errors after
/// navigation.
pub fn scrape_product_page(
    config: &BrowserConfig,
    url: &str,
) -> Result<ScrapedProductData, ScrapeError> {
    let mut session = BrowserSession::acquire(config)?;
    let result = render_and_extract(&session, config, url);
    session.release();
    result
}

fn render_and_extract(
    session: &BrowserSession,
    config: &BrowserConfig,
    url: &str,
) -> Result<ScrapedProductData, ScrapeError> {
    let renderer = PageRenderer::new(session.tab(), config);

    renderer.navigate(url)?;
    renderer.wait_for_base_ready()?;

    let reviews_ready =
        renderer.wait_for_deferred_section(selectors::REVIEW_SECTION, selectors::REVIEW_ANCHOR);
    if !reviews_ready {
        log::warn!("review section unavailable for {}, continuing without it", url);
    }

    let html = renderer.content()?;
    Ok(extract_all(&html))
}

/// Pure extraction over a DOM snapshot; exposed separately so tests can feed
/// fixture HTML without a browser.
pub fn extract_all(html: &str) -> ScrapedProductData {
    let doc = Html::parse_document(html);
    ScrapedProductData {
        product: product::extract_product(&doc),
        store: product::extract_store(&doc),
        reviews: reviews::extract_reviews(&doc),
    }
}
