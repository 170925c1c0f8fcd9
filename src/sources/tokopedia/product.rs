//! Product and store field extraction from the rendered DOM snapshot.
//!
//! Operates only on parsed HTML; by the time this runs the browser may
//! already be gone. Every field degrades to `None` independently.

use super::selectors;
use crate::helpers::{extract_count, extract_float, extract_integer};
use crate::models::{ProductInfo, StoreInfo};
use crate::sources::select::{first_attr, first_parsed, first_text, select_all};
use scraper::Html;

pub fn extract_product(doc: &Html) -> ProductInfo {
    ProductInfo {
        title: first_text(doc, selectors::PRODUCT_TITLE),
        image_urls: extract_images(doc),
        sold_count: first_parsed(doc, selectors::PRODUCT_SOLD, extract_count),
        stock: resolve_stock(doc),
        price: first_parsed(doc, selectors::PRODUCT_PRICE, extract_integer),
    }
}

pub fn extract_store(doc: &Html) -> StoreInfo {
    StoreInfo {
        name: first_text(doc, selectors::STORE_NAME),
        location: first_text(doc, selectors::STORE_LOCATION),
        rating: first_parsed(doc, selectors::STORE_RATING, extract_float),
        avatar_url: first_attr(doc, selectors::STORE_AVATAR, "src")
            .filter(|src| !is_excluded_image(src)),
    }
}

/// Explicit numeric stock label wins; otherwise the availability badge is
/// interpreted: "available, no number" counts as 1, sold out as 0.
fn resolve_stock(doc: &Html) -> Option<u64> {
    if let Some(stock) = first_parsed(doc, selectors::PRODUCT_STOCK, extract_integer) {
        return Some(stock);
    }

    let badge = first_text(doc, selectors::PRODUCT_AVAILABILITY)?;
    let lower = badge.to_lowercase();
    if lower.contains("habis") || lower.contains("sold out") {
        return Some(0);
    }
    if let Some(n) = extract_integer(&badge) {
        return Some(n);
    }
    Some(1)
}

/// Main image first, then thumbnails; inline data URIs and placeholder assets
/// excluded; deduplicated by URL ignoring the query string, order preserved.
fn extract_images(doc: &Html) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(main) = first_attr(doc, selectors::MAIN_IMAGE, "src") {
        candidates.push(main);
    }

    for thumb in select_all(doc, selectors::THUMBNAIL_IMAGES) {
        let src = thumb.value().attr("src").unwrap_or_default();
        // Lazy-loaded thumbnails render a data-URI stub in src.
        let url = if src.is_empty() || src.starts_with("data:") {
            thumb.value().attr("data-src").unwrap_or_default()
        } else {
            src
        };
        if !url.is_empty() {
            candidates.push(url.to_string());
        }
    }

    let mut seen: Vec<String> = Vec::new();
    let mut images: Vec<String> = Vec::new();
    for url in candidates {
        if is_excluded_image(&url) {
            continue;
        }
        let key = url_without_query(&url);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        images.push(url);
    }
    images
}

fn is_excluded_image(url: &str) -> bool {
    url.starts_with("data:")
        || selectors::PLACEHOLDER_MARKERS
            .iter()
            .any(|marker| url.contains(marker))
}

fn url_without_query(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    }
}
