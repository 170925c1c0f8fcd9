//! Shipping fee resolution against the carrier's public site.
//!
//! A parallel, address-driven flow: city heuristic, destination-code lookup
//! through the carrier's search endpoint, then a scrape of the
//! server-rendered fee table. Shares the numeric normalizer and the
//! bounded-wait/fallback philosophy with the product pipeline.

use crate::error::ScrapeError;
use crate::helpers::extract_integer;
use crate::http_client::RetryingHttpClient;
use crate::models::ShippingOption;
use crate::sources::select::{select_all, text_of};
use scraper::Html;

const DESTINATION_SEARCH_PATH: &str = "/id/destination/search";
const FEE_TABLE_PATH: &str = "/id/shipping-fee";

/// Fee table rows, primary layout then older markup.
const FEE_TABLE_ROWS: &[&str] = &[
    "table.tariff-table tbody tr",
    "table tbody tr",
    "table tr",
];

/// Resolve a city name to the carrier's destination code.
///
/// Takes the first search result's code; no results and request failures both
/// resolve to `None`, which the caller maps to a 404, not a 500.
pub async fn lookup_destination_code(
    client: &RetryingHttpClient,
    base_url: &str,
    city: &str,
) -> Option<String> {
    let mut url = reqwest::Url::parse(base_url).ok()?;
    url.set_path(DESTINATION_SEARCH_PATH);
    url.query_pairs_mut().append_pair("keyword", city);

    let response = client
        .get_with_retry(url.as_str())
        .await
        .and_then(|r| r.error_for_status());
    let payload = match response {
        Ok(response) => match response.json::<serde_json::Value>().await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("destination search returned bad JSON for '{}': {}", city, e);
                return None;
            }
        },
        Err(e) => {
            log::warn!("destination search failed for '{}': {}", city, e);
            return None;
        }
    };

    // The endpoint answers either a bare array or {"data": [...]}.
    let results = payload
        .get("data")
        .and_then(|d| d.as_array().cloned())
        .or_else(|| payload.as_array().cloned())?;

    results
        .first()?
        .get("code")
        .and_then(|c| c.as_str())
        .map(|c| c.to_string())
}

/// Fetch and parse the fee table for a resolved destination.
pub async fn fetch_shipping_options(
    client: &RetryingHttpClient,
    base_url: &str,
    origin_code: &str,
    destination_code: &str,
    weight_kg: u32,
) -> Result<Vec<ShippingOption>, ScrapeError> {
    let mut url = reqwest::Url::parse(base_url)
        .map_err(|e| ScrapeError::Upstream(format!("bad carrier base URL: {}", e)))?;
    url.set_path(FEE_TABLE_PATH);
    url.query_pairs_mut()
        .append_pair("origin", origin_code)
        .append_pair("destination", destination_code)
        .append_pair("weight", &weight_kg.to_string());

    let html = client
        .get_with_retry(url.as_str())
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ScrapeError::Upstream(format!("fee table fetch failed: {}", e)))?
        .text()
        .await
        .map_err(|e| ScrapeError::Upstream(format!("fee table read failed: {}", e)))?;

    Ok(parse_fee_table(&html))
}

/// Extract `{service, price, etd}` rows; a row missing any field is dropped.
pub fn parse_fee_table(html: &str) -> Vec<ShippingOption> {
    let doc = Html::parse_document(html);
    let mut options = Vec::new();

    for row in select_all(&doc, FEE_TABLE_ROWS) {
        let cells: Vec<String> = match scraper::Selector::parse("td") {
            Ok(sel) => row.select(&sel).map(text_of).collect(),
            Err(_) => continue,
        };
        if cells.len() < 3 {
            continue;
        }

        let service = cells[0].clone();
        if service.is_empty() {
            continue;
        }

        // Price is the first later cell with a positive amount; ETD is the
        // cell after it, falling back to the last cell.
        let price_idx = cells
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, text)| extract_integer(text.as_str()).map(|n| n > 0).unwrap_or(false))
            .map(|(i, _)| i);

        let Some(price_idx) = price_idx else {
            log::debug!("dropping fee row without a price: {:?}", cells);
            continue;
        };
        let price = extract_integer(&cells[price_idx]).unwrap_or(0);

        let etd = cells
            .get(price_idx + 1)
            .or_else(|| cells.last())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && *s != cells[price_idx]);

        let Some(etd) = etd else {
            log::debug!("dropping fee row without an ETD: {:?}", cells);
            continue;
        };

        options.push(ShippingOption { service, price, etd });
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE_PAGE: &str = r#"
        <html><body>
        <table class="tariff-table">
            <thead><tr><th>Service</th><th>Tariff</th><th>ETD</th></tr></thead>
            <tbody>
                <tr><td>REG</td><td>Rp18.000</td><td>2-3 hari</td></tr>
                <tr><td>YES</td><td>Rp32.000</td><td>1 hari</td></tr>
                <tr><td>OKE</td><td></td><td>3-5 hari</td></tr>
                <tr><td></td><td>Rp10.000</td><td>4 hari</td></tr>
            </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_fee_table_drops_incomplete_rows() {
        let options = parse_fee_table(FEE_PAGE);
        assert_eq!(
            options,
            vec![
                ShippingOption {
                    service: "REG".to_string(),
                    price: 18_000,
                    etd: "2-3 hari".to_string(),
                },
                ShippingOption {
                    service: "YES".to_string(),
                    price: 32_000,
                    etd: "1 hari".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_fee_table_four_column_layout() {
        let html = r#"
            <table><tbody>
                <tr><td>REG</td><td>City Courier</td><td>Rp9.000</td><td>1-2</td></tr>
            </tbody></table>
        "#;
        let options = parse_fee_table(html);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].service, "REG");
        assert_eq!(options[0].price, 9_000);
        assert_eq!(options[0].etd, "1-2");
    }

    #[test]
    fn test_parse_fee_table_empty_page() {
        assert!(parse_fee_table("<html><body><p>maintenance</p></body></html>").is_empty());
    }
}
