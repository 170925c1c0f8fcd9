//! HTTP handlers for the scraping endpoints.

use crate::app_state::AppState;
use crate::error::ScrapeError;
use crate::helpers::extract_city_from_address;
use crate::models::ShippingOption;
use crate::sources::{jne, tokopedia};
use actix_web::{get, web, HttpResponse};
use std::collections::HashMap;
use std::time::Instant;

#[get("/product-details")]
async fn product_details(
    data: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ScrapeError> {
    let url = query
        .get("url")
        .cloned()
        .ok_or_else(|| ScrapeError::Validation("missing required query parameter: url".into()))?;
    reqwest::Url::parse(&url)
        .map_err(|_| ScrapeError::Validation("url must be an absolute URL".into()))?;

    log::info!("scraping product details from {}", url);
    let start = Instant::now();
    let browser_config = data.config.browser.create_browser_config();

    // headless_chrome is a blocking API; keep it off the actix workers.
    let outcome = tokio::task::spawn_blocking(move || {
        tokopedia::scrape_product_page(&browser_config, &url)
    })
    .await
    .map_err(|e| ScrapeError::Render(format!("scrape task failed: {}", e)))?;

    match outcome {
        Ok(result) => {
            data.metrics.record_success("product", start.elapsed());
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            data.metrics.record_failure("product", &e.to_string());
            Err(e)
        }
    }
}

#[get("/shipping/fee")]
async fn shipping_fee(
    data: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ScrapeError> {
    let address = query.get("address").cloned().ok_or_else(|| {
        ScrapeError::Validation("missing required query parameter: address".into())
    })?;
    let weight: u32 = query
        .get("weight")
        .ok_or_else(|| {
            ScrapeError::Validation("missing required query parameter: weight".into())
        })?
        .parse()
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| ScrapeError::Validation("weight must be a positive number".into()))?;

    let start = Instant::now();
    match resolve_shipping(&data, &address, weight).await {
        Ok(options) => {
            data.metrics.record_success("shipping", start.elapsed());
            Ok(HttpResponse::Ok().json(options))
        }
        Err(e) => {
            data.metrics.record_failure("shipping", &e.to_string());
            Err(e)
        }
    }
}

async fn resolve_shipping(
    data: &web::Data<AppState>,
    address: &str,
    weight: u32,
) -> Result<Vec<ShippingOption>, ScrapeError> {
    let city = extract_city_from_address(address).ok_or_else(|| ScrapeError::CityResolution {
        address: address.to_string(),
    })?;
    log::info!("resolving shipping fee for city '{}', {} kg", city, weight);

    let shipping = &data.config.shipping;
    let code = jne::lookup_destination_code(&data.http_client, &shipping.base_url, &city)
        .await
        .ok_or(ScrapeError::DestinationResolution { city })?;

    jne::fetch_shipping_options(
        &data.http_client,
        &shipping.base_url,
        &shipping.origin_code,
        &code,
        weight,
    )
    .await
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/metrics")]
async fn get_metrics(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.metrics.snapshot())
}

#[get("/metrics/summary")]
async fn get_metrics_summary(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.metrics.summary())
}

/// Route registration shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(product_details)
        .service(shipping_fee)
        .service(health)
        .service(get_metrics)
        .service(get_metrics_summary);
}
