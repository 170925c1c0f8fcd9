use serde::{Deserialize, Serialize};

/// Full result of scraping a marketplace product detail page.
///
/// Every scalar field is independently nullable: a missing element on the
/// rendered page degrades that one field to `null` in the response, never the
/// whole scrape. Array fields default to empty, never null.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProductData {
    pub product: ProductInfo,
    pub store: StoreInfo,
    pub reviews: ReviewsInfo,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub title: Option<String>,
    /// Deduplicated by URL ignoring query string; main image always first.
    pub image_urls: Vec<String>,
    pub sold_count: Option<u64>,
    pub stock: Option<u64>,
    pub price: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsInfo {
    pub overall_rating: Option<f64>,
    pub total_ratings: Option<u64>,
    pub total_reviews: u64,
    pub satisfaction_percentage: Option<f64>,
    pub rating_breakdown: Vec<RatingBreakdown>,
    pub individual_reviews: Vec<IndividualReview>,
}

/// One row of the per-star rating histogram.
///
/// Emitted only when star, count and percentage all parsed; partial rows are
/// dropped rather than padded with nulls.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub star: u8,
    pub count: u64,
    pub percentage: f64,
}

/// A single entry from the review feed.
///
/// Kept when at least one of {reviewer_name, comment, rating} is present.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndividualReview {
    pub reviewer_name: Option<String>,
    pub reviewer_avatar_url: Option<String>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub date: Option<String>,
}

/// One carrier service row from the shipping fee table.
///
/// Kept only when all three fields parse.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub service: String,
    pub price: u64,
    pub etd: String,
}
