//! Fallback selector tables for the product detail page.
//!
//! Each field maps to an ordered list of candidates: the primary
//! `data-testid` selector the site currently ships, then legacy class-based
//! alternates observed in older markup and A/B variants. Markup churn on the
//! scraped site should be absorbed here, not in extraction control flow.

pub const PRODUCT_TITLE: &[&str] = &[
    r#"h1[data-testid="lblPDPDetailProductName"]"#,
    r#"[data-testid="lblPDPDetailProductName"]"#,
    r#"h1[data-unify="Typography"]"#,
    ".product-title h1",
];

pub const PRODUCT_PRICE: &[&str] = &[
    r#"[data-testid="lblPDPDetailProductPrice"]"#,
    r#"[itemprop="price"]"#,
    ".price",
];

pub const PRODUCT_SOLD: &[&str] = &[
    r#"[data-testid="lblPDPDetailProductSoldCounter"]"#,
    ".prd_label-integrity",
    ".sold-count",
];

pub const PRODUCT_STOCK: &[&str] = &[
    r#"[data-testid="lblPDPDetailProductStock"]"#,
    ".stock-remaining",
];

pub const PRODUCT_AVAILABILITY: &[&str] = &[
    r#"[data-testid="lblPDPStockAvailability"]"#,
    ".stock-label",
];

pub const MAIN_IMAGE: &[&str] = &[
    r#"img[data-testid="PDPMainImage"]"#,
    ".product-gallery img",
];

pub const THUMBNAIL_IMAGES: &[&str] = &[
    r#"[data-testid="PDPImageThumbnail"] img"#,
    ".thumbnail-list img",
];

pub const STORE_NAME: &[&str] = &[
    r#"[data-testid="llbPDPFooterShopName"]"#,
    ".shop-name h2",
    ".shop-name",
];

pub const STORE_LOCATION: &[&str] = &[
    r#"[data-testid="lblPDPFooterShopLocation"]"#,
    ".shop-location",
];

pub const STORE_RATING: &[&str] = &[
    r#"[data-testid="lblPDPFooterShopRating"]"#,
    ".shop-rating",
];

pub const STORE_AVATAR: &[&str] = &[
    r#"img[data-testid="imgPDPFooterShopAvatar"]"#,
    ".shop-avatar img",
];

pub const REVIEW_OVERALL_RATING: &[&str] = &[
    r#"[data-testid="lblPDPDetailRatingNumber"]"#,
    ".review-score",
];

pub const REVIEW_TOTAL_RATINGS: &[&str] = &[
    r#"[data-testid="lblPDPDetailRatingCounter"]"#,
    ".rating-count",
];

pub const REVIEW_SATISFACTION: &[&str] = &[
    r#"[data-testid="lblPDPDetailSatisfaction"]"#,
    ".satisfaction-label",
];

/// Subtitle carrying the localized "1 - 10 dari N ulasan" review count.
pub const REVIEW_SUBTITLE: &[&str] = &[
    r#"[data-testid="reviewSortingSubtitle"]"#,
    ".review-subtitle",
];

/// Section header whose delimiter-split tail carries a secondary count.
pub const REVIEW_HEADER: &[&str] = &[
    r#"[data-testid="reviewSectionHeader"]"#,
    ".review-header",
];

pub const BREAKDOWN_ROWS: &[&str] = &[
    r#"[data-testid="ratingBreakdownRow"]"#,
    ".rating-bar-row",
];

pub const BREAKDOWN_STAR: &[&str] = &[
    r#"[data-testid="lblRatingBreakdownStar"]"#,
    ".rating-bar-star",
];

pub const BREAKDOWN_COUNT: &[&str] = &[
    r#"[data-testid="lblRatingBreakdownCount"]"#,
    ".rating-bar-count",
];

pub const BREAKDOWN_PROGRESS: &[&str] = &[r#"[role="progressbar"]"#];

pub const BREAKDOWN_PERCENT_TEXT: &[&str] = &[".rating-bar-percentage"];

pub const REVIEW_ENTRIES: &[&str] = &[
    "#review-feed article",
    ".review-card",
];

pub const REVIEWER_NAME: &[&str] = &[
    r#"[data-testid="lblItemUlasanName"]"#,
    ".reviewer-name",
];

pub const REVIEWER_AVATAR: &[&str] = &[
    r#"img[data-testid="imgItemUlasanAvatar"]"#,
    ".reviewer-avatar img",
];

pub const REVIEW_STAR_ICONS: &[&str] = &[
    r#"[data-testid="icnStarFullFilled"]"#,
    ".star-full",
];

pub const REVIEW_COMMENT: &[&str] = &[
    r#"[data-testid="lblItemUlasanReview"]"#,
    ".review-text",
];

pub const REVIEW_DATE: &[&str] = &[
    r#"[data-testid="lblItemUlasanDate"]"#,
    ".review-date",
    "time",
];

/// Review section readiness: the deferred wait targets the feed content, the
/// anchor is scrolled into view to trigger its lazy load.
pub const REVIEW_SECTION: &str = "#review-feed article";
pub const REVIEW_ANCHOR: &str = "#pdp_comp-review";

/// Asset URLs that are icons or placeholders, never product photography.
pub const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder",
    "default-avatar",
    "default_picture",
    "/icon",
    "grey-bg",
];
