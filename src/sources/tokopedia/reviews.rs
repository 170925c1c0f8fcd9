//! Review feed aggregation: summary numbers, the per-star histogram and the
//! individual review entries.

use super::selectors;
use crate::helpers::{extract_count, extract_float, extract_integer};
use crate::models::{IndividualReview, RatingBreakdown, ReviewsInfo};
use crate::sources::select::{
    first_attr_in, first_parsed, first_text, first_text_in, select_all, select_all_in,
};
use regex::Regex;
use scraper::{ElementRef, Html};

pub fn extract_reviews(doc: &Html) -> ReviewsInfo {
    let individual_reviews = extract_individual_reviews(doc);
    let total_reviews = resolve_total_reviews(doc, individual_reviews.len());

    ReviewsInfo {
        overall_rating: first_parsed(doc, selectors::REVIEW_OVERALL_RATING, extract_float),
        total_ratings: first_parsed(doc, selectors::REVIEW_TOTAL_RATINGS, extract_count),
        total_reviews,
        satisfaction_percentage: first_parsed(
            doc,
            selectors::REVIEW_SATISFACTION,
            extract_float,
        ),
        rating_breakdown: extract_rating_breakdown(doc),
        individual_reviews,
    }
}

/// Histogram rows are all-or-nothing: a row missing star, count or
/// percentage is dropped outright, never emitted with a null field.
fn extract_rating_breakdown(doc: &Html) -> Vec<RatingBreakdown> {
    let mut breakdown = Vec::new();

    for row in select_all(doc, selectors::BREAKDOWN_ROWS) {
        let star = first_text_in(row, selectors::BREAKDOWN_STAR)
            .and_then(|t| extract_integer(&t))
            .filter(|s| (1..=5).contains(s));
        let count =
            first_text_in(row, selectors::BREAKDOWN_COUNT).and_then(|t| extract_integer(&t));
        let percentage = row_percentage(row);

        match (star, count, percentage) {
            (Some(star), Some(count), Some(percentage)) => breakdown.push(RatingBreakdown {
                star: star as u8,
                count,
                percentage,
            }),
            _ => log::debug!("dropping partial rating breakdown row"),
        }
    }

    breakdown
}

/// Percentage from the ARIA progress value, with a textual `%` fallback.
fn row_percentage(row: ElementRef) -> Option<f64> {
    if let Some(value) = first_attr_in(row, selectors::BREAKDOWN_PROGRESS, "aria-valuenow") {
        if let Some(pct) = extract_float(&value) {
            return Some(pct);
        }
    }
    first_text_in(row, selectors::BREAKDOWN_PERCENT_TEXT)
        .filter(|t| t.contains('%'))
        .and_then(|t| extract_float(&t))
}

/// An entry survives when at least one of {name, comment, rating} parsed.
fn extract_individual_reviews(doc: &Html) -> Vec<IndividualReview> {
    let mut reviews = Vec::new();

    for entry in select_all(doc, selectors::REVIEW_ENTRIES) {
        let review = IndividualReview {
            reviewer_name: first_text_in(entry, selectors::REVIEWER_NAME),
            reviewer_avatar_url: reviewer_avatar(entry),
            rating: entry_rating(entry),
            comment: first_text_in(entry, selectors::REVIEW_COMMENT),
            date: first_text_in(entry, selectors::REVIEW_DATE),
        };

        if review.reviewer_name.is_some() || review.comment.is_some() || review.rating.is_some()
        {
            reviews.push(review);
        } else {
            log::debug!("skipping review entry with no name, comment or rating");
        }
    }

    reviews
}

/// Rendered avatar src, falling back to the lazy-load attribute when the
/// rendered value is still the placeholder data-URI.
fn reviewer_avatar(entry: ElementRef) -> Option<String> {
    let rendered = first_attr_in(entry, selectors::REVIEWER_AVATAR, "src");
    match rendered {
        Some(src) if !src.starts_with("data:") => Some(src),
        _ => first_attr_in(entry, selectors::REVIEWER_AVATAR, "data-src")
            .filter(|src| !src.starts_with("data:")),
    }
}

/// Star rating counted from rendered star icons, not a numeric attribute.
fn entry_rating(entry: ElementRef) -> Option<u8> {
    let icons = select_all_in(entry, selectors::REVIEW_STAR_ICONS);
    if icons.is_empty() {
        None
    } else {
        Some(icons.len().min(5) as u8)
    }
}

/// Resolution order for the review count, first positive hit wins:
/// the localized "dari N ulasan" subtitle, a delimiter-split header count,
/// the number of entries actually extracted, then zero.
fn resolve_total_reviews(doc: &Html, extracted: usize) -> u64 {
    if let Some(subtitle) = first_text(doc, selectors::REVIEW_SUBTITLE) {
        if let Some(total) = subtitle_count(&subtitle) {
            return total;
        }
    }

    if let Some(header) = first_text(doc, selectors::REVIEW_HEADER) {
        if let Some(total) = header_count(&header) {
            return total;
        }
    }

    extracted as u64
}

fn subtitle_count(subtitle: &str) -> Option<u64> {
    let re = Regex::new(r"dari\s+([\d.,]+)\s+ulasan").ok()?;
    let captured = re.captures(subtitle)?.get(1)?.as_str().to_string();
    extract_integer(&captured).filter(|n| *n > 0)
}

fn header_count(header: &str) -> Option<u64> {
    let tail = header.rsplit(['•', '(', '·']).next()?;
    extract_integer(tail).filter(|n| *n > 0)
}
