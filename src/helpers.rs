//! Helper functions shared by the scraping pipelines
//!
//! This module provides the locale-aware text-to-number conversions used by
//! both the product extractor and the shipping fee resolver, plus the
//! city-from-address heuristic:
//! - Integer extraction from currency/count strings (`"Rp1.234.567"`)
//! - Float extraction across mixed id-ID / en-US separator conventions
//! - Abbreviated marketplace counts (`"5,2 rb"`, `"1,2 jt"`)
//! - Destination city guessing from a free-form Indonesian address

use regex::Regex;

/// Extract an integer from locale-formatted text.
///
/// Currency symbols, separators and parentheses are stripped first, then the
/// first contiguous run of digits wins. `"Rp1.234.567"` yields `1234567`.
pub fn extract_integer(text: &str) -> Option<u64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '(' | ')'))
        .collect();
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let digits: String = cleaned[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Extract a float from text that may use either `4,9`-style or `4.9`-style
/// notation, including grouped forms like `1.234,5` and `1,234.5`.
///
/// When both separators appear, the rightmost one is the decimal point. A lone
/// separator followed by exactly three digits is treated as a thousands
/// separator (`"1.234"` is 1234, not 1.234).
pub fn extract_float(text: &str) -> Option<f64> {
    let re = Regex::new(r"\d+(?:[.,]\d+)*").ok()?;
    let raw = re.find(text)?.as_str();

    let dots = raw.matches('.').count();
    let commas = raw.matches(',').count();

    let normalized = match (dots, commas) {
        (0, 0) => raw.to_string(),
        (d, c) if d > 0 && c > 0 => {
            if raw.rfind('.') > raw.rfind(',') {
                raw.replace(',', "")
            } else {
                raw.replace('.', "").replace(',', ".")
            }
        }
        (d, 0) if d > 1 => raw.replace('.', ""),
        (0, c) if c > 1 => raw.replace(',', ""),
        // Single separator: a three-digit group reads as thousands.
        _ => match raw.split_once(['.', ',']) {
            Some((_, tail)) if tail.len() == 3 => raw.replace(['.', ','], ""),
            Some(_) => raw.replace(',', "."),
            None => raw.to_string(),
        },
    };

    normalized.parse().ok()
}

/// Extract a count that may carry a marketplace abbreviation suffix.
///
/// `"Terjual 5,2 rb"` yields `5200`; `"1,2 jt"` yields `1200000`; plain
/// numbers fall through to [`extract_integer`].
pub fn extract_count(text: &str) -> Option<u64> {
    let re = Regex::new(r"(?i)([\d.,]+)\s*(rb|ribu|jt|juta)\b").ok()?;
    if let Some(caps) = re.captures(text) {
        let value = extract_float(caps.get(1)?.as_str())?;
        let scale = match caps.get(2)?.as_str().to_lowercase().as_str() {
            "jt" | "juta" => 1_000_000.0,
            _ => 1_000.0,
        };
        return Some((value * scale).round() as u64);
    }
    extract_integer(text)
}

/// Municipality markers that directly identify a city segment.
const CITY_PREFIXES: &[&str] = &["Kota ", "Kabupaten ", "Kab. "];

/// Words that mark a segment as a country, island, region or province rather
/// than a city. Matched as standalone words so "Bali" never swallows
/// "Balikpapan".
const NON_CITY_TERMS: &[&str] = &[
    "indonesia",
    "jawa",
    "sumatera",
    "sumatra",
    "kalimantan",
    "sulawesi",
    "papua",
    "bali",
    "nusa",
    "tenggara",
    "maluku",
    "provinsi",
    "prov.",
    "d.i.",
    "d.i",
    "di.",
    "daerah",
    "istimewa",
    "dki",
];

fn is_postal_code(token: &str) -> bool {
    token.len() == 5 && token.chars().all(|c| c.is_ascii_digit())
}

fn contains_non_city_term(segment: &str) -> bool {
    segment
        .to_lowercase()
        .split_whitespace()
        .any(|word| NON_CITY_TERMS.contains(&word))
}

fn strip_trailing_postal(segment: &str) -> String {
    let words: Vec<&str> = segment.split_whitespace().collect();
    let kept: Vec<&str> = match words.split_last() {
        Some((last, rest)) if is_postal_code(last) => rest.to_vec(),
        _ => words,
    };
    kept.join(" ")
}

/// Guess the destination city from a free-form comma-separated address.
///
/// Segments prefixed by a municipality marker ("Kota ", "Kabupaten ", "Kab. ")
/// win outright. Otherwise segments are scanned from the end backward,
/// skipping postal-code tokens and country/island/province terms, and the
/// first remaining segment is returned. This is a heuristic, not a geocoder:
/// malformed or ambiguous addresses may yield a wrong or absent city.
pub fn extract_city_from_address(address: &str) -> Option<String> {
    let segments: Vec<String> = address
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    for segment in &segments {
        for prefix in CITY_PREFIXES {
            if let Some(city) = segment.strip_prefix(prefix) {
                let city = strip_trailing_postal(city.trim());
                if !city.is_empty() {
                    return Some(city);
                }
            }
        }
    }

    // No marker: walk backward past postal codes and administrative regions.
    for segment in segments.iter().rev() {
        if is_postal_code(segment) || contains_non_city_term(segment) {
            continue;
        }
        // Street-looking segments are a last resort; skip obvious ones.
        if segment.to_lowercase().starts_with("jl.")
            || segment.to_lowercase().starts_with("jalan ")
        {
            continue;
        }
        let city = strip_trailing_postal(segment);
        if !city.is_empty() {
            return Some(city);
        }
    }

    None
}
