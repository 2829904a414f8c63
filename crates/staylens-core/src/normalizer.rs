//! Normalizer: turns loosely-typed [`RawRecord`] values into [`CleanRecord`]s.
//!
//! Each field has its own fallible parser returning `Option`. A record whose
//! required field fails to parse is excluded and tallied in the
//! [`NormalizeReport`]; the failure never propagates further.
//!
//! Required fields: name, rating, base price, final price, city. Rated-by
//! count, room size, amenities and category are optional.

use crate::config::NormalizeConfig;
use crate::dataset::{Dataset, NormalizeReport};
use crate::types::{CleanRecord, RawRecord, Rejection, UNKNOWN_CATEGORY};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Square metres to square feet.
const SQM_TO_SQFT: f64 = 10.7639;

/// Separators recognised in amenity text when no config is supplied.
pub const DEFAULT_AMENITY_DELIMITERS: [&str; 4] = [",", "|", "•", ";"];

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("leading number regex"));

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(k\b)?").expect("amount regex"));

static ROOM_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(sq\.?\s*m(?:eters?|etres?)?\b|sqm\b|m²|m2\b)?")
        .expect("room size regex")
});

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse the leading decimal number of a rating string (`"4.5 stars"` → 4.5).
///
/// Returns `None` when the text does not start with a number. Range checks
/// happen in [`Normalizer::normalize`], not here.
pub fn parse_rating(text: &str) -> Option<f64> {
    let caps = LEADING_NUMBER.captures(text)?;
    caps[1].parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Parse a price string such as `"₹1,200"`, `"Rs. 999"` or `"1.5k"`.
///
/// The currency symbol and thousands separators are dropped, then the first
/// number is taken. A `k` suffix multiplies by 1000.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned = text.to_lowercase().replace(['₹', ','], "");
    let caps = AMOUNT.captures(&cleaned)?;
    let value = caps[1].parse::<f64>().ok()?;
    // Round to paise so "1.1k" is 1100 rather than 1100.0000000000002.
    let value = if caps.get(2).is_some() {
        (value * 100_000.0).round() / 100.0
    } else {
        value
    };
    value.is_finite().then_some(value)
}

/// Parse a rating-count string (`"1.2k ratings"` → 1200, `"(345)"` → 345).
pub fn parse_count(text: &str) -> Option<u64> {
    parse_currency(text).map(|n| n.trunc() as u64)
}

/// Parse a room size and normalise it to square feet.
///
/// Sizes tagged as square metres are converted; anything else is assumed to
/// already be square feet. Zero sizes are treated as missing.
pub fn parse_room_size(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    let caps = ROOM_SIZE.captures(&lowered)?;
    let value = caps[1].parse::<f64>().ok()?;
    let sqft = if caps.get(2).is_some() { value * SQM_TO_SQFT } else { value };
    (sqft.is_finite() && sqft > 0.0).then_some(sqft)
}

/// Pick the city out of a comma-separated free-text address.
///
/// Segments are scanned from the end; the first one that contains a letter
/// and is at least `min_len` characters long wins. If none qualifies the last
/// segment is used, provided it contains a letter at all.
pub fn extract_city(address: &str, min_len: usize) -> Option<String> {
    let parts: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let has_letter = |p: &&str| p.chars().any(char::is_alphabetic);

    parts
        .iter()
        .rev()
        .find(|p| has_letter(p) && p.chars().count() >= min_len)
        .or_else(|| parts.last().filter(|p| has_letter(p)))
        .map(|p| p.to_string())
}

/// Split an amenity list into normalised tokens.
///
/// Accepts either a JSON list (one amenity per element) or delimited text,
/// including Python-style list text such as `"['WiFi', 'AC']"`. Tokens are
/// trimmed, case-folded and deduplicated.
pub fn parse_amenities<D: AsRef<str>>(value: &Value, delimiters: &[D]) -> BTreeSet<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(value_text)
            .filter_map(|t| normalize_amenity(&t))
            .collect(),
        other => match value_text(other) {
            Some(text) => split_amenities(&text, delimiters),
            None => BTreeSet::new(),
        },
    }
}

fn split_amenities<D: AsRef<str>>(text: &str, delimiters: &[D]) -> BTreeSet<String> {
    let mut unified = text.to_string();
    for d in delimiters {
        let d = d.as_ref();
        if !d.is_empty() {
            unified = unified.replace(d, "\u{0}");
        }
    }
    unified.split('\u{0}').filter_map(normalize_amenity).collect()
}

fn normalize_amenity(token: &str) -> Option<String> {
    let stripped = token
        .trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '\'' | '"'))
        .trim();
    if stripped.is_empty() {
        return None;
    }
    Some(
        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase(),
    )
}

/// Discount from `base` to `final_price` as `(value, percent)`.
///
/// The value is floored at zero (a final price above base is not a negative
/// discount) and the percent is clamped to `[0, 100]`; a non-positive base
/// yields 0 %.
pub fn compute_discount(base: f64, final_price: f64) -> (f64, f64) {
    let value = (base - final_price).max(0.0);
    let pct = if base > 0.0 {
        (value / base * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    (value, pct)
}

/// Render a scalar JSON value as text. Lists, objects and nulls yield `None`.
fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn field_text(field: &Option<Value>) -> Option<Cow<'_, str>> {
    field.as_ref().and_then(value_text)
}

/// Numeric cells are taken as-is; text cells go through `parse`.
fn field_number(field: &Option<Value>, parse: impl Fn(&str) -> Option<f64>) -> Option<f64> {
    match field.as_ref()? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse(s.as_str()),
        _ => None,
    }
}

fn field_count(field: &Option<Value>) -> Option<u64> {
    match field.as_ref()? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.trunc() as u64)
        }),
        Value::String(s) => parse_count(s),
        _ => None,
    }
}

fn non_blank(text: Cow<'_, str>) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Applies the field parsers to whole records using the `[normalize]` config.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Convert one raw record, or report the first required field that failed.
    pub fn normalize(&self, raw: &RawRecord) -> Result<CleanRecord, Rejection> {
        let name = field_text(&raw.name)
            .and_then(non_blank)
            .ok_or(Rejection::Name)?;
        let rating = field_number(&raw.rating, parse_rating)
            .filter(|r| (0.0..=self.config.max_rating).contains(r))
            .ok_or(Rejection::Rating)?;
        let base_price = field_number(&raw.base_price, parse_currency)
            .filter(|p| *p >= 0.0)
            .ok_or(Rejection::BasePrice)?;
        let final_price = field_number(&raw.final_price, parse_currency)
            .filter(|p| *p >= 0.0)
            .ok_or(Rejection::FinalPrice)?;
        let city = field_text(&raw.address)
            .and_then(|t| extract_city(&t, self.config.min_city_len))
            .ok_or(Rejection::City)?;

        let (discount_value, discount_pct) = compute_discount(base_price, final_price);

        Ok(CleanRecord {
            name,
            rating,
            rated_by: field_count(&raw.rated_by),
            base_price,
            final_price,
            discount_value,
            discount_pct,
            room_size_sqft: field_number(&raw.room_size, parse_room_size).filter(|s| *s > 0.0),
            city,
            amenities: raw
                .amenities
                .as_ref()
                .map(|v| parse_amenities(v, &self.config.amenity_delimiters))
                .unwrap_or_default(),
            category: field_text(&raw.category)
                .and_then(non_blank)
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        })
    }

    /// Normalise every record, keeping clean ones in input order.
    pub fn normalize_all(&self, raws: &[RawRecord]) -> Dataset {
        let mut report = NormalizeReport {
            total: raws.len(),
            ..NormalizeReport::default()
        };
        let mut records = Vec::with_capacity(raws.len());

        for (index, raw) in raws.iter().enumerate() {
            match self.normalize(raw) {
                Ok(clean) => records.push(clean),
                Err(rejection) => {
                    tracing::debug!(index, field = %rejection, "record excluded");
                    *report.rejected.entry(rejection).or_insert(0) += 1;
                }
            }
        }

        report.kept = records.len();
        tracing::info!(
            total = report.total,
            kept = report.kept,
            excluded = report.total - report.kept,
            "normalization finished"
        );
        Dataset::new(records, report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
