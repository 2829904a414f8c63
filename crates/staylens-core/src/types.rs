//! Core types for staylens-core.
//!
//! This module defines the two record shapes that flow through the pipeline:
//! the loosely-typed [`RawRecord`] as read from the source file, and the
//! analysis-ready [`CleanRecord`] produced by the normalizer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One hotel listing exactly as it appears in the source file.
///
/// Every field is optional and holds whatever JSON value the scraper emitted
/// (string, number, list or null). The scraped OYO export uses upper-case
/// column names with spaces, so each field also accepts that spelling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(alias = "NAME", alias = "hotel_name")]
    pub name: Option<serde_json::Value>,
    #[serde(alias = "RATING")]
    pub rating: Option<serde_json::Value>,
    /// Number of guests who rated the hotel (`"1.2k ratings"`).
    #[serde(alias = "RATED BY", alias = "RATED_BY")]
    pub rated_by: Option<serde_json::Value>,
    #[serde(alias = "BASE_COST", alias = "base_cost")]
    pub base_price: Option<serde_json::Value>,
    #[serde(alias = "FINAL_COST", alias = "final_cost")]
    pub final_price: Option<serde_json::Value>,
    #[serde(alias = "ROOM SIZE", alias = "ROOM_SIZE")]
    pub room_size: Option<serde_json::Value>,
    #[serde(alias = "ADDRESS")]
    pub address: Option<serde_json::Value>,
    #[serde(alias = "AMENITYS", alias = "AMENITIES")]
    pub amenities: Option<serde_json::Value>,
    #[serde(alias = "CATEGORY")]
    pub category: Option<serde_json::Value>,
}

/// A normalised, analysis-ready hotel listing.
///
/// All numeric fields are finite. Optional numerics (`rated_by`,
/// `room_size_sqft`) are either absent or finite; there is no NaN marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub name: String,
    /// Guest rating on a 0–5 scale.
    pub rating: f64,
    pub rated_by: Option<u64>,
    pub base_price: f64,
    pub final_price: f64,
    /// `base_price - final_price`, floored at zero.
    pub discount_value: f64,
    /// Discount as a percentage of `base_price`, clamped to `[0, 100]`.
    pub discount_pct: f64,
    pub room_size_sqft: Option<f64>,
    pub city: String,
    /// Trimmed, lower-cased, deduplicated amenity names.
    pub amenities: BTreeSet<String>,
    pub category: String,
}

/// Category assigned to listings whose category is missing or blank.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// The field that caused a raw record to be excluded from the clean dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    Name,
    Rating,
    BasePrice,
    FinalPrice,
    City,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Name => write!(f, "name"),
            Rejection::Rating => write!(f, "rating"),
            Rejection::BasePrice => write!(f, "base_price"),
            Rejection::FinalPrice => write!(f, "final_price"),
            Rejection::City => write!(f, "city"),
        }
    }
}
