//! Test builders for `RawRecord` and `CleanRecord`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They start from a listing that normalizes cleanly so each
//! test only spells out the field it cares about.

use serde_json::Value;
use staylens_core::{normalizer::compute_discount, CleanRecord, RawRecord};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures.
///
/// ```rust
/// let raw = RawRecordBuilder::new("Hotel Sunshine")
///     .rating("NEW")
///     .address("Koramangala, Bangalore")
///     .build();
/// ```
pub struct RawRecordBuilder {
    record: RawRecord,
}

impl RawRecordBuilder {
    pub fn new(name: impl Into<Value>) -> Self {
        Self {
            record: RawRecord {
                name: Some(name.into()),
                rating: Some("4.0".into()),
                base_price: Some("₹1,000".into()),
                final_price: Some("₹800".into()),
                address: Some("MG Road, Bangalore".into()),
                ..RawRecord::default()
            },
        }
    }

    pub fn rating(mut self, value: impl Into<Value>) -> Self {
        self.record.rating = Some(value.into());
        self
    }

    pub fn rated_by(mut self, value: impl Into<Value>) -> Self {
        self.record.rated_by = Some(value.into());
        self
    }

    pub fn base(mut self, value: impl Into<Value>) -> Self {
        self.record.base_price = Some(value.into());
        self
    }

    pub fn final_price(mut self, value: impl Into<Value>) -> Self {
        self.record.final_price = Some(value.into());
        self
    }

    pub fn room_size(mut self, value: impl Into<Value>) -> Self {
        self.record.room_size = Some(value.into());
        self
    }

    pub fn address(mut self, value: impl Into<Value>) -> Self {
        self.record.address = Some(value.into());
        self
    }

    pub fn amenities(mut self, value: impl Into<Value>) -> Self {
        self.record.amenities = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<Value>) -> Self {
        self.record.category = Some(value.into());
        self
    }

    pub fn without_rating(mut self) -> Self {
        self.record.rating = None;
        self
    }

    pub fn without_address(mut self) -> Self {
        self.record.address = None;
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// CleanRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`CleanRecord`] fixtures used by filter and stats
/// harnesses. Discount fields are derived from the prices the same way the
/// normalizer derives them.
pub struct CleanRecordBuilder {
    name: String,
    rating: f64,
    rated_by: Option<u64>,
    base_price: f64,
    final_price: f64,
    room_size_sqft: Option<f64>,
    city: String,
    amenities: BTreeSet<String>,
    category: String,
}

impl CleanRecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: 4.0,
            rated_by: None,
            base_price: 1000.0,
            final_price: 800.0,
            room_size_sqft: None,
            city: "Bangalore".to_string(),
            amenities: BTreeSet::new(),
            category: "Townhouse".to_string(),
        }
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn rated_by(mut self, count: u64) -> Self {
        self.rated_by = Some(count);
        self
    }

    pub fn prices(mut self, base: f64, final_price: f64) -> Self {
        self.base_price = base;
        self.final_price = final_price;
        self
    }

    pub fn room_size(mut self, sqft: f64) -> Self {
        self.room_size_sqft = Some(sqft);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn amenities(mut self, amenities: &[&str]) -> Self {
        self.amenities = amenities.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn build(self) -> CleanRecord {
        let (discount_value, discount_pct) = compute_discount(self.base_price, self.final_price);
        CleanRecord {
            name: self.name,
            rating: self.rating,
            rated_by: self.rated_by,
            base_price: self.base_price,
            final_price: self.final_price,
            discount_value,
            discount_pct,
            room_size_sqft: self.room_size_sqft,
            city: self.city,
            amenities: self.amenities,
            category: self.category,
        }
    }
}

/// Rebuild a raw record from a clean one, spelling every value as text.
pub fn raw_from_clean(clean: &CleanRecord) -> RawRecord {
    RawRecord {
        name: Some(clean.name.clone().into()),
        rating: Some(clean.rating.to_string().into()),
        rated_by: clean.rated_by.map(|n| n.to_string().into()),
        base_price: Some(clean.base_price.to_string().into()),
        final_price: Some(clean.final_price.to_string().into()),
        room_size: clean.room_size_sqft.map(|s| s.to_string().into()),
        address: Some(clean.city.clone().into()),
        amenities: Some(
            clean
                .amenities
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
                .into(),
        ),
        category: Some(clean.category.clone().into()),
    }
}

/// Rebuild a raw record from a clean one, keeping numerics as JSON numbers.
pub fn raw_from_clean_numeric(clean: &CleanRecord) -> RawRecord {
    RawRecord {
        rating: Some(Value::from(clean.rating)),
        rated_by: clean.rated_by.map(Value::from),
        base_price: Some(Value::from(clean.base_price)),
        final_price: Some(Value::from(clean.final_price)),
        room_size: clean.room_size_sqft.map(Value::from),
        ..raw_from_clean(clean)
    }
}
