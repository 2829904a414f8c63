//! Filters: the city / rating / amenity selections offered by the dashboard.
//!
//! Filtering is a stateless recomputation over the immutable dataset: every
//! call to [`Filter::apply`] starts from the full record slice.

use crate::types::CleanRecord;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("rating bounds must be finite numbers")]
    NonFinite,
    #[error("minimum rating {min} is above maximum {max}")]
    Inverted { min: f64, max: f64 },
}

/// Inclusive rating window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    min: f64,
    max: f64,
}

impl RatingRange {
    pub fn new(min: f64, max: f64) -> Result<Self, FilterError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FilterError::NonFinite);
        }
        if min > max {
            return Err(FilterError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.min && rating <= self.max
    }
}

/// Active dashboard filters. The default filter keeps every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Empty means "all cities".
    pub cities: BTreeSet<String>,
    pub rating: Option<RatingRange>,
    /// A record must offer every amenity listed here.
    pub amenities: BTreeSet<String>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.rating.is_none() && self.amenities.is_empty()
    }

    /// Restrict to the given cities, matched exactly as extracted.
    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, range: RatingRange) -> Self {
        self.rating = Some(range);
        self
    }

    /// Require the given amenities. Names are case-folded to match the
    /// normalised amenity sets.
    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.amenities = amenities
            .into_iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    pub fn matches(&self, record: &CleanRecord) -> bool {
        (self.cities.is_empty() || self.cities.contains(&record.city))
            && self.rating.is_none_or(|r| r.contains(record.rating))
            && self.amenities.is_subset(&record.amenities)
    }

    /// Records passing every active filter, in dataset order.
    pub fn apply<'a>(&self, records: &'a [CleanRecord]) -> Vec<&'a CleanRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct cities, sorted, for the city filter's option list.
pub fn cities(records: &[CleanRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct amenities across all records, sorted.
pub fn amenities(records: &[CleanRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.amenities.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowest and highest rating present, or `None` for an empty slice.
pub fn rating_bounds(records: &[CleanRecord]) -> Option<RatingRange> {
    let mut iter = records.iter().map(|r| r.rating);
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));
    RatingRange::new(min, max).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
