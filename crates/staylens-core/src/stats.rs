//! Aggregations over a (possibly filtered) slice of clean records.
//!
//! Everything here is a pure function of its input; [`Report::build`] bundles
//! the full set rendered by the dashboard and printed by headless mode.

use crate::config::UiConfig;
use crate::types::CleanRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Headline figures shown across the top of the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub hotels: usize,
    pub avg_rating: Option<f64>,
    pub avg_final_price: Option<f64>,
    pub median_discount_pct: Option<f64>,
}

/// One equal-width histogram bucket. `hi` is exclusive except for the last bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub base: Option<FiveNumber>,
    #[serde(rename = "final")]
    pub final_price: Option<FiveNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedHotel {
    pub name: String,
    /// Mean rating across every listing sharing this name.
    pub rating: f64,
    pub listings: usize,
}

/// Numeric columns that take part in the correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Rating,
    RatedBy,
    BasePrice,
    FinalPrice,
    DiscountValue,
    DiscountPct,
    RoomSize,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Rating,
        Metric::RatedBy,
        Metric::BasePrice,
        Metric::FinalPrice,
        Metric::DiscountValue,
        Metric::DiscountPct,
        Metric::RoomSize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Rating => "rating",
            Metric::RatedBy => "rated_by",
            Metric::BasePrice => "base_price",
            Metric::FinalPrice => "final_price",
            Metric::DiscountValue => "discount_value",
            Metric::DiscountPct => "discount_pct",
            Metric::RoomSize => "room_size_sqft",
        }
    }

    pub fn value(self, record: &CleanRecord) -> Option<f64> {
        match self {
            Metric::Rating => Some(record.rating),
            Metric::RatedBy => record.rated_by.map(|n| n as f64),
            Metric::BasePrice => Some(record.base_price),
            Metric::FinalPrice => Some(record.final_price),
            Metric::DiscountValue => Some(record.discount_value),
            Metric::DiscountPct => Some(record.discount_pct),
            Metric::RoomSize => record.room_size_sqft,
        }
    }
}

/// Square Pearson matrix over [`Metric::ALL`]. `None` marks an undefined cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: Metric, col: Metric) -> Option<f64> {
        let i = Metric::ALL.iter().position(|m| *m == row)?;
        let j = Metric::ALL.iter().position(|m| *m == col)?;
        self.cells[i][j]
    }
}

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub kpis: Kpis,
    pub rating_histogram: Vec<Bin>,
    pub prices: PriceSummary,
    pub discount_histogram: Vec<Bin>,
    pub top_hotels: Vec<RatedHotel>,
    pub top_cities: Vec<CountRow>,
    pub categories: Vec<CountRow>,
    pub amenities: Vec<CountRow>,
    pub correlation: CorrelationMatrix,
}

impl Report {
    pub fn build(records: &[&CleanRecord], ui: &UiConfig) -> Self {
        let ratings: Vec<f64> = records.iter().map(|r| r.rating).collect();
        let discounts: Vec<f64> = records.iter().map(|r| r.discount_pct).collect();
        let base: Vec<f64> = records.iter().map(|r| r.base_price).collect();
        let finals: Vec<f64> = records.iter().map(|r| r.final_price).collect();

        Self {
            generated_at: Utc::now(),
            kpis: kpis(records),
            rating_histogram: histogram(&ratings, ui.rating_bins),
            prices: PriceSummary {
                base: five_number(&base),
                final_price: five_number(&finals),
            },
            discount_histogram: histogram(&discounts, ui.discount_bins),
            top_hotels: top_hotels_by_rating(records, ui.top_hotels),
            top_cities: top_cities(records, ui.top_cities),
            categories: category_counts(records),
            amenities: amenity_frequency(records, ui.top_amenities),
            correlation: correlation_matrix(records),
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linearly interpolated quantile, `q` in `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(FiveNumber {
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn kpis(records: &[&CleanRecord]) -> Kpis {
    let ratings: Vec<f64> = records.iter().map(|r| r.rating).collect();
    let finals: Vec<f64> = records.iter().map(|r| r.final_price).collect();
    let discounts: Vec<f64> = records.iter().map(|r| r.discount_pct).collect();
    Kpis {
        hotels: records.len(),
        avg_rating: mean(&ratings),
        avg_final_price: mean(&finals),
        median_discount_pct: median(&discounts),
    }
}

/// Equal-width histogram over `[min, max]` of the finite values.
///
/// When every value is identical a single bucket is returned.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![Bin { lo: min, hi: max, count: finite.len() }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lo: min + width * i as f64,
            hi: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Count labels, most frequent first, ties broken alphabetically.
fn count_labels<'a, I>(labels: I) -> Vec<CountRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut rows: Vec<CountRow> = counts
        .into_iter()
        .map(|(label, count)| CountRow { label: label.to_string(), count })
        .collect();
    // BTreeMap order is alphabetical, so a stable sort keeps ties alphabetical.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Mean rating per hotel name, best first, ties broken by name.
pub fn top_hotels_by_rating(records: &[&CleanRecord], n: usize) -> Vec<RatedHotel> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.name.as_str()).or_insert((0.0, 0));
        entry.0 += r.rating;
        entry.1 += 1;
    }
    let mut hotels: Vec<RatedHotel> = groups
        .into_iter()
        .map(|(name, (sum, listings))| RatedHotel {
            name: name.to_string(),
            rating: sum / listings as f64,
            listings,
        })
        .collect();
    hotels.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    hotels.truncate(n);
    hotels
}

pub fn top_cities(records: &[&CleanRecord], n: usize) -> Vec<CountRow> {
    let mut rows = count_labels(records.iter().map(|r| r.city.as_str()));
    rows.truncate(n);
    rows
}

pub fn category_counts(records: &[&CleanRecord]) -> Vec<CountRow> {
    count_labels(records.iter().map(|r| r.category.as_str()))
}

pub fn amenity_frequency(records: &[&CleanRecord], n: usize) -> Vec<CountRow> {
    let mut rows = count_labels(
        records
            .iter()
            .flat_map(|r| r.amenities.iter().map(String::as_str)),
    );
    rows.truncate(n);
    rows
}

/// Pearson correlation of two equally long series.
///
/// Returns `None` for fewer than two pairs or when either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mx = mean(&xs[..n])?;
    let my = mean(&ys[..n])?;
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    let r = cov / (vx * vy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Pairwise-complete correlation matrix over [`Metric::ALL`].
pub fn correlation_matrix(records: &[&CleanRecord]) -> CorrelationMatrix {
    let cells = Metric::ALL
        .iter()
        .enumerate()
        .map(|(i, &row)| {
            Metric::ALL
                .iter()
                .enumerate()
                .map(|(j, &col)| {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = records
                        .iter()
                        .filter_map(|r| Some((row.value(r)?, col.value(r)?)))
                        .unzip();
                    let r = pearson(&xs, &ys);
                    if i == j { r.map(|_| 1.0) } else { r }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        labels: Metric::ALL.iter().map(|m| m.label()).collect(),
        cells,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
