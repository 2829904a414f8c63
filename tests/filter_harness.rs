//! Filter harness.
//!
//! # What this covers
//!
//! - **Composition**: city, rating and amenity filters combine with AND, and
//!   each empty selection means "no restriction".
//! - **Statelessness**: applying a filter never depends on a previous one.
//! - **Option lists**: the city and amenity pickers and the rating slider
//!   bounds derive from the loaded dataset.
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use staylens_core::{
    filter::{self, FilterError},
    CleanRecord, Filter, RatingRange,
};

#[fixture]
fn listings() -> Vec<CleanRecord> {
    vec![
        CleanRecordBuilder::new("Hotel Sunshine")
            .city("Bangalore")
            .rating(4.4)
            .amenities(&["wifi", "ac", "tv"])
            .build(),
        CleanRecordBuilder::new("Lake View")
            .city("Kolkata")
            .rating(3.9)
            .amenities(&["wifi", "geyser"])
            .build(),
        CleanRecordBuilder::new("Palm Residency")
            .city("Chennai")
            .rating(4.8)
            .amenities(&["wifi", "power backup"])
            .build(),
        CleanRecordBuilder::new("Townhouse 212")
            .city("Bangalore")
            .rating(3.5)
            .build(),
    ]
}

fn range(min: f64, max: f64) -> RatingRange {
    RatingRange::new(min, max).unwrap()
}

#[rstest]
#[case::none(Filter::default(), 4)]
#[case::one_city(Filter::default().with_cities(["Bangalore"]), 2)]
#[case::two_cities(Filter::default().with_cities(["Kolkata", "Chennai"]), 2)]
#[case::rating_floor(Filter::default().with_rating(range(4.0, 5.0)), 2)]
#[case::inclusive_bounds(Filter::default().with_rating(range(3.5, 3.9)), 2)]
#[case::amenity(Filter::default().with_amenities(["WiFi"]), 3)]
#[case::all_amenities(Filter::default().with_amenities(["wifi", "ac"]), 1)]
#[case::combined(
    Filter::default().with_cities(["Bangalore"]).with_rating(range(4.0, 5.0)).with_amenities(["tv"]),
    1
)]
#[case::nothing_matches(Filter::default().with_cities(["Pune"]), 0)]
fn filters_compose(listings: Vec<CleanRecord>, #[case] filter: Filter, #[case] expected: usize) {
    assert_eq!(filter.apply(&listings).len(), expected);
}

#[rstest]
fn apply_is_stateless(listings: Vec<CleanRecord>) {
    let narrow = Filter::default().with_cities(["Chennai"]);
    assert_names!(narrow.apply(&listings), ["Palm Residency"]);

    let wide = Filter::default().with_rating(range(0.0, 5.0));
    assert_eq!(wide.apply(&listings).len(), listings.len());
}

#[rstest]
fn apply_preserves_dataset_order(listings: Vec<CleanRecord>) {
    let f = Filter::default().with_amenities(["wifi"]);
    assert_names!(f.apply(&listings), ["Hotel Sunshine", "Lake View", "Palm Residency"]);
}

#[rstest]
fn option_lists_come_from_records(listings: Vec<CleanRecord>) {
    assert_eq!(filter::cities(&listings), vec!["Bangalore", "Chennai", "Kolkata"]);
    assert_eq!(
        filter::amenities(&listings),
        vec!["ac", "geyser", "power backup", "tv", "wifi"]
    );
    let bounds = filter::rating_bounds(&listings).unwrap();
    assert_eq!((bounds.min(), bounds.max()), (3.5, 4.8));
    assert_eq!(filter::rating_bounds(&[]), None);
}

#[test]
fn invalid_rating_ranges_are_rejected() {
    assert_eq!(
        RatingRange::new(4.0, 3.0),
        Err(FilterError::Inverted { min: 4.0, max: 3.0 })
    );
    assert_eq!(RatingRange::new(f64::NAN, 3.0), Err(FilterError::NonFinite));
}
