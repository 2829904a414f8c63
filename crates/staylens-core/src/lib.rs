//! staylens-core: hotel listing normalizer and analysis library.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! record types used across all of them.
//!
//! # Architecture
//!
//! ```text
//! dataset::load ──► Normalizer ──► Dataset ──► Filter ──► stats::Report
//! ```
//!
//! Everything runs synchronously on the caller's thread. The [`Dataset`] is
//! built once and handed by reference to whatever renders it.

pub mod config;
pub mod dataset;
pub mod filter;
pub mod normalizer;
pub mod stats;
pub mod types;

pub use dataset::{Dataset, DatasetError, NormalizeReport};
pub use filter::{Filter, RatingRange};
pub use normalizer::Normalizer;
pub use stats::Report;
pub use types::{CleanRecord, RawRecord, Rejection};
