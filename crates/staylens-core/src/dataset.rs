//! Dataset: loads raw listings from disk and holds the clean result.
//!
//! Three on-disk layouts are accepted, tried in order:
//!
//! 1. a JSON array of objects,
//! 2. a column-oriented object (`{"NAME": {"0": .., "1": ..}, ..}`), which is
//!    what pandas writes by default,
//! 3. JSON Lines, one object per line.
//!
//! A [`Dataset`] is built once per process and never mutated afterwards;
//! filters and aggregations borrow from it.

use crate::config::NormalizeConfig;
use crate::normalizer::Normalizer;
use crate::types::{CleanRecord, RawRecord, Rejection};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fatal errors raised while reading the source file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset {} must be a JSON array, a column-oriented object or JSON lines", path.display())]
    UnsupportedLayout { path: PathBuf },
}

enum LayoutError {
    Json(serde_json::Error),
    Unsupported,
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::Json(e)
    }
}

/// Read every raw record from `path`.
pub fn load(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(&text, path)?;
    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Parse raw records from already-read text. `path` is only used in errors.
pub fn parse(text: &str, path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    parse_layout(text).map_err(|e| match e {
        LayoutError::Json(source) => DatasetError::Json {
            path: path.to_path_buf(),
            source,
        },
        LayoutError::Unsupported => DatasetError::UnsupportedLayout {
            path: path.to_path_buf(),
        },
    })
}

fn parse_layout(text: &str) -> Result<Vec<RawRecord>, LayoutError> {
    let document = match serde_json::from_str::<Value>(text) {
        Ok(document) => document,
        Err(whole) => {
            return match parse_lines(text) {
                Ok(records) if !records.is_empty() => Ok(records),
                _ => Err(LayoutError::Json(whole)),
            };
        }
    };

    match document {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(LayoutError::from))
            .collect(),
        Value::Object(map) if is_columnar(&map) => from_columns(map),
        Value::Object(map) => Ok(vec![serde_json::from_value(Value::Object(map))?]),
        _ => Err(LayoutError::Unsupported),
    }
}

fn parse_lines(text: &str) -> Result<Vec<RawRecord>, serde_json::Error> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str)
        .collect()
}

fn is_columnar(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.values().all(Value::is_object)
}

/// Transpose `{column: {row: value}}` into row objects, ordered by row index.
/// Non-numeric row labels sort after numeric ones, lexicographically.
fn from_columns(columns: Map<String, Value>) -> Result<Vec<RawRecord>, LayoutError> {
    let mut rows: BTreeMap<(u64, String), Map<String, Value>> = BTreeMap::new();

    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(LayoutError::Unsupported);
        };
        for (row, value) in cells {
            let key = (row.parse::<u64>().unwrap_or(u64::MAX), row);
            rows.entry(key).or_default().insert(column.clone(), value);
        }
    }

    rows.into_values()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(LayoutError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Outcome counts of one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub total: usize,
    pub kept: usize,
    /// Excluded records keyed by the first field that failed to parse.
    pub rejected: BTreeMap<Rejection, usize>,
}

impl NormalizeReport {
    pub fn excluded(&self) -> usize {
        self.total - self.kept
    }
}

/// The process-wide, read-only collection of clean records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CleanRecord>,
    report: NormalizeReport,
}

impl Dataset {
    pub fn new(records: Vec<CleanRecord>, report: NormalizeReport) -> Self {
        Self { records, report }
    }

    /// Load `path` and normalise it. Fails only when the file itself is
    /// unreadable or malformed; bad records are just excluded.
    pub fn load(path: &Path, config: &NormalizeConfig) -> Result<Self, DatasetError> {
        let raws = load(path)?;
        Ok(Normalizer::new(config.clone()).normalize_all(&raws))
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
