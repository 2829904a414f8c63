//! Configuration types for staylens.
//!
//! [`Config::load`] reads `~/.config/staylens/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
path = "OYO.json"

[normalize]
min_city_len       = 3
max_rating         = 5.0
amenity_delimiters = [",", "|", "•", ";"]

[ui]
rating_bins   = 20
discount_bins = 25
top_hotels    = 10
top_cities    = 10
top_amenities = 15
rating_step   = 0.5
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/staylens/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Dataset used when no path is given on the command line.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("OYO.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

/// `[normalize]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    /// Shortest address segment accepted as a city name.
    #[serde(default = "default_min_city_len")]
    pub min_city_len: usize,
    /// Ratings above this value are treated as unparseable.
    #[serde(default = "default_max_rating")]
    pub max_rating: f64,
    /// Separators used to split amenity text into tokens.
    #[serde(default = "default_amenity_delimiters")]
    pub amenity_delimiters: Vec<String>,
}

fn default_min_city_len() -> usize { 3 }
fn default_max_rating() -> f64 { 5.0 }
fn default_amenity_delimiters() -> Vec<String> {
    [",", "|", "•", ";"].iter().map(|s| s.to_string()).collect()
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            min_city_len: default_min_city_len(),
            max_rating: default_max_rating(),
            amenity_delimiters: default_amenity_delimiters(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_rating_bins")]
    pub rating_bins: usize,
    #[serde(default = "default_discount_bins")]
    pub discount_bins: usize,
    #[serde(default = "default_top_hotels")]
    pub top_hotels: usize,
    #[serde(default = "default_top_cities")]
    pub top_cities: usize,
    #[serde(default = "default_top_amenities")]
    pub top_amenities: usize,
    /// Amount `[` / `]` move the minimum-rating filter.
    #[serde(default = "default_rating_step")]
    pub rating_step: f64,
}

fn default_rating_bins() -> usize { 20 }
fn default_discount_bins() -> usize { 25 }
fn default_top_hotels() -> usize { 10 }
fn default_top_cities() -> usize { 10 }
fn default_top_amenities() -> usize { 15 }
fn default_rating_step() -> f64 { 0.5 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            rating_bins: default_rating_bins(),
            discount_bins: default_discount_bins(),
            top_hotels: default_top_hotels(),
            top_cities: default_top_cities(),
            top_amenities: default_top_amenities(),
            rating_step: default_rating_step(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/staylens/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::from_sources(Some(path))
    }

    /// Layer an optional TOML file over the built-in defaults.
    pub fn from_sources(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("staylens")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.data.path, PathBuf::from("OYO.json"));
        assert_eq!(cfg.normalize.min_city_len, 3);
        assert_eq!(cfg.normalize.amenity_delimiters, vec![",", "|", "•", ";"]);
        assert_eq!(cfg.ui.rating_bins, 20);
        assert_eq!(cfg.ui.top_amenities, 15);
    }

    #[test]
    fn file_overrides_layer_on_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ntop_cities = 3\n").unwrap();

        let cfg = Config::from_sources(Some(path)).unwrap();
        assert_eq!(cfg.ui.top_cities, 3);
        assert_eq!(cfg.ui.top_hotels, 10);
        assert_eq!(cfg.normalize.max_rating, 5.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::from_sources(Some(PathBuf::from("/nonexistent/staylens.toml"))).unwrap();
        assert_eq!(cfg.ui.discount_bins, 25);
    }
}
