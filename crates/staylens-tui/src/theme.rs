//! Colour theme for the staylens dashboard.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk.
//!
//! # Colour assignment for labels
//!
//! Bar-chart labels (cities, categories, amenities) are hashed to a stable
//! index into the palette so the same city always gets the same colour,
//! whichever page or filter state it appears under.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawKpi {
    label: RawStyle,
    value: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    panel: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawHistogram {
    rating: RawStyle,
    discount: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawHeatmap {
    positive: RawStyle,
    negative: RawStyle,
    neutral: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawFilters {
    active: RawStyle,
    inactive: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBars {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    kpi: RawKpi,
    borders: RawBorders,
    histogram: RawHistogram,
    heatmap: RawHeatmap,
    filters: RawFilters,
    bars: RawBars,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Dashboard colour theme. All styles are pre-resolved ratatui [`Style`]s.
#[derive(Debug, Clone)]
pub struct Theme {
    pub kpi_label: Style,
    pub kpi_value: Style,

    pub border_panel: Style,
    pub border_command_bar: Style,

    pub histogram_rating: Style,
    pub histogram_discount: Style,

    pub heat_positive: Style,
    pub heat_negative: Style,
    pub heat_neutral: Style,

    /// Filter bar text when at least one filter is set.
    pub filter_active: Style,
    pub filter_inactive: Style,

    bar_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by the name typed after `:theme`, or `None` if no
    /// built-in theme has that name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            kpi_label: raw.kpi.label.into_style(),
            kpi_value: raw.kpi.value.into_style(),
            border_panel: raw.borders.panel.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            histogram_rating: raw.histogram.rating.into_style(),
            histogram_discount: raw.histogram.discount.into_style(),
            heat_positive: raw.heatmap.positive.into_style(),
            heat_negative: raw.heatmap.negative.into_style(),
            heat_neutral: raw.heatmap.neutral.into_style(),
            filter_active: raw.filters.active.into_style(),
            filter_inactive: raw.filters.inactive.into_style(),
            bar_palette: raw
                .bars
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Stable colour for a bar label (city, category, amenity, hotel).
    pub fn label_style(&self, label: &str) -> Style {
        if self.bar_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(label) % self.bar_palette.len();
        Style::default().fg(self.bar_palette[idx])
    }

    /// Heatmap style for a correlation coefficient.
    pub fn heat_style(&self, value: Option<f64>) -> Style {
        match value {
            Some(v) if v >= 0.5 => self.heat_positive.add_modifier(Modifier::BOLD),
            Some(v) if v >= 0.1 => self.heat_positive,
            Some(v) if v <= -0.5 => self.heat_negative.add_modifier(Modifier::BOLD),
            Some(v) if v <= -0.1 => self.heat_negative,
            _ => self.heat_neutral,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, …), hex `#rrggbb`, and
/// 256-colour `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.kpi_value, Style::default());
        assert_ne!(theme.histogram_rating, Style::default());
        assert_ne!(theme.heat_positive, Style::default());
        assert!(!theme.bar_palette.is_empty());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.kpi_value, Style::default());
        assert_ne!(theme.heat_negative, Style::default());
        assert!(!theme.bar_palette.is_empty());
    }

    #[test]
    fn themes_resolve_by_name() {
        assert!(Theme::by_name("default").is_some());
        assert!(Theme::by_name("Gruvbox-Dark").is_some());
        assert!(Theme::by_name("solarized").is_none());
        assert!(Theme::by_name("").is_none());
    }

    #[test]
    fn label_style_is_stable() {
        let theme = Theme::load_default();
        assert_eq!(theme.label_style("Bangalore"), theme.label_style("Bangalore"));
    }

    #[test]
    fn heat_style_buckets() {
        let theme = Theme::load_default();
        assert_eq!(theme.heat_style(None), theme.heat_neutral);
        assert_eq!(theme.heat_style(Some(0.0)), theme.heat_neutral);
        assert_eq!(theme.heat_style(Some(0.3)), theme.heat_positive);
        assert_eq!(theme.heat_style(Some(-0.3)), theme.heat_negative);
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
