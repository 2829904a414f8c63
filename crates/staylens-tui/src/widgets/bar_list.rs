//! Horizontal bar list: ranked labels with proportional bars.
//!
//! Used for top hotels, top cities, categories and amenity frequency. Each row
//! is `label │ ████████ value`; bar length is relative to the largest value.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct BarRow {
    pub label: String,
    pub value: f64,
    /// Pre-formatted value shown after the bar.
    pub display: String,
}

pub struct BarList<'a> {
    title: &'a str,
    rows: Vec<BarRow>,
    theme: &'a Theme,
}

impl<'a> BarList<'a> {
    pub fn new(title: &'a str, rows: Vec<BarRow>, theme: &'a Theme) -> Self {
        Self { title, rows, theme }
    }
}

/// Number of bar cells for `value` when `max` fills `width` cells.
pub fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().clamp(1.0, width as f64) as usize
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return format!("{label:<width$}");
    }
    let mut out: String = label.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Widget for BarList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(self.theme.border_panel);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "no data for current filters",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let label_w = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(width / 3);
        let value_w = self.rows.iter().map(|r| r.display.chars().count()).max().unwrap_or(0);
        let bar_w = width.saturating_sub(label_w + value_w + 4);
        let max = self.rows.iter().map(|r| r.value).fold(0.0, f64::max);

        let lines: Vec<Line> = self
            .rows
            .iter()
            .take(inner.height as usize)
            .map(|row| {
                let style = self.theme.label_style(&row.label);
                Line::from(vec![
                    Span::styled(truncate(&row.label, label_w), style),
                    Span::styled(" │ ", Style::default().add_modifier(Modifier::DIM)),
                    Span::styled("█".repeat(bar_len(row.value, max, bar_w)), style),
                    Span::raw(format!(" {}", row.display)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
