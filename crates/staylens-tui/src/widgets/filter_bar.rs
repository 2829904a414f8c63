//! Filter bar: the 3-line strip at the bottom summarising active filters.
//!
//! Shows the city, rating and amenity selections, how many hotels survive
//! them out of the full dataset, and the last command status message.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use staylens_core::Filter;

pub struct FilterBar<'a> {
    filter: &'a Filter,
    visible: usize,
    total: usize,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(
        filter: &'a Filter,
        visible: usize,
        total: usize,
        status: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self { filter, visible, total, status, theme }
    }
}

/// One-line text description of a filter, `"all hotels"` when none is set.
pub fn describe(filter: &Filter) -> String {
    if filter.is_empty() {
        return "all hotels".to_string();
    }
    let mut parts = Vec::new();
    if !filter.cities.is_empty() {
        let cities: Vec<&str> = filter.cities.iter().map(String::as_str).collect();
        parts.push(format!("city: {}", cities.join(", ")));
    }
    if let Some(range) = filter.rating {
        parts.push(format!("rating: {:.1}–{:.1}", range.min(), range.max()));
    }
    if !filter.amenities.is_empty() {
        let amenities: Vec<&str> = filter.amenities.iter().map(String::as_str).collect();
        parts.push(format!("amenities: {}", amenities.join(" + ")));
    }
    parts.join("  │  ")
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.filter.is_empty() {
            self.theme.filter_inactive
        } else {
            self.theme.filter_active
        };

        let block = Block::bordered()
            .title(" Filters ")
            .title_bottom(Line::from(format!(" {} / {} hotels ", self.visible, self.total)).right_aligned())
            .border_style(self.theme.border_panel);

        let mut spans = vec![Span::styled(describe(self.filter), style)];
        if let Some(status) = self.status {
            spans.push(Span::styled(
                format!("   {status}"),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
