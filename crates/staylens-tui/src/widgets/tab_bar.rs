//! Page bar widget: the strip of dashboard pages at the top of the screen.

use crate::app::Page;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line page strip. Keybinding hints are right-aligned in the
/// same row.
pub struct TabBar<'a> {
    active: Page,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: Page, theme: &'a Theme) -> Self {
        Self { active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| Line::from(format!(" {}:{} ", i + 1, page.title())))
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(self.theme.kpi_value.add_modifier(Modifier::REVERSED))
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ::command  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
