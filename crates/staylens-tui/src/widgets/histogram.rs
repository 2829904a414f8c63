//! Vertical histogram: equal-width bins drawn as block columns.
//!
//! The x-axis shows the lower bound of the first bin and the upper bound of
//! the last; the tallest column is labelled with its count.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Widget},
};
use staylens_core::stats::Bin;

const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

pub struct Histogram<'a> {
    title: &'a str,
    bins: &'a [Bin],
    style: Style,
    theme: &'a Theme,
}

impl<'a> Histogram<'a> {
    pub fn new(title: &'a str, bins: &'a [Bin], style: Style, theme: &'a Theme) -> Self {
        Self { title, bins, style, theme }
    }
}

/// Column height in eighths of a cell for `count` when `max` fills `rows` cells.
pub fn column_eighths(count: usize, max: usize, rows: u16) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    let full = rows as usize * 8;
    ((count * full + max - 1) / max).max(1)
}

impl Widget for Histogram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(self.theme.border_panel);
        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().add_modifier(Modifier::DIM);
        if self.bins.is_empty() || inner.height < 2 || inner.width == 0 {
            buf.set_string(inner.x, inner.y, "no data for current filters", dim);
            return;
        }

        // Last row is the axis
        let plot_rows = inner.height - 1;
        let max = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        let col_w = (inner.width / self.bins.len() as u16).max(1);

        for (i, bin) in self.bins.iter().enumerate() {
            let x = inner.x + i as u16 * col_w;
            if x >= inner.right() {
                break;
            }
            let w = col_w.min(inner.right() - x);
            let mut remaining = column_eighths(bin.count, max, plot_rows);
            for row in 0..plot_rows {
                let y = inner.y + plot_rows - 1 - row;
                let cell = remaining.min(8);
                remaining -= cell;
                if cell > 0 {
                    let glyph = EIGHTHS[cell].repeat(w.saturating_sub(1).max(1) as usize);
                    buf.set_string(x, y, glyph, self.style);
                }
            }
            if bin.count == max && max > 0 {
                buf.set_string(x, inner.y, max.to_string(), self.style.add_modifier(Modifier::BOLD));
            }
        }

        let axis_y = inner.bottom() - 1;
        let lo = format!("{:.1}", self.bins[0].lo);
        let hi = format!("{:.1}", self.bins[self.bins.len() - 1].hi);
        buf.set_string(inner.x, axis_y, &lo, dim);
        let hi_x = inner.right().saturating_sub(hi.len() as u16);
        buf.set_string(hi_x, axis_y, &hi, dim);
    }
}
