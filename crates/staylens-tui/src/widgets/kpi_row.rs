//! KPI row: four headline figures across the top of the overview page.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use staylens_core::stats::Kpis;

pub struct KpiRow<'a> {
    kpis: &'a Kpis,
    theme: &'a Theme,
}

impl<'a> KpiRow<'a> {
    pub fn new(kpis: &'a Kpis, theme: &'a Theme) -> Self {
        Self { kpis, theme }
    }
}

/// `(label, value)` pairs in display order. Missing figures render as `—`.
pub fn kpi_cells(kpis: &Kpis) -> [(&'static str, String); 4] {
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "—".to_string());
    [
        ("Hotels", kpis.hotels.to_string()),
        ("Avg rating", or_dash(kpis.avg_rating.map(|r| format!("{r:.2}")))),
        ("Avg final price", or_dash(kpis.avg_final_price.map(|p| format!("₹{p:.0}")))),
        ("Median discount", or_dash(kpis.median_discount_pct.map(|d| format!("{d:.1}%")))),
    ]
}

impl Widget for KpiRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((label, value), col) in kpi_cells(self.kpis).into_iter().zip(cols.iter()) {
            let block = Block::bordered().border_style(self.theme.border_panel);
            Paragraph::new(vec![
                Line::from(Span::styled(label, self.theme.kpi_label)),
                Line::from(Span::styled(value, self.theme.kpi_value)),
            ])
            .block(block)
            .centered()
            .render(*col, buf);
        }
    }
}
