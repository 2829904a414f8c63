//! Price summary: five-number summaries of base and final price side by side.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Cell, Row, Table, Widget},
};
use staylens_core::stats::{FiveNumber, PriceSummary};

pub struct PriceTable<'a> {
    prices: &'a PriceSummary,
    theme: &'a Theme,
}

impl<'a> PriceTable<'a> {
    pub fn new(prices: &'a PriceSummary, theme: &'a Theme) -> Self {
        Self { prices, theme }
    }
}

fn pick(summary: Option<&FiveNumber>, f: fn(&FiveNumber) -> f64) -> String {
    summary.map(|s| format!("₹{:.0}", f(s))).unwrap_or_else(|| "—".to_string())
}

impl Widget for PriceTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats: [(&str, fn(&FiveNumber) -> f64); 5] = [
            ("min", |s| s.min),
            ("q1", |s| s.q1),
            ("median", |s| s.median),
            ("q3", |s| s.q3),
            ("max", |s| s.max),
        ];

        let rows: Vec<Row> = stats
            .iter()
            .map(|(label, f)| {
                Row::new(vec![
                    Cell::from(*label).style(self.theme.kpi_label),
                    Cell::from(pick(self.prices.base.as_ref(), *f)),
                    Cell::from(pick(self.prices.final_price.as_ref(), *f)),
                ])
            })
            .collect();

        let header = Row::new(vec!["", "base", "final"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        Table::new(
            rows,
            [Constraint::Length(8), Constraint::Fill(1), Constraint::Fill(1)],
        )
        .header(header)
        .block(
            Block::bordered()
                .title(" Price distribution (base vs final) ")
                .border_style(self.theme.border_panel),
        )
        .render(area, buf);
    }
}
