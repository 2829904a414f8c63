//! Correlation heatmap: the Pearson matrix rendered as a coloured table.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Cell, Row, Table, Widget},
};
use staylens_core::stats::CorrelationMatrix;

pub struct Correlation<'a> {
    matrix: &'a CorrelationMatrix,
    theme: &'a Theme,
}

impl<'a> Correlation<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, theme: &'a Theme) -> Self {
        Self { matrix, theme }
    }
}

/// Short column header: `room_size_sqft` → `room_siz`.
fn abbreviate(label: &str) -> String {
    label
        .split('_')
        .map(|part| part.chars().take(4).collect::<String>())
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(8)
        .collect()
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:+.2}")).unwrap_or_else(|| "  ·".to_string())
}

impl Widget for Correlation<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(self.matrix.labels.iter().map(|l| Cell::from(abbreviate(l))))
                .collect::<Vec<_>>(),
        )
        .style(bold);

        let rows: Vec<Row> = self
            .matrix
            .labels
            .iter()
            .zip(&self.matrix.cells)
            .map(|(label, cells)| {
                Row::new(
                    std::iter::once(Cell::from(*label).style(self.theme.kpi_label))
                        .chain(cells.iter().map(|v| {
                            Cell::from(format_cell(*v)).style(self.theme.heat_style(*v))
                        }))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(15))
            .chain(self.matrix.labels.iter().map(|_| Constraint::Length(8)))
            .collect();

        Table::new(rows, widths)
            .header(header)
            .block(
                Block::bordered()
                    .title(" Correlation heatmap ")
                    .border_style(self.theme.border_panel),
            )
            .render(area, buf);
    }
}
