//! Ratatui widgets for the staylens dashboard.

pub mod bar_list;
pub mod command_bar;
pub mod correlation;
pub mod filter_bar;
pub mod help;
pub mod histogram;
pub mod kpi_row;
pub mod price_table;
pub mod tab_bar;
