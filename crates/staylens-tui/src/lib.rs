//! staylens TUI: ratatui dashboard over a normalized hotel dataset.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the dashboard on an already-loaded dataset. Blocks until the user quits.
pub fn run(dataset: staylens_core::Dataset, config: staylens_core::config::Config) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    tracing::info!(hotels = dataset.len(), "starting dashboard");
    App::new(dataset, config, theme).run()
}
