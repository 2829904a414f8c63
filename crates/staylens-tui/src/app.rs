//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every filter change
//! rebuilds the [`Report`] from the immutable [`Dataset`].

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        bar_list::{BarList, BarRow},
        command_bar::{CommandBar, CommandBarState},
        correlation::Correlation,
        filter_bar::FilterBar,
        help::HelpPopup,
        histogram::Histogram,
        kpi_row::KpiRow,
        price_table::PriceTable,
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use staylens_core::{
    config::Config,
    stats::{CountRow, Report},
    Dataset, Filter, RatingRange,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus + page types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dashboard,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    DeepDive,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Overview, Page::DeepDive];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::DeepDive => "Deep Dive",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Page::Overview => 0,
            Page::DeepDive => 1,
        }
    }

    pub fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dataset: Dataset,
    pub filter: Filter,
    /// Aggregations for the current filter; rebuilt by [`AppState::refresh`].
    pub report: Report,
    pub page: Page,
    pub focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Feedback from the last command or filter change.
    pub status: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config, theme: Theme) -> Self {
        let filter = Filter::default();
        let report = Report::build(&filter.apply(dataset.records()), &config.ui);
        Self {
            dataset,
            filter,
            report,
            page: Page::Overview,
            focus: Focus::Dashboard,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            status: None,
            quit: false,
        }
    }

    /// Recompute the report for the current filter.
    pub fn refresh(&mut self) {
        let rows = self.filter.apply(self.dataset.records());
        tracing::debug!(filter = ?self.filter, visible = rows.len(), "filter applied");
        self.report = Report::build(&rows, &self.config.ui);
    }

    /// Move the minimum-rating bound by `delta`, keeping the current maximum.
    /// Returning to the full range clears the rating filter.
    fn nudge_min_rating(&mut self, delta: f64) {
        let ceiling = self.config.normalize.max_rating;
        let (min, max) = self
            .filter
            .rating
            .map(|r| (r.min(), r.max()))
            .unwrap_or((0.0, ceiling));
        let min = (min + delta).clamp(0.0, max.max(0.0));

        self.filter.rating = if min <= 0.0 && max >= ceiling {
            None
        } else {
            RatingRange::new(min, max).ok()
        };
        self.refresh();
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = Focus::Dashboard;
                }
                AppEvent::Quit => self.quit = true,
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            match execute_command(self, cmd) {
                                Ok(()) => {
                                    self.command_bar.clear();
                                    self.focus = Focus::Dashboard;
                                    self.status = None;
                                }
                                // Keep the bar open so the input can be fixed
                                Err(msg) => self.command_bar.error = Some(msg),
                            }
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = Focus::Dashboard;
                        }
                        Err(msg) => self.command_bar.error = Some(msg),
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Char('1') => self.page = Page::Overview,
            AppEvent::Char('2') => self.page = Page::DeepDive,
            AppEvent::NextPage => self.page = self.page.next(),
            AppEvent::PrevPage => self.page = self.page.prev(),
            AppEvent::RatingUp => self.nudge_min_rating(self.config.ui.rating_step),
            AppEvent::RatingDown => self.nudge_min_rating(-self.config.ui.rating_step),
            AppEvent::ClearFilters => {
                self.filter = Filter::default();
                self.status = Some("filters cleared".to_string());
                self.refresh();
            }
            // Terminal resize is handled automatically by ratatui
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(dataset: Dataset, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(dataset, config, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn count_rows(rows: &[CountRow]) -> Vec<BarRow> {
    rows.iter()
        .map(|r| BarRow {
            label: r.label.clone(),
            value: r.count as f64,
            display: r.count.to_string(),
        })
        .collect()
}

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line page bar | body | 3-line filter bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(TabBar::new(state.page, &state.theme), vert[0]);

    match state.page {
        Page::Overview => draw_overview(frame, state, vert[1]),
        Page::DeepDive => draw_deep_dive(frame, state, vert[1]),
    }

    frame.render_widget(
        FilterBar::new(
            &state.filter,
            state.report.kpis.hotels,
            state.dataset.len(),
            state.status.as_deref(),
            &state.theme,
        ),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = command_bar_area(area);
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

/// Bottom row of `area`; empty when the terminal has no rows.
fn command_bar_area(area: Rect) -> Rect {
    Rect { y: area.bottom().saturating_sub(1), height: area.height.min(1), ..area }
}

fn two_by_two(area: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);
    let split = |r: Rect| {
        Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(r)
    };
    let top = split(rows[0]);
    let bottom = split(rows[1]);
    [top[0], top[1], bottom[0], bottom[1]]
}

fn draw_overview(frame: &mut Frame, state: &AppState, area: Rect) {
    let report = &state.report;
    let theme = &state.theme;

    let split = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(4), Constraint::Fill(1)])
        .split(area);
    frame.render_widget(KpiRow::new(&report.kpis, theme), split[0]);

    let [rating, price, discount, hotels] = two_by_two(split[1]);
    frame.render_widget(
        Histogram::new("Rating distribution", &report.rating_histogram, theme.histogram_rating, theme),
        rating,
    );
    frame.render_widget(PriceTable::new(&report.prices, theme), price);
    frame.render_widget(
        Histogram::new("Discount % distribution", &report.discount_histogram, theme.histogram_discount, theme),
        discount,
    );

    let top_hotels = report
        .top_hotels
        .iter()
        .map(|h| BarRow {
            label: h.name.clone(),
            value: h.rating,
            display: format!("{:.2}", h.rating),
        })
        .collect();
    frame.render_widget(
        BarList::new(&format!("Top {} hotels by rating", state.config.ui.top_hotels), top_hotels, theme),
        hotels,
    );
}

fn draw_deep_dive(frame: &mut Frame, state: &AppState, area: Rect) {
    let report = &state.report;
    let theme = &state.theme;
    let [cities, categories, amenities, correlation] = two_by_two(area);

    frame.render_widget(
        BarList::new("Top cities by hotels", count_rows(&report.top_cities), theme),
        cities,
    );
    frame.render_widget(
        BarList::new("Categories", count_rows(&report.categories), theme),
        categories,
    );
    frame.render_widget(
        BarList::new(
            &format!("Amenities (top {})", state.config.ui.top_amenities),
            count_rows(&report.amenities),
            theme,
        ),
        amenities,
    );
    frame.render_widget(Correlation::new(&report.correlation, theme), correlation);
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
