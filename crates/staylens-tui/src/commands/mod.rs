// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Page},
    theme::Theme,
};
use staylens_core::{filter, RatingRange};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Page(Page),
    /// Restrict to these cities; an empty list clears the city filter.
    City(Vec<String>),
    /// Minimum and optional maximum rating; `None` clears the rating filter.
    Rating(Option<(f64, Option<f64>)>),
    /// Require these amenities; an empty list clears the amenity filter.
    Amenity(Vec<String>),
    /// Drop every filter.
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" => match rest.to_ascii_lowercase().as_str() {
                "1" | "overview" => Ok(Command::Page(Page::Overview)),
                "2" | "deep" | "deep-dive" | "deepdive" => Ok(Command::Page(Page::DeepDive)),
                _ => Err("usage: page <overview|deep>".to_string()),
            },
            "city" | "cities" => Ok(Command::City(split_list(rest))),
            "amenity" | "amenities" => Ok(Command::Amenity(split_list(rest))),
            "rating" => parse_rating(rest),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn split_list(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_rating(rest: &str) -> Result<Command, String> {
    const USAGE: &str = "usage: rating <min> [max]";
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let number = |s: &str| s.parse::<f64>().map_err(|_| USAGE.to_string());
    match parts.as_slice() {
        [] => Ok(Command::Rating(None)),
        [min] => Ok(Command::Rating(Some((number(min)?, None)))),
        [min, max] => Ok(Command::Rating(Some((number(min)?, Some(number(max)?))))),
        _ => Err(USAGE.to_string()),
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message for commands that parsed but cannot be applied
/// (unknown theme or city, rating bounds outside the scale or inverted); the
/// state is left unchanged then.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Page(page) => s.page = page,
        Command::City(names) => {
            let known = filter::cities(s.dataset.records());
            let mut resolved = Vec::with_capacity(names.len());
            for name in names {
                match known.iter().find(|c| c.eq_ignore_ascii_case(&name)) {
                    Some(city) => resolved.push(city.clone()),
                    None => return Err(format!("unknown city: {name}")),
                }
            }
            s.filter = s.filter.clone().with_cities(resolved);
            s.refresh();
        }
        Command::Rating(None) => {
            s.filter.rating = None;
            s.refresh();
        }
        Command::Rating(Some((min, max))) => {
            let ceiling = s.config.normalize.max_rating;
            let max = max.unwrap_or(ceiling);
            if min < 0.0 || max > ceiling {
                return Err(format!("rating must be between 0 and {ceiling}"));
            }
            let range = RatingRange::new(min, max).map_err(|e| e.to_string())?;
            s.filter = s.filter.clone().with_rating(range);
            s.refresh();
        }
        Command::Amenity(names) => {
            s.filter = s.filter.clone().with_amenities(names);
            s.refresh();
        }
        Command::Clear => {
            s.filter = Default::default();
            s.refresh();
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
