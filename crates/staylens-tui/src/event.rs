//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `NextPage`                 |
//! | `Shift+Tab`             | `PrevPage`                 |
//! | `]`                     | `RatingUp`                 |
//! | `[`                     | `RatingDown`               |
//! | `x`                     | `ClearFilters`             |
//! | `↑↓←→` / `hjkl`         | `Nav(..)`                  |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the command bar is open the event loop calls
//! [`to_app_event_insert`] instead: every printable character (including
//! `q`, `x`, `[`, `]` and hjkl) is forwarded as `Char`, and only `Ctrl+c`,
//! `Esc`, `Enter`, `Backspace` and the arrow keys keep special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Switch to the next dashboard page.
    NextPage,
    /// Switch to the previous dashboard page.
    PrevPage,
    /// Raise the minimum-rating filter by one step.
    RatingUp,
    /// Lower the minimum-rating filter by one step.
    RatingDown,
    /// Drop every active filter.
    ClearFilters,
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    /// Dismiss the active modal (command bar, help popup).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (dashboard mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for the command bar.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        BackTab => Some(AppEvent::PrevPage),

        Char(']') if key.modifiers == Mod::NONE => Some(AppEvent::RatingUp),
        Char('[') if key.modifiers == Mod::NONE => Some(AppEvent::RatingDown),
        Char('x') if key.modifiers == Mod::NONE => Some(AppEvent::ClearFilters),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        // Shifted printables arrive with SHIFT on some terminals
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
