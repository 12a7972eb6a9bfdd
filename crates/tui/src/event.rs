//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. How a key is read depends on the [`InputMode`]
//! of the active screen: plain letters are shortcuts in normal mode, typed
//! text in a focused text field, and calendar commands while a date popover
//! is open.

use std::time::Duration;

use beiramar_protocol::Message;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Letters are shortcuts.
    #[default]
    Normal,
    /// A text field has focus; printable keys are typed.
    Text,
    /// A date popover is open.
    Calendar,
}

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event, mode: InputMode) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key, mode),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only left-click press events are handled, producing a `ClickAt` message
/// with the click coordinates.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::ClickAt {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// `Ctrl+C` quits in every mode. The remaining bindings depend on `mode`.
///
/// # Key Bindings (Normal Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Esc` | Escape (close overlay or go back) |
/// | Arrows | Navigate |
/// | `Tab` / `Shift+Tab` | Next / previous field |
/// | `Enter` or `Space` | Select |
/// | `?` | Toggle help |
/// | `l` | Switch language |
/// | `1` `2` `3` `4` | Home, hotels, my bookings, admin |
/// | `i` / `n` / `o` | Sign in, register, sign out |
/// | `s` / `f` / `r` | Sort, filter, reset filters |
/// | `c` | Cancel booking |
///
/// # Key Bindings (Text Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | Any char | Input |
/// | `Backspace` | Delete before cursor |
/// | `Left` / `Right` | Move cursor |
/// | `Up` / `Down` | Move through suggestions |
/// | `Tab` / `Shift+Tab` | Next / previous field |
/// | `Enter` | Select |
/// | `Esc` | Escape |
///
/// # Key Bindings (Calendar Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Left` / `Right` | Previous / next day |
/// | `Up` / `Down` | Previous / next week |
/// | `PageUp` or `<` | Previous month |
/// | `PageDown` or `>` | Next month |
/// | `Enter` or `Space` | Pick the highlighted day |
/// | `t` | Pick today |
/// | `Delete` or `x` | Clear the date |
/// | `Esc` | Close the calendar |
#[must_use]
pub fn key_to_message(key: KeyEvent, mode: InputMode) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match mode {
        InputMode::Normal => normal_key(key),
        InputMode::Text => text_key(key),
        InputMode::Calendar => calendar_key(key),
    }
}

fn normal_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Tab => Some(Message::NextField),
        KeyCode::BackTab => Some(Message::PrevField),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),

        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('l') => Some(Message::CycleLanguage),

        KeyCode::Char('1') => Some(Message::OpenHome),
        KeyCode::Char('2') => Some(Message::OpenHotels),
        KeyCode::Char('3') => Some(Message::OpenDashboard),
        KeyCode::Char('4') => Some(Message::OpenAdmin),
        KeyCode::Char('i') => Some(Message::OpenLogin),
        KeyCode::Char('n') => Some(Message::OpenRegister),
        KeyCode::Char('o') => Some(Message::Logout),

        KeyCode::Char('s') => Some(Message::CycleSort),
        KeyCode::Char('f') => Some(Message::CycleFilter),
        KeyCode::Char('r') => Some(Message::ResetFilters),
        KeyCode::Char('c') => Some(Message::CancelBooking),

        _ => None,
    }
}

fn text_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Enter => Some(Message::Select),
        KeyCode::Tab => Some(Message::NextField),
        KeyCode::BackTab => Some(Message::PrevField),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Char(ch) => Some(Message::Input { ch }),
        _ => None,
    }
}

fn calendar_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::Left => Some(Message::CalendarMove { days: -1 }),
        KeyCode::Right => Some(Message::CalendarMove { days: 1 }),
        KeyCode::Up => Some(Message::CalendarMove { days: -7 }),
        KeyCode::Down => Some(Message::CalendarMove { days: 7 }),
        KeyCode::PageUp | KeyCode::Char('<') => Some(Message::PrevMonth),
        KeyCode::PageDown | KeyCode::Char('>') => Some(Message::NextMonth),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        KeyCode::Char('t') => Some(Message::PickToday),
        KeyCode::Delete | KeyCode::Char('x') => Some(Message::ClearDate),
        KeyCode::Tab => Some(Message::NextField),
        KeyCode::BackTab => Some(Message::PrevField),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}
