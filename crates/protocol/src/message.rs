//! TUI message types for event handling.
//!
//! Messages are produced by the input handler and by completed background
//! delays, and consumed by the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions or timer completions in the TUI.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::Message;
///
/// let msg = Message::CalendarMove { days: 7 };
/// assert!(msg.is_calendar());
/// assert!(!msg.is_terminating());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Quit the application.
    Quit,
    /// Close the innermost overlay, or go back one screen.
    Escape,
    /// Toggle help overlay.
    ToggleHelp,
    /// Move selection up within a list.
    NavigateUp,
    /// Move selection down within a list.
    NavigateDown,
    /// Step the focused choice backwards.
    NavigateLeft,
    /// Step the focused choice forwards.
    NavigateRight,
    /// Focus the next form field.
    NextField,
    /// Focus the previous form field.
    PrevField,
    /// Activate the focused field or button.
    Select,
    /// Type a character into the focused text field.
    Input {
        /// The typed character.
        ch: char,
    },
    /// Delete the last character of the focused text field.
    Backspace,
    /// Mouse click at coordinates (column, row).
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },

    // --- Navigation between screens ---
    /// Switch the interface language.
    CycleLanguage,
    /// Go to the search screen.
    OpenHome,
    /// Go to the hotel list.
    OpenHotels,
    /// Go to the guest dashboard.
    OpenDashboard,
    /// Go to the admin overview.
    OpenAdmin,
    /// Go to the sign-in form.
    OpenLogin,
    /// Go to the registration form.
    OpenRegister,
    /// Sign out.
    Logout,

    // --- List actions ---
    /// Cycle the hotel sort order.
    CycleSort,
    /// Cycle the booking status filter.
    CycleFilter,
    /// Reset hotel filters.
    ResetFilters,
    /// Cancel the selected booking.
    CancelBooking,

    // --- Calendar popover ---
    /// Move the calendar cursor by a number of days.
    CalendarMove {
        /// Signed day offset.
        days: i32,
    },
    /// Show the previous month.
    PrevMonth,
    /// Show the next month.
    NextMonth,
    /// Pick today's date.
    PickToday,
    /// Clear the date.
    ClearDate,

    // --- Background ---
    /// A simulated delay identified by `ticket` has elapsed.
    DelayElapsed {
        /// Ticket handed out when the delay was started.
        ticket: u64,
    },
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::Message;
    ///
    /// assert!(Message::NavigateUp.is_navigation());
    /// assert!(Message::NextField.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft
                | Self::NavigateRight
                | Self::NavigateUp
                | Self::NavigateDown
                | Self::NextField
                | Self::PrevField
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message only makes sense with a calendar open.
    #[must_use]
    pub fn is_calendar(&self) -> bool {
        matches!(
            self,
            Self::CalendarMove { .. }
                | Self::PrevMonth
                | Self::NextMonth
                | Self::PickToday
                | Self::ClearDate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_navigation_detection() {
        assert!(Message::NavigateLeft.is_navigation());
        assert!(Message::NavigateDown.is_navigation());
        assert!(Message::PrevField.is_navigation());
        assert!(!Message::CalendarMove { days: 1 }.is_navigation());
        assert!(!Message::Quit.is_navigation());
    }

    #[test]
    fn message_terminating_detection() {
        assert!(Message::Quit.is_terminating());
        assert!(!Message::Escape.is_terminating());
        assert!(!Message::Logout.is_terminating());
    }

    #[test]
    fn message_calendar_detection() {
        assert!(Message::PrevMonth.is_calendar());
        assert!(Message::NextMonth.is_calendar());
        assert!(Message::PickToday.is_calendar());
        assert!(Message::ClearDate.is_calendar());
        assert!(!Message::Select.is_calendar());
        assert!(!Message::DelayElapsed { ticket: 1 }.is_calendar());
    }

    #[test]
    fn message_serialization_roundtrip() {
        let messages = vec![
            Message::Quit,
            Message::Escape,
            Message::Input { ch: 'x' },
            Message::ClickAt { column: 10, row: 5 },
            Message::CycleLanguage,
            Message::CalendarMove { days: -7 },
            Message::ClearDate,
            Message::DelayElapsed { ticket: 3 },
        ];

        for msg in messages {
            let json = serde_json::to_string(&msg).expect("serialize");
            let parsed: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg, parsed);
        }
    }

    #[test]
    fn message_json_format() {
        let json = serde_json::to_string(&Message::PickToday).expect("serialize");
        assert_eq!(json, r#""pick_today""#);

        let json = serde_json::to_string(&Message::CalendarMove { days: 1 }).expect("serialize");
        assert_eq!(json, r#"{"calendar_move":{"days":1}}"#);
    }
}
