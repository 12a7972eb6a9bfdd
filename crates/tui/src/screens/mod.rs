//! Screens of the booking flow.
//!
//! Each screen owns its form state and reacts to [`Message`]s by returning an
//! optional [`Action`]. Screens never touch storage: the app performs every
//! action that reads or writes persisted state and hands the results back.
//!
//! Rendering is split in two passes. [`Screen::render`] draws the page and
//! records the areas used for click hit-testing; [`Screen::render_overlay`]
//! runs after everything else so open popovers are never covered.

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod dashboard;
pub mod detail;
pub mod home;
pub mod hotels;
pub mod stay;

use beiramar_protocol::{Booking, BookingId, CalendarDate, Language, Message, PaymentDetails, User};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::event::InputMode;
use crate::listener::PointerListeners;
use crate::state::Route;

pub use admin::AdminScreen;
pub use auth::{LoginForm, RegisterForm};
pub use checkout::{BookingSummary, Confirmation, PaymentForm};
pub use dashboard::DashboardScreen;
pub use detail::DetailForm;
pub use home::SearchForm;
pub use hotels::HotelList;

/// Read-only context handed to screens.
#[derive(Debug, Clone, Copy)]
pub struct Ctx<'a> {
    /// Interface language.
    pub lang: Language,
    /// The signed-in user.
    pub user: Option<&'a User>,
    /// Registry for popover outside-click listeners.
    pub listeners: &'a PointerListeners,
    /// The whole terminal area.
    pub viewport: Rect,
    /// Today's date.
    pub today: CalendarDate,
}

/// A request from a screen to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Go to another screen.
    Navigate(Route),
    /// Hold a pending booking and go to its summary.
    StartBooking(Box<Booking>),
    /// Sign in after the login delay.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Create an account after the login delay.
    Register {
        /// Display name.
        name: String,
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Pay for the pending booking after the payment delay.
    Pay(PaymentDetails),
    /// Cancel a stored booking.
    Cancel(BookingId),
}

/// The active screen and its state.
#[derive(Debug)]
pub enum Screen {
    /// Search form.
    Home(SearchForm),
    /// Filterable hotel list.
    Hotels(HotelList),
    /// Hotel page with the booking sidebar.
    Detail(DetailForm),
    /// Sign-in form.
    Login(LoginForm),
    /// Registration form.
    Register(RegisterForm),
    /// Pending booking summary.
    Booking(BookingSummary),
    /// Payment form.
    Payment(PaymentForm),
    /// Payment receipt.
    Confirmation(Confirmation),
    /// The signed-in user's bookings.
    Dashboard(DashboardScreen),
    /// Every booking and user.
    Admin(AdminScreen),
}

impl Screen {
    /// How keys should be read on this screen.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self {
            Self::Home(s) => s.input_mode(),
            Self::Hotels(s) => s.input_mode(),
            Self::Detail(s) => s.input_mode(),
            Self::Login(s) => s.input_mode(),
            Self::Register(s) => s.input_mode(),
            Self::Payment(s) => s.input_mode(),
            Self::Booking(_) | Self::Confirmation(_) | Self::Dashboard(_) | Self::Admin(_) => {
                InputMode::Normal
            }
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message, ctx: &Ctx<'_>) -> Option<Action> {
        match self {
            Self::Home(s) => s.update(msg, ctx),
            Self::Hotels(s) => s.update(msg),
            Self::Detail(s) => s.update(msg, ctx),
            Self::Login(s) => s.update(msg),
            Self::Register(s) => s.update(msg),
            Self::Booking(s) => s.update(msg),
            Self::Payment(s) => s.update(msg),
            Self::Confirmation(s) => s.update(msg),
            Self::Dashboard(s) => s.update(msg),
            Self::Admin(s) => s.update(msg),
        }
    }

    /// Handles a pointer press before it is dispatched as a click.
    ///
    /// Open popovers close here when the press lands outside them.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        match self {
            Self::Home(s) => s.pointer_down(column, row),
            Self::Detail(s) => s.pointer_down(column, row),
            _ => {}
        }
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16, ctx: &Ctx<'_>) -> Option<Action> {
        match self {
            Self::Home(s) => s.click(column, row, ctx),
            Self::Hotels(s) => s.click(column, row),
            Self::Detail(s) => s.click(column, row, ctx),
            Self::Login(s) => s.click(column, row),
            Self::Register(s) => s.click(column, row),
            Self::Booking(s) => s.click(column, row),
            Self::Payment(s) => s.click(column, row),
            Self::Confirmation(s) => s.click(column, row),
            Self::Dashboard(s) => s.click(column, row),
            Self::Admin(s) => s.click(column, row),
        }
    }

    /// Draws the page.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        match self {
            Self::Home(s) => s.render(ctx, area, buf),
            Self::Hotels(s) => s.render(ctx, area, buf),
            Self::Detail(s) => s.render(ctx, area, buf),
            Self::Login(s) => s.render(ctx, area, buf),
            Self::Register(s) => s.render(ctx, area, buf),
            Self::Booking(s) => s.render(ctx, area, buf),
            Self::Payment(s) => s.render(ctx, area, buf),
            Self::Confirmation(s) => s.render(ctx, area, buf),
            Self::Dashboard(s) => s.render(ctx, area, buf),
            Self::Admin(s) => s.render(ctx, area, buf),
        }
    }

    /// Draws popovers on top of the page.
    pub fn render_overlay(&self, ctx: &Ctx<'_>, buf: &mut Buffer) {
        match self {
            Self::Home(s) => s.render_overlay(ctx, buf),
            Self::Detail(s) => s.render_overlay(ctx, buf),
            _ => {}
        }
    }
}

/// Returns the item after (or before) `current` in `order`, wrapping.
pub(crate) fn cycle<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let Some(index) = order.iter().position(|item| *item == current) else {
        return current;
    };
    let len = order.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    order[next]
}

/// Finds the item whose area contains the position.
pub(crate) fn hit<T: Copy>(areas: &[(Rect, T)], column: u16, row: u16) -> Option<T> {
    areas
        .iter()
        .find(|(area, _)| area.contains(Position::new(column, row)))
        .map(|(_, item)| *item)
}

/// Formats an amount in whole dollars with thousands separators.
pub(crate) fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        A,
        B,
        C,
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let order = [Field::A, Field::B, Field::C];
        assert_eq!(cycle(&order, Field::A, true), Field::B);
        assert_eq!(cycle(&order, Field::C, true), Field::A);
        assert_eq!(cycle(&order, Field::A, false), Field::C);
    }

    #[test]
    fn cycle_keeps_unknown_items() {
        assert_eq!(cycle(&[Field::A, Field::B], Field::C, true), Field::C);
    }

    #[test]
    fn hit_finds_first_containing_area() {
        let areas = [
            (Rect::new(0, 0, 10, 3), Field::A),
            (Rect::new(0, 3, 10, 3), Field::B),
        ];
        assert_eq!(hit(&areas, 5, 4), Some(Field::B));
        assert_eq!(hit(&areas, 5, 10), None);
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0), "$0");
        assert_eq!(money(890), "$890");
        assert_eq!(money(1650), "$1,650");
        assert_eq!(money(1_234_567), "$1,234,567");
    }
}
