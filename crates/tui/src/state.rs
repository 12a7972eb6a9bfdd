//! Application state management.
//!
//! This module defines the routes of the application, the access rules that
//! guard them, and the state shared across screens: the signed-in user, the
//! interface language, the pending booking and any operation waiting on a
//! simulated delay.

use beiramar_protocol::{Booking, CalendarDate, Language, PaymentDetails, User};

use crate::screens::{HotelList, Screen, SearchForm};

/// A destination the user can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The search form.
    Home,
    /// The hotel list, pre-filtered by `query`.
    Hotels {
        /// Free-text filter.
        query: String,
    },
    /// One hotel's page.
    Detail {
        /// Catalog identifier of the hotel.
        hotel_id: u32,
    },
    /// The sign-in form.
    Login,
    /// The registration form.
    Register,
    /// The pending booking summary.
    Booking,
    /// The payment form.
    Payment,
    /// The signed-in user's bookings.
    Dashboard,
    /// The admin overview.
    Admin,
}

impl Route {
    /// The hotel list with no filter.
    #[must_use]
    pub fn hotels() -> Self {
        Self::Hotels {
            query: String::new(),
        }
    }
}

/// An operation started by the user and completed after a delay.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingKind {
    /// Sign in.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Create an account.
    Register {
        /// Display name.
        name: String,
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Confirm the pending booking.
    Payment(PaymentDetails),
}

/// A delayed operation and the ticket its completion will carry.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOp {
    /// Identifies the completion message.
    pub ticket: u64,
    /// What to do on completion.
    pub kind: PendingKind,
}

/// The application state.
///
/// Contains all mutable state for the TUI application that outlives a single
/// screen.
#[derive(Debug)]
pub struct AppState {
    /// The route of the active screen.
    pub route: Route,
    /// The active screen.
    pub screen: Screen,
    /// The signed-in user.
    pub user: Option<User>,
    /// Interface language.
    pub language: Language,
    /// Booking created on a hotel page and not yet paid.
    pub pending_booking: Option<Booking>,
    /// Operation waiting for its delay to elapse.
    pub pending_op: Option<PendingOp>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Message shown in the status line until the next navigation.
    pub flash: Option<String>,
    next_ticket: u64,
}

impl AppState {
    /// Creates the state for a fresh session on the home screen.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::{CalendarDate, Language};
    /// use beiramar_tui::state::{AppState, Route};
    ///
    /// let state = AppState::new(None, Language::En, CalendarDate::today());
    /// assert_eq!(state.route, Route::Home);
    /// assert!(state.pending_booking.is_none());
    /// ```
    #[must_use]
    pub fn new(user: Option<User>, language: Language, today: CalendarDate) -> Self {
        Self {
            route: Route::Home,
            screen: Screen::Home(SearchForm::new(today)),
            user,
            language,
            pending_booking: None,
            pending_op: None,
            help_visible: false,
            flash: None,
            next_ticket: 0,
        }
    }

    /// Applies the access rules to a requested route.
    ///
    /// Booking, payment and the dashboard need a signed-in user; booking and
    /// payment also need a pending booking, falling back to the hotel list.
    /// The admin overview needs the admin role; other users are sent home.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::{CalendarDate, Language, User};
    /// use beiramar_tui::state::{AppState, Route};
    ///
    /// let mut state = AppState::new(None, Language::En, CalendarDate::today());
    /// assert_eq!(state.guard(Route::Dashboard), Route::Login);
    ///
    /// state.user = Some(User::admin());
    /// assert_eq!(state.guard(Route::Admin), Route::Admin);
    /// assert_eq!(state.guard(Route::Payment), Route::hotels());
    /// ```
    #[must_use]
    pub fn guard(&self, route: Route) -> Route {
        match (&route, &self.user) {
            (Route::Booking | Route::Payment | Route::Dashboard | Route::Admin, None) => {
                Route::Login
            }
            (Route::Booking | Route::Payment, Some(_)) if self.pending_booking.is_none() => {
                Route::hotels()
            }
            (Route::Admin, Some(user)) if !user.is_admin() => Route::Home,
            _ => route,
        }
    }

    /// Hands out a fresh ticket for a delayed operation and records it.
    pub fn begin(&mut self, kind: PendingKind) -> u64 {
        self.next_ticket += 1;
        self.pending_op = Some(PendingOp {
            ticket: self.next_ticket,
            kind,
        });
        self.next_ticket
    }

    /// Takes the pending operation if `ticket` is the one it was started with.
    ///
    /// Stale tickets from abandoned operations yield `None`.
    pub fn complete(&mut self, ticket: u64) -> Option<PendingKind> {
        if self.pending_op.as_ref()?.ticket != ticket {
            return None;
        }
        self.pending_op.take().map(|op| op.kind)
    }

    /// Returns `true` while a delayed operation is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending_op.is_some()
    }

    /// Replaces the active screen, abandoning any delayed operation.
    pub fn show(&mut self, route: Route, screen: Screen) {
        self.route = route;
        self.screen = screen;
        self.pending_op = None;
        self.flash = None;
    }

    /// Opens the hotel list for `query`.
    pub fn show_hotels(&mut self, query: String) {
        let screen = Screen::Hotels(HotelList::new(&query));
        self.show(Route::Hotels { query }, screen);
    }
}
