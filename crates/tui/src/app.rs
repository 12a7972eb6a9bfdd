//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: it turns terminal events into messages, routes
//! them to the active screen, performs the actions screens request against
//! storage, and renders the header, the page and the overlays.

use std::time::Duration;

use beiramar_config::Config;
use beiramar_protocol::{CalendarDate, Message, PaymentDetails, User, catalog};
use beiramar_store::{Storage, StoreError};
use chrono::Utc;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    AppState,
    event::{event_to_message, poll_event},
    layout::{HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, STATUS_HEIGHT},
    listener::PointerListeners,
    screens::{
        Action, AdminScreen, BookingSummary, Confirmation, Ctx, DashboardScreen, DetailForm,
        LoginForm, PaymentForm, RegisterForm, Screen, SearchForm,
    },
    state::{PendingKind, Route},
    terminal::AppTerminal,
    widgets::render_help_overlay,
};

/// The main application struct.
///
/// Owns the session state, the storage and the channel on which simulated
/// delays report back.
#[derive(Debug)]
pub struct App {
    state: AppState,
    storage: Storage,
    config: Config,
    listeners: PointerListeners,
    should_quit: bool,
    /// Last known terminal area, used for popover placement and hit-testing.
    last_area: Rect,
    /// Whether the header was shown in the last render (affects click hit-testing).
    header_visible: bool,
    /// Header links from the last render.
    nav_areas: Vec<(Rect, Message)>,
    /// Overrides the calendar date, for tests.
    today: Option<CalendarDate>,
    delay_tx: mpsc::UnboundedSender<Message>,
    delay_rx: mpsc::UnboundedReceiver<Message>,
}

impl App {
    /// Creates the application for the stored session.
    ///
    /// The stored language preference wins over the configured default.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_config::Config;
    /// use beiramar_store::Storage;
    /// use beiramar_tui::{App, Route};
    ///
    /// let app = App::new(Config::default(), Storage::in_memory());
    /// assert_eq!(app.state().route, Route::Home);
    /// assert!(app.state().user.is_none());
    /// ```
    #[must_use]
    pub fn new(config: Config, storage: Storage) -> Self {
        let user = storage.current_user().unwrap_or_else(|err| {
            warn!(%err, "ignoring unreadable session");
            None
        });
        let language = match storage.language() {
            Ok(stored) => stored.unwrap_or(config.language),
            Err(err) => {
                warn!(%err, "ignoring unreadable language preference");
                config.language
            }
        };
        let (delay_tx, delay_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(user, language, CalendarDate::today()),
            storage,
            config,
            listeners: PointerListeners::default(),
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
            nav_areas: Vec::new(),
            today: None,
            delay_tx,
            delay_rx,
        }
    }

    /// Pins the calendar date, restarting on a fresh search form.
    #[must_use]
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self.state.screen = Screen::Home(SearchForm::new(today));
        self
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the storage backing the session.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, messages dismiss it instead of
    /// their normal action. Only `Quit` and delay completions keep working.
    pub fn update(&mut self, msg: Message) {
        if self.state.help_visible {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::DelayElapsed { ticket } => self.complete(ticket),
                _ => self.state.help_visible = false,
            }
            return;
        }

        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.state.help_visible = true,
            Message::DelayElapsed { ticket } => self.complete(ticket),
            Message::ClickAt { column, row } => self.handle_click(column, row),
            Message::CycleLanguage => self.cycle_language(),
            Message::OpenHome => self.navigate(Route::Home),
            Message::OpenHotels => self.navigate(Route::hotels()),
            Message::OpenDashboard => self.navigate(Route::Dashboard),
            Message::OpenAdmin => self.navigate(Route::Admin),
            Message::OpenLogin => self.navigate(Route::Login),
            Message::OpenRegister => self.navigate(Route::Register),
            Message::Logout => self.logout(),
            msg => {
                let today = self.today();
                let ctx = Ctx {
                    lang: self.state.language,
                    user: self.state.user.as_ref(),
                    listeners: &self.listeners,
                    viewport: self.last_area,
                    today,
                };
                if let Some(action) = self.state.screen.update(&msg, &ctx) {
                    self.perform(action);
                }
            }
        }
    }

    /// Handles a mouse click at the given terminal coordinates.
    ///
    /// Open popovers see the press first, so a click outside one closes it
    /// before the click reaches whatever lies underneath.
    fn handle_click(&mut self, column: u16, row: u16) {
        if self.listeners.is_active() {
            self.state.screen.pointer_down(column, row);
        }

        if self.header_visible {
            let link = self
                .nav_areas
                .iter()
                .find(|(area, _)| area.contains(Position::new(column, row)))
                .map(|(_, msg)| msg.clone());
            if let Some(msg) = link {
                self.update(msg);
                return;
            }
        }

        let today = self.today();
        let ctx = Ctx {
            lang: self.state.language,
            user: self.state.user.as_ref(),
            listeners: &self.listeners,
            viewport: self.last_area,
            today,
        };
        if let Some(action) = self.state.screen.click(column, row, &ctx) {
            self.perform(action);
        }
    }

    /// Carries out a request from the active screen.
    fn perform(&mut self, action: Action) {
        match action {
            Action::Navigate(route) => self.navigate(route),
            Action::StartBooking(booking) => {
                debug!(booking = %booking.id, "pending booking held");
                self.state.pending_booking = Some(*booking);
                self.navigate(Route::Booking);
            }
            Action::Login { email, password } => {
                let delay = self.config.delays.login();
                self.start(PendingKind::Login { email, password }, delay);
            }
            Action::Register {
                name,
                email,
                password,
            } => {
                let delay = self.config.delays.login();
                self.start(
                    PendingKind::Register {
                        name,
                        email,
                        password,
                    },
                    delay,
                );
            }
            Action::Pay(details) => {
                let delay = self.config.delays.payment();
                self.start(PendingKind::Payment(details), delay);
            }
            Action::Cancel(id) => self.cancel_booking(&id),
        }
    }

    /// Opens a route after applying the access rules.
    fn navigate(&mut self, requested: Route) {
        let route = self.state.guard(requested.clone());
        if route != requested {
            debug!(?requested, ?route, "route redirected");
        }
        let today = self.today();
        let mut warning = None;

        let screen = match &route {
            Route::Home => Screen::Home(SearchForm::new(today)),
            Route::Hotels { query } => {
                self.state.show_hotels(query.clone());
                return;
            }
            Route::Detail { hotel_id } => match catalog::find(*hotel_id) {
                Ok(hotel) => Screen::Detail(DetailForm::new(hotel, today)),
                Err(err) => {
                    warn!(%err, "cannot open hotel page");
                    self.state.show_hotels(String::new());
                    self.state.flash = Some(self.state.language.t("detail", "not_found").to_string());
                    return;
                }
            },
            Route::Login => Screen::Login(LoginForm::new()),
            Route::Register => Screen::Register(RegisterForm::new()),
            Route::Booking | Route::Payment => {
                let Some(booking) = self.state.pending_booking.clone() else {
                    self.state.show_hotels(String::new());
                    return;
                };
                if route == Route::Booking {
                    Screen::Booking(BookingSummary::new(booking))
                } else {
                    Screen::Payment(PaymentForm::new(booking))
                }
            }
            Route::Dashboard => {
                let Some(user) = self.state.user.clone() else {
                    self.state.show(Route::Login, Screen::Login(LoginForm::new()));
                    return;
                };
                let bookings = self.storage.user_bookings(user.id).unwrap_or_else(|err| {
                    error!(%err, "could not load bookings");
                    warning = Some(err.to_string());
                    Vec::new()
                });
                Screen::Dashboard(DashboardScreen::new(&user, bookings))
            }
            Route::Admin => {
                let bookings = self.storage.all_bookings().unwrap_or_else(|err| {
                    error!(%err, "could not load bookings");
                    warning = Some(err.to_string());
                    Vec::new()
                });
                let users = self.storage.users().unwrap_or_else(|err| {
                    error!(%err, "could not load users");
                    warning = Some(err.to_string());
                    Vec::new()
                });
                Screen::Admin(AdminScreen::new(bookings, users))
            }
        };

        debug!(?route, "navigated");
        self.state.show(route, screen);
        self.state.flash = warning;
    }

    /// Starts a delayed operation.
    ///
    /// A zero delay completes immediately; otherwise a timer task posts the
    /// completion back through the delay channel.
    fn start(&mut self, kind: PendingKind, delay: Duration) {
        let ticket = self.state.begin(kind);
        debug!(ticket, ?delay, "delayed operation started");
        if delay.is_zero() {
            self.complete(ticket);
            return;
        }
        let tx = self.delay_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the app has quit.
            let _ = tx.send(Message::DelayElapsed { ticket });
        });
    }

    /// Finishes the delayed operation identified by `ticket`.
    fn complete(&mut self, ticket: u64) {
        let Some(kind) = self.state.complete(ticket) else {
            debug!(ticket, "ignoring stale completion");
            return;
        };
        match kind {
            PendingKind::Login { email, password } => {
                match self.storage.login(&email, &password) {
                    Ok(user) => self.sign_in(user),
                    Err(err) => self.fail_auth(&err),
                }
            }
            PendingKind::Register {
                name,
                email,
                password,
            } => match self.storage.register(&name, &email, &password, Utc::now()) {
                Ok(user) => self.sign_in(user),
                Err(err) => self.fail_auth(&err),
            },
            PendingKind::Payment(details) => self.confirm_payment(details),
        }
    }

    fn sign_in(&mut self, user: User) {
        let route = if user.is_admin() {
            Route::Admin
        } else {
            Route::Dashboard
        };
        debug!(user_id = user.id, ?route, "opening account page");
        self.state.user = Some(user);
        self.navigate(route);
    }

    fn fail_auth(&mut self, err: &StoreError) {
        let key = match err {
            StoreError::InvalidCredentials => "error_invalid",
            StoreError::EmailTaken => "error_taken",
            other => {
                error!(err = %other, "account storage failed");
                "error_storage"
            }
        };
        debug!(key, "authentication failed");
        match &mut self.state.screen {
            Screen::Login(form) => form.fail(key),
            Screen::Register(form) => form.fail(key),
            _ => {}
        }
    }

    fn confirm_payment(&mut self, details: PaymentDetails) {
        let Some(pending) = self.state.pending_booking.take() else {
            warn!("payment completed without a pending booking");
            return;
        };
        match self.storage.confirm_booking(pending.clone(), details) {
            Ok(confirmed) => {
                debug!(booking = %confirmed.id, "showing confirmation");
                // The receipt stays on the payment route; the pending slot is empty now.
                self.state.show(
                    Route::Payment,
                    Screen::Confirmation(Confirmation::new(confirmed)),
                );
            }
            Err(err) => {
                error!(%err, "could not store booking");
                self.state.pending_booking = Some(pending);
                if let Screen::Payment(form) = &mut self.state.screen {
                    form.fail();
                }
                self.state.flash = Some(err.to_string());
            }
        }
    }

    fn cancel_booking(&mut self, id: &str) {
        match self.storage.cancel_booking(id) {
            Ok(true) => debug!(booking = id, "reloading bookings after cancel"),
            Ok(false) => warn!(booking = id, "no booking to cancel"),
            Err(err) => {
                error!(%err, "could not cancel booking");
                self.state.flash = Some(err.to_string());
                return;
            }
        }

        let reloaded = match (&self.state.screen, &self.state.user) {
            (Screen::Dashboard(_), Some(user)) => self.storage.user_bookings(user.id),
            (Screen::Admin(_), _) => self.storage.all_bookings(),
            _ => return,
        };
        match (reloaded, &mut self.state.screen) {
            (Ok(bookings), Screen::Dashboard(screen)) => screen.set_bookings(bookings),
            (Ok(bookings), Screen::Admin(screen)) => screen.set_bookings(bookings),
            (Err(err), _) => {
                error!(%err, "could not reload bookings");
                self.state.flash = Some(err.to_string());
            }
            _ => {}
        }
    }

    fn cycle_language(&mut self) {
        let language = self.state.language.next();
        self.state.language = language;
        info!(language = language.code(), "language changed");
        if let Err(err) = self.storage.set_language(language) {
            warn!(%err, "could not persist language");
            self.state.flash = Some(err.to_string());
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.storage.logout() {
            warn!(%err, "could not clear session");
        }
        self.state.user = None;
        self.state.pending_booking = None;
        self.navigate(Route::Home);
    }

    fn today(&self) -> CalendarDate {
        self.today.unwrap_or_else(CalendarDate::today)
    }

    /// Renders the application to the frame.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            self.nav_areas.clear();
            self.render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let [header, page, status] = Layout::vertical([
            Constraint::Length(if show_header { HEADER_HEIGHT } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);

        let buf = frame.buffer_mut();
        if show_header {
            self.render_header(header, buf);
        } else {
            self.nav_areas.clear();
        }

        let today = self.today();
        let ctx = Ctx {
            lang: self.state.language,
            user: self.state.user.as_ref(),
            listeners: &self.listeners,
            viewport: area,
            today,
        };
        self.state
            .screen
            .render(&ctx, page.inner(Margin::new(1, 0)), buf);
        self.state.screen.render_overlay(&ctx, buf);

        if let Some(flash) = &self.state.flash {
            Paragraph::new(flash.as_str())
                .style(Style::default().fg(Color::Red))
                .render(status.inner(Margin::new(1, 0)), buf);
        }

        if self.state.help_visible {
            render_help_overlay(self.state.language, area, buf);
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(&self, frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Runs the main application loop.
    ///
    /// This function blocks until the user quits the application.
    /// It polls for events, drains finished delays, updates state, and
    /// renders the UI.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use beiramar_config::Config;
    /// use beiramar_store::Storage;
    /// use beiramar_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(Config::default(), Storage::in_memory());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        info!(route = ?self.state.route, "event loop started");
        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                if let Some(msg) = event_to_message(&event, self.state.screen.input_mode()) {
                    self.update(msg);
                }
            }

            while let Ok(msg) = self.delay_rx.try_recv() {
                self.update(msg);
            }

            if self.should_quit {
                break;
            }
            tokio::task::yield_now().await;
        }
        info!("event loop stopped");
        Ok(())
    }

    /// Renders the header bar with title, links and help cue.
    fn render_header(&mut self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        block.render(area, buf);

        let [title_area, nav_area, help_area] = Layout::horizontal([
            Constraint::Length(12),
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        Paragraph::new(Line::from(Span::styled(
            "Beira Mar",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )))
        .render(title_area, buf);

        let lang = self.state.language;
        let user = self.state.user.as_ref();
        let mut links: Vec<(String, Message, bool)> = vec![
            (
                format!("{} 1", lang.t("nav", "home")),
                Message::OpenHome,
                self.state.route == Route::Home,
            ),
            (
                format!("{} 2", lang.t("nav", "hotels")),
                Message::OpenHotels,
                matches!(self.state.route, Route::Hotels { .. } | Route::Detail { .. }),
            ),
        ];
        match user {
            Some(user) => {
                links.push((
                    format!("{} 3", lang.t("nav", "my_bookings")),
                    Message::OpenDashboard,
                    self.state.route == Route::Dashboard,
                ));
                if user.is_admin() {
                    links.push((
                        format!("{} 4", lang.t("nav", "admin")),
                        Message::OpenAdmin,
                        self.state.route == Route::Admin,
                    ));
                }
                links.push((
                    format!("{} o", lang.t("nav", "logout")),
                    Message::Logout,
                    false,
                ));
            }
            None => {
                links.push((
                    format!("{} i", lang.t("nav", "login")),
                    Message::OpenLogin,
                    self.state.route == Route::Login,
                ));
                links.push((
                    format!("{} n", lang.t("nav", "register")),
                    Message::OpenRegister,
                    self.state.route == Route::Register,
                ));
            }
        }
        links.push((
            format!("{} l", lang.code().to_uppercase()),
            Message::CycleLanguage,
            false,
        ));

        self.nav_areas.clear();
        let mut x = nav_area.x;
        for (label, msg, active) in links {
            let text = format!(" {label} ");
            let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
            if x + width > nav_area.right() {
                break;
            }
            let style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let rect = Rect::new(x, nav_area.y, width, 1);
            Line::from(Span::styled(text, style)).render(rect, buf);
            self.nav_areas.push((rect, msg));
            x += width + 1;
        }

        Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right)
        .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, find_text};
    use beiramar_config::DelayConfig;
    use beiramar_protocol::user::{ADMIN_EMAIL, ADMIN_PASSWORD};
    use beiramar_protocol::{BookingStatus, Language};
    use ratatui::{Terminal, backend::TestBackend};

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2025, 6, 10).unwrap()
    }

    fn config(delays: DelayConfig) -> Config {
        Config {
            language: Language::En,
            delays,
            ..Config::default()
        }
    }

    fn app_with(storage: Storage) -> App {
        App::new(config(DelayConfig::none()), storage).with_today(today())
    }

    fn app() -> App {
        app_with(Storage::in_memory())
    }

    /// Storage with a registered guest who is signed out.
    fn storage_with_guest() -> Storage {
        let storage = Storage::in_memory();
        storage
            .register("Rita Sousa", "rita@example.com", "secret1", Utc::now())
            .unwrap();
        storage.logout().unwrap();
        storage
    }

    fn render(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        buffer_to_string(&render(app, width, height))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.update(Message::Input { ch });
        }
    }

    fn submit_login(app: &mut App, email: &str, password: &str) {
        app.update(Message::OpenLogin);
        type_text(app, email);
        app.update(Message::Select);
        type_text(app, password);
        app.update(Message::Select);
    }

    #[test]
    fn app_new_starts_home_signed_out() {
        let app = app();
        assert!(!app.should_quit());
        assert_eq!(app.state().route, Route::Home);
        assert!(app.state().user.is_none());
        assert_eq!(app.state().language, Language::En);
    }

    #[test]
    fn app_restores_session_and_language() {
        let storage = Storage::in_memory();
        storage
            .register("Rita", "rita@example.com", "secret1", Utc::now())
            .unwrap();
        storage.set_language(Language::Pt).unwrap();

        let app = app_with(storage);
        assert_eq!(app.state().user.as_ref().unwrap().name, "Rita");
        assert_eq!(app.state().language, Language::Pt);
    }

    #[test]
    fn app_quit_message_sets_should_quit() {
        let mut app = app();
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn app_help_dismisses_on_any_key() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        assert!(app.state().help_visible);

        app.update(Message::OpenHotels);
        assert!(!app.state().help_visible);
        assert_eq!(app.state().route, Route::Home);
    }

    #[test]
    fn app_quit_works_with_help_visible() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn guests_are_sent_to_login() {
        let mut app = app();
        app.update(Message::OpenDashboard);
        assert_eq!(app.state().route, Route::Login);
        app.update(Message::OpenAdmin);
        assert_eq!(app.state().route, Route::Login);
    }

    #[test]
    fn login_opens_dashboard() {
        let mut app = app_with(storage_with_guest());
        submit_login(&mut app, "rita@example.com", "secret1");

        assert_eq!(app.state().route, Route::Dashboard);
        assert_eq!(app.state().user.as_ref().unwrap().email, "rita@example.com");
        assert!(app.storage().current_user().unwrap().is_some());
    }

    #[test]
    fn admin_login_opens_overview() {
        let mut app = app();
        submit_login(&mut app, ADMIN_EMAIL, ADMIN_PASSWORD);
        assert_eq!(app.state().route, Route::Admin);
        assert!(matches!(app.state().screen, Screen::Admin(_)));
    }

    #[test]
    fn wrong_password_keeps_login_form() {
        let mut app = app_with(storage_with_guest());
        submit_login(&mut app, "rita@example.com", "wrong!");

        assert_eq!(app.state().route, Route::Login);
        let Screen::Login(form) = &app.state().screen else {
            panic!("expected the login form");
        };
        assert_eq!(form.error(), Some("error_invalid"));
        assert!(!form.is_busy());
    }

    #[test]
    fn registering_taken_email_shows_error() {
        let mut app = app_with(storage_with_guest());
        app.update(Message::OpenRegister);
        for text in ["Rita", "rita@example.com", "secret1", "secret1"] {
            type_text(&mut app, text);
            app.update(Message::NextField);
        }
        app.update(Message::Select);

        let Screen::Register(form) = &app.state().screen else {
            panic!("expected the registration form");
        };
        assert_eq!(form.error(), Some("error_taken"));
        assert!(app.state().user.is_none());
    }

    #[test]
    fn logout_returns_home() {
        let mut app = app();
        submit_login(&mut app, ADMIN_EMAIL, ADMIN_PASSWORD);
        app.update(Message::Logout);

        assert_eq!(app.state().route, Route::Home);
        assert!(app.state().user.is_none());
        assert!(app.storage().current_user().unwrap().is_none());
    }

    #[test]
    fn language_change_is_persisted() {
        let mut app = app();
        app.update(Message::CycleLanguage);
        assert_eq!(app.state().language, Language::Pt);
        assert_eq!(app.storage().language().unwrap(), Some(Language::Pt));
    }

    #[test]
    fn unknown_hotel_falls_back_to_list() {
        let mut app = app();
        app.perform(Action::Navigate(Route::Detail { hotel_id: 999 }));
        assert_eq!(app.state().route, Route::hotels());
        assert_eq!(app.state().flash.as_deref(), Some("Hotel not found"));
    }

    #[test]
    fn booking_flow_confirms_and_cancels() {
        let mut app = app_with(storage_with_guest());
        submit_login(&mut app, "rita@example.com", "secret1");
        draw(&mut app, 120, 40);

        app.perform(Action::Navigate(Route::Detail { hotel_id: 1 }));
        draw(&mut app, 120, 40);
        // Room, then both dates through the popovers.
        app.update(Message::Select);
        app.update(Message::Select);
        app.update(Message::CalendarMove { days: 2 });
        app.update(Message::Select);
        app.update(Message::NextField);
        app.update(Message::Select);
        app.update(Message::CalendarMove { days: 5 });
        app.update(Message::Select);
        app.update(Message::NextField);
        app.update(Message::NextField);
        app.update(Message::Select);

        assert_eq!(app.state().route, Route::Booking);
        let pending = app.state().pending_booking.clone().unwrap();
        assert_eq!(pending.nights, 3);
        assert_eq!(pending.status, BookingStatus::Pending);

        app.update(Message::Select);
        assert_eq!(app.state().route, Route::Payment);
        app.update(Message::NavigateRight);
        app.update(Message::NextField);
        app.update(Message::Select);

        assert!(matches!(app.state().screen, Screen::Confirmation(_)));
        assert!(app.state().pending_booking.is_none());
        let stored = app.storage().all_bookings().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, BookingStatus::Confirmed);
        assert_eq!(stored[0].id, pending.id);

        app.update(Message::Select);
        assert_eq!(app.state().route, Route::Dashboard);
        app.update(Message::CancelBooking);
        app.update(Message::CancelBooking);
        let stored = app.storage().all_bookings().unwrap();
        assert_eq!(stored[0].status, BookingStatus::Cancelled);
    }

    #[test]
    fn outside_click_closes_date_popover() {
        let mut app = app();
        draw(&mut app, 120, 40);
        app.update(Message::NextField);
        app.update(Message::Select);
        assert!(app.listeners.is_active());

        // The status line holds no click targets.
        app.update(Message::ClickAt { column: 0, row: 39 });
        assert!(!app.listeners.is_active());
        let Screen::Home(form) = &app.state().screen else {
            panic!("expected the search form");
        };
        assert!(!form.stay().is_open());
    }

    #[test]
    fn header_links_navigate() {
        let mut app = app();
        let buf = render(&mut app, 120, 40);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Beira Mar"));
        assert!(content.contains("Press ? for help"));

        let (column, row) = find_text(&buf, "Hotels 2").unwrap();
        app.update(Message::ClickAt { column, row });
        assert_eq!(app.state().route, Route::hotels());

        let (column, row) = find_text(&buf, "Sign in i").unwrap();
        app.update(Message::ClickAt { column, row });
        assert_eq!(app.state().route, Route::Login);
    }

    #[test]
    fn app_view_shows_too_small_message() {
        let mut app = app();
        let content = draw(&mut app, 60, 24);
        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn app_view_hides_header_in_compact_mode() {
        let mut app = app();
        let content = draw(&mut app, 100, MIN_HEIGHT);
        assert!(!app.header_visible);
        assert!(!content.contains("Press ? for help"));
    }

    #[test]
    fn help_overlay_renders_on_top() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        let content = draw(&mut app, 120, 40);
        assert!(content.contains("Switch language"));
    }

    #[tokio::test]
    async fn login_completes_after_delay() {
        let delays = DelayConfig {
            login_ms: 20,
            payment_ms: 20,
        };
        let mut app = App::new(config(delays), Storage::in_memory()).with_today(today());
        submit_login(&mut app, ADMIN_EMAIL, ADMIN_PASSWORD);
        assert!(app.state().is_busy());
        assert!(app.state().user.is_none());

        let msg = app.delay_rx.recv().await.unwrap();
        app.update(msg);
        assert_eq!(app.state().route, Route::Admin);
    }

    #[tokio::test]
    async fn leaving_screen_ignores_late_completion() {
        let delays = DelayConfig {
            login_ms: 20,
            payment_ms: 20,
        };
        let mut app = App::new(config(delays), Storage::in_memory()).with_today(today());
        submit_login(&mut app, ADMIN_EMAIL, ADMIN_PASSWORD);
        app.update(Message::OpenHome);

        let msg = app.delay_rx.recv().await.unwrap();
        app.update(msg);
        assert_eq!(app.state().route, Route::Home);
        assert!(app.state().user.is_none());
    }
}
