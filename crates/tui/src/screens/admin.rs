//! Admin overview: every booking, the users and the catalog.

use beiramar_protocol::{
    Booking, BookingStats, BookingStatus, Hotel, Message, StatusFilter, UserId, UserRecord,
    catalog,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::dashboard::{ROW_HEIGHT, render_booking_row, render_filter_tabs, render_stat};
use super::{Action, Ctx, hit, money};

/// Tabs of the overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    /// All bookings with cancellation.
    #[default]
    Bookings,
    /// Registered users with their booking counts.
    Users,
    /// The hotel catalog.
    Hotels,
}

impl AdminTab {
    const ALL: [Self; 3] = [Self::Bookings, Self::Users, Self::Hotels];

    fn label_key(self) -> &'static str {
        match self {
            Self::Bookings => "all_bookings",
            Self::Users => "registered_users",
            Self::Hotels => "hotels",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Bookings => Self::Users,
            Self::Users => Self::Hotels,
            Self::Hotels => Self::Bookings,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Bookings => Self::Hotels,
            Self::Users => Self::Bookings,
            Self::Hotels => Self::Users,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Tab(AdminTab),
    Filter(StatusFilter),
    Row(usize),
    Cancel(usize),
}

/// State of the admin overview.
#[derive(Debug)]
pub struct AdminScreen {
    bookings: Vec<Booking>,
    users: Vec<UserRecord>,
    hotels: Vec<Hotel>,
    tab: AdminTab,
    filter: StatusFilter,
    selected: usize,
    areas: Vec<(Rect, Target)>,
}

impl AdminScreen {
    /// The overview of all stored bookings and users.
    #[must_use]
    pub fn new(bookings: Vec<Booking>, users: Vec<UserRecord>) -> Self {
        Self {
            bookings,
            users,
            hotels: catalog::hotels(),
            tab: AdminTab::Bookings,
            filter: StatusFilter::All,
            selected: 0,
            areas: Vec::new(),
        }
    }

    /// Replaces the bookings after a change, keeping tab and filter.
    pub fn set_bookings(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    /// The active tab.
    #[must_use]
    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    /// The bookings passing the filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| self.filter.matches(b))
            .collect()
    }

    /// Number of bookings made by a user.
    #[must_use]
    pub fn booking_count(&self, user_id: UserId) -> usize {
        self.bookings.iter().filter(|b| b.user_id == user_id).count()
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        match msg {
            Message::NextField | Message::NavigateRight => self.set_tab(self.tab.next()),
            Message::PrevField | Message::NavigateLeft => self.set_tab(self.tab.prev()),
            Message::CycleFilter if self.tab == AdminTab::Bookings => {
                self.filter = self.filter.next();
                self.selected = 0;
            }
            Message::NavigateDown => {
                if self.selected + 1 < self.row_count() {
                    self.selected += 1;
                }
            }
            Message::NavigateUp => self.selected = self.selected.saturating_sub(1),
            Message::CancelBooking if self.tab == AdminTab::Bookings => {
                return self.cancel(self.selected);
            }
            _ => {}
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        match hit(&self.areas, column, row)? {
            Target::Tab(tab) => self.set_tab(tab),
            Target::Filter(filter) => {
                self.filter = filter;
                self.selected = 0;
            }
            Target::Row(index) => self.selected = index,
            Target::Cancel(index) => return self.cancel(index),
        }
        None
    }

    /// Draws the overview.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let lang = ctx.lang;
        let [title, stats, tabs, body] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        Line::from(Span::styled(
            lang.t("admin", "title"),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .render(title, buf);

        let figures = BookingStats::from_bookings(&self.bookings);
        let cells: [Rect; 6] = Layout::horizontal([Constraint::Fill(1); 6])
            .spacing(1)
            .areas(stats);
        let values = [
            (figures.total.to_string(), "total_bookings"),
            (figures.confirmed.to_string(), "confirmed"),
            (figures.cancelled.to_string(), "cancelled"),
            (money(figures.revenue), "revenue"),
            (self.hotels.len().to_string(), "hotels"),
            (self.users.len().to_string(), "registered_users"),
        ];
        for ((value, key), cell) in values.into_iter().zip(cells) {
            render_stat(value, lang.t("admin", key), cell, buf);
        }

        let mut x = tabs.x;
        for tab in AdminTab::ALL {
            let label = format!(" {} ", lang.t("admin", tab.label_key()));
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            if x + width > tabs.right() {
                break;
            }
            let style = if tab == self.tab {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let rect = Rect::new(x, tabs.y, width, 1);
            Line::from(Span::styled(label, style)).render(rect, buf);
            self.areas.push((rect, Target::Tab(tab)));
            x += width + 2;
        }

        match self.tab {
            AdminTab::Bookings => self.render_bookings(ctx, body, buf),
            AdminTab::Users => self.render_users(ctx, body, buf),
            AdminTab::Hotels => self.render_hotels(ctx, body, buf),
        }
    }

    fn set_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
        self.selected = 0;
    }

    fn row_count(&self) -> usize {
        match self.tab {
            AdminTab::Bookings => self.visible().len(),
            AdminTab::Users => self.users.len(),
            AdminTab::Hotels => self.hotels.len(),
        }
    }

    fn cancel(&mut self, index: usize) -> Option<Action> {
        let booking = self.visible().get(index).copied()?;
        if booking.status == BookingStatus::Cancelled {
            return None;
        }
        Some(Action::Cancel(booking.id.clone()))
    }

    fn render_bookings(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let [tabs, list] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
        let tab_areas = render_filter_tabs(self.filter, lang, tabs, buf);
        self.areas.extend(
            tab_areas
                .into_iter()
                .map(|(rect, filter)| (rect, Target::Filter(filter))),
        );

        let visible: Vec<Booking> = self.visible().into_iter().cloned().collect();
        if visible.is_empty() {
            render_empty(lang.t("admin", "no_bookings"), list, buf);
            return;
        }
        let per_page = usize::from((list.height / ROW_HEIGHT).max(1));
        let first = self.selected.saturating_sub(per_page - 1);
        let mut y = list.y;
        for (index, booking) in visible.iter().enumerate().skip(first) {
            if y + ROW_HEIGHT > list.bottom() {
                break;
            }
            let rect = Rect::new(list.x, y, list.width, ROW_HEIGHT);
            let owner = format!("{} {}", lang.t("admin", "user"), booking.user_id);
            let cancel = render_booking_row(
                booking,
                lang,
                index == self.selected,
                Some(lang.t("dashboard", "cancel")),
                Some(&owner),
                rect,
                buf,
            );
            if let Some(cancel) = cancel {
                self.areas.push((cancel, Target::Cancel(index)));
            }
            self.areas.push((rect, Target::Row(index)));
            y += ROW_HEIGHT;
        }
    }

    fn render_users(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        if self.users.is_empty() {
            render_empty(lang.t("admin", "no_users"), area, buf);
            return;
        }
        let per_page = usize::from(area.height.max(1));
        let first = self.selected.saturating_sub(per_page - 1);
        for (offset, (index, user)) in self.users.iter().enumerate().skip(first).enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            if offset >= area.height {
                break;
            }
            let rect = Rect::new(area.x, area.y + offset, area.width, 1);
            let marker = if index == self.selected { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{:<24}", user.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<32}", user.email),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!(
                        "{} {}",
                        self.booking_count(user.id),
                        lang.t("admin", "bookings")
                    ),
                    Style::default().fg(Color::LightYellow),
                ),
            ])
            .render(rect, buf);
            self.areas.push((rect, Target::Row(index)));
        }
    }

    fn render_hotels(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let per_page = usize::from((area.height / 2).max(1));
        let first = self.selected.saturating_sub(per_page - 1);
        let mut y = area.y;
        for (index, hotel) in self.hotels.iter().enumerate().skip(first) {
            if y + 2 > area.bottom() {
                break;
            }
            let rect = Rect::new(area.x, y, area.width, 2);
            let marker = if index == self.selected { "▸ " } else { "  " };
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    Span::styled(
                        hotel.name.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" · {}", hotel.location),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  ★ {:.1} · {} {} · {} {}/{}",
                        hotel.rating,
                        hotel.rooms.len(),
                        lang.t("admin", "rooms"),
                        lang.t("hotels", "from"),
                        money(u64::from(hotel.price_from)),
                        lang.t("hotels", "night"),
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .render(rect, buf);
            self.areas.push((rect, Target::Row(index)));
            y += 2;
        }
    }
}

fn render_empty(text: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(area, buf);
}
