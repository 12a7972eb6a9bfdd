//! The signed-in user's reservations.

use beiramar_protocol::{
    Booking, BookingId, BookingStats, BookingStatus, Language, Message, StatusFilter, User,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use tracing::debug;

use super::{Action, Ctx, hit, money};

pub(crate) const ROW_HEIGHT: u16 = 4;
const CANCEL_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Filter(StatusFilter),
    Row(usize),
    Cancel(usize),
}

fn status_color(status: BookingStatus) -> Color {
    match status {
        BookingStatus::Confirmed => Color::Green,
        BookingStatus::Pending => Color::Yellow,
        BookingStatus::Cancelled => Color::Red,
    }
}

/// Draws the filter tabs and returns the area of each tab.
pub(crate) fn render_filter_tabs(
    current: StatusFilter,
    lang: Language,
    area: Rect,
    buf: &mut Buffer,
) -> Vec<(Rect, StatusFilter)> {
    let mut x = area.x;
    let mut tabs = Vec::with_capacity(StatusFilter::ALL.len());
    for filter in StatusFilter::ALL {
        let label = format!(" {} ", lang.t("dashboard", filter.label_key()));
        let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        if x + width > area.right() {
            break;
        }
        let style = if filter == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let rect = Rect::new(x, area.y, width, 1);
        Line::from(Span::styled(label, style)).render(rect, buf);
        tabs.push((rect, filter));
        x += width + 1;
    }
    tabs
}

/// Draws one booking row and returns the area of its cancel button, if shown.
pub(crate) fn render_booking_row(
    booking: &Booking,
    lang: Language,
    selected: bool,
    cancel_label: Option<&str>,
    owner: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) -> Option<Rect> {
    let cancelled = booking.status == BookingStatus::Cancelled;
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if selected {
            Color::Yellow
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    block.render(area, buf);

    let show_cancel = !cancelled && cancel_label.is_some();
    let [info, action] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(if show_cancel { CANCEL_WIDTH } else { 0 }),
    ])
    .areas(inner);

    let name_style = if cancelled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    let mut first = vec![
        Span::styled(
            format!(" {} ", lang.t("dashboard", booking.status.label_key())),
            Style::default()
                .fg(Color::Black)
                .bg(status_color(booking.status)),
        ),
        Span::raw(" "),
        Span::styled(booking.hotel_name.clone(), name_style),
        Span::styled(
            format!(" · {}", booking.room_name),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(owner) = owner {
        first.push(Span::styled(
            format!(" · {owner}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    let second = Line::from(vec![
        Span::styled(
            format!(
                "{} → {} · {} {} · {} ",
                booking.check_in.short_display(),
                booking.check_out.short_display(),
                booking.nights,
                lang.t("booking", "nights"),
                booking.guests,
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            money(booking.grand_total()),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} {}", lang.t("dashboard", "ref"), booking.id),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    Paragraph::new(vec![Line::from(first), second]).render(info, buf);

    let label = cancel_label.filter(|_| show_cancel)?;
    Paragraph::new(Line::from(Span::styled(
        format!(" {label} "),
        Style::default().fg(Color::White).bg(Color::Red),
    )))
    .alignment(Alignment::Right)
    .render(action, buf);
    Some(action)
}

/// Figures shown above a booking list.
pub(crate) fn render_stat(value: String, label: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .render(area, buf);
}

/// The dashboard of a regular user.
#[derive(Debug)]
pub struct DashboardScreen {
    user_name: String,
    bookings: Vec<Booking>,
    filter: StatusFilter,
    selected: usize,
    /// Booking awaiting a second cancel press.
    confirming: Option<BookingId>,
    areas: Vec<(Rect, Target)>,
}

impl DashboardScreen {
    /// The dashboard of `user` with their stored bookings.
    #[must_use]
    pub fn new(user: &User, bookings: Vec<Booking>) -> Self {
        Self {
            user_name: user.name.clone(),
            bookings,
            filter: StatusFilter::All,
            selected: 0,
            confirming: None,
            areas: Vec::new(),
        }
    }

    /// Replaces the bookings after a change, keeping the filter.
    pub fn set_bookings(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
        self.confirming = None;
        self.selected = self.selected.min(self.visible().len().saturating_sub(1));
    }

    /// The active status filter.
    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// The bookings passing the filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| self.filter.matches(b))
            .collect()
    }

    /// The booking awaiting cancel confirmation.
    #[must_use]
    pub fn confirming(&self) -> Option<&str> {
        self.confirming.as_deref()
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        match msg {
            Message::CycleFilter | Message::NavigateRight => self.set_filter(self.filter.next()),
            Message::NavigateDown => {
                let len = self.visible().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                self.confirming = None;
            }
            Message::NavigateUp => {
                self.selected = self.selected.saturating_sub(1);
                self.confirming = None;
            }
            Message::CancelBooking | Message::Select => return self.request_cancel(self.selected),
            Message::Escape => self.confirming = None,
            _ => {}
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        match hit(&self.areas, column, row)? {
            Target::Filter(filter) => self.set_filter(filter),
            Target::Row(index) => {
                self.selected = index;
                self.confirming = None;
            }
            Target::Cancel(index) => {
                self.selected = index;
                return self.request_cancel(index);
            }
        }
        None
    }

    /// Draws the dashboard.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let lang = ctx.lang;
        let [title, stats, _, header, list] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        let first_name = self.user_name.split(' ').next().unwrap_or_default();
        Line::from(Span::styled(
            format!("{}, {first_name}", lang.t("dashboard", "welcome")),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .render(title, buf);

        let figures = BookingStats::from_bookings(&self.bookings);
        let [total, confirmed, spent] = Layout::horizontal([Constraint::Fill(1); 3])
            .spacing(1)
            .areas(stats);
        render_stat(
            figures.total.to_string(),
            lang.t("dashboard", "total_bookings"),
            total,
            buf,
        );
        render_stat(
            figures.confirmed.to_string(),
            lang.t("dashboard", "confirmed"),
            confirmed,
            buf,
        );
        render_stat(
            money(figures.revenue),
            lang.t("dashboard", "total_spent"),
            spent,
            buf,
        );

        let [heading, tabs] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(header);
        Line::from(Span::styled(
            lang.t("dashboard", "my_reservations"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .render(heading, buf);
        let tab_areas = render_filter_tabs(self.filter, lang, tabs, buf);
        self.areas.extend(
            tab_areas
                .into_iter()
                .map(|(rect, filter)| (rect, Target::Filter(filter))),
        );

        let visible: Vec<Booking> = self.visible().into_iter().cloned().collect();
        if visible.is_empty() {
            Paragraph::new(lang.t("dashboard", "empty_title"))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(list, buf);
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
            let label = if self.confirming.as_deref() == Some(booking.id.as_str()) {
                lang.t("dashboard", "cancel_confirm")
            } else {
                lang.t("dashboard", "cancel")
            };
            let cancel = render_booking_row(
                booking,
                lang,
                index == self.selected,
                Some(label),
                None,
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

    fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.selected = 0;
        self.confirming = None;
    }

    fn request_cancel(&mut self, index: usize) -> Option<Action> {
        let booking = self.visible().get(index).copied()?;
        if booking.status == BookingStatus::Cancelled {
            return None;
        }
        let id = booking.id.clone();
        if self.confirming.as_deref() == Some(id.as_str()) {
            debug!(booking = %id, "cancellation confirmed");
            self.confirming = None;
            return Some(Action::Cancel(id));
        }
        self.confirming = Some(id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::PointerListeners;
    use crate::test_utils::buffer_to_string;
    use beiramar_protocol::{CalendarDate, PaymentDetails, PaymentMethod, Role, Stay, catalog};
    use chrono::{TimeZone, Utc};

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 28,
    };

    fn user() -> User {
        User {
            id: 7,
            name: "Rita Sousa".to_string(),
            email: "rita@example.com".to_string(),
            role: Role::User,
        }
    }

    fn booking(minute: u32, status: BookingStatus) -> Booking {
        let hotel = catalog::find(2).unwrap();
        let room = hotel.rooms[0].clone();
        let stay = Stay::from_strings("2025-07-01", "2025-07-03").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap();
        let mut booking = Booking::pending(&hotel, &room, stay, 2, 7, now)
            .confirmed(PaymentDetails::new(PaymentMethod::Card, "4242"));
        booking.status = status;
        booking
    }

    fn screen() -> DashboardScreen {
        DashboardScreen::new(
            &user(),
            vec![
                booking(0, BookingStatus::Confirmed),
                booking(1, BookingStatus::Cancelled),
                booking(2, BookingStatus::Confirmed),
            ],
        )
    }

    fn render(screen: &mut DashboardScreen) -> String {
        let listeners = PointerListeners::default();
        let ctx = Ctx {
            lang: Language::En,
            user: None,
            listeners: &listeners,
            viewport: VIEWPORT,
            today: CalendarDate::from_ymd(2025, 6, 10).unwrap(),
        };
        let mut buf = Buffer::empty(VIEWPORT);
        screen.render(&ctx, VIEWPORT, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn cancel_needs_second_press() {
        let mut screen = screen();
        assert_eq!(screen.update(&Message::CancelBooking), None);
        assert_eq!(screen.confirming(), Some(screen.bookings[0].id.as_str()));

        let id = screen.bookings[0].id.clone();
        assert_eq!(
            screen.update(&Message::CancelBooking),
            Some(Action::Cancel(id))
        );
        assert_eq!(screen.confirming(), None);
    }

    #[test]
    fn moving_selection_drops_confirmation() {
        let mut screen = screen();
        screen.update(&Message::CancelBooking);
        screen.update(&Message::NavigateDown);
        assert_eq!(screen.confirming(), None);
    }

    #[test]
    fn cancelled_bookings_cannot_be_cancelled() {
        let mut screen = screen();
        screen.update(&Message::NavigateDown);
        assert_eq!(screen.update(&Message::CancelBooking), None);
        assert_eq!(screen.confirming(), None);
    }

    #[test]
    fn filter_cycles_and_resets_selection() {
        let mut screen = screen();
        screen.update(&Message::NavigateDown);
        screen.update(&Message::CycleFilter);
        assert_eq!(
            screen.filter(),
            StatusFilter::Only(BookingStatus::Confirmed)
        );
        assert_eq!(screen.visible().len(), 2);

        screen.update(&Message::CycleFilter);
        screen.update(&Message::CycleFilter);
        assert_eq!(screen.visible().len(), 1);
        screen.update(&Message::CycleFilter);
        assert_eq!(screen.filter(), StatusFilter::All);
    }

    #[test]
    fn renders_stats_and_rows() {
        let mut screen = screen();
        let text = render(&mut screen);
        let spent = money(screen.bookings[0].grand_total() * 2);
        assert!(text.contains("Welcome, Rita"));
        assert!(text.contains(&spent));
        assert!(text.contains("Cancel booking"));
        assert!(text.contains(&screen.bookings[1].hotel_name));
    }

    #[test]
    fn clicking_cancel_asks_then_cancels() {
        let mut screen = screen();
        render(&mut screen);
        let (button, _) = screen
            .areas
            .iter()
            .find(|(_, target)| *target == Target::Cancel(0))
            .copied()
            .unwrap();

        assert_eq!(screen.click(button.x + 2, button.y), None);
        let text = render(&mut screen);
        assert!(text.contains("Press again to cancel"));

        let id = screen.bookings[0].id.clone();
        assert_eq!(
            screen.click(button.x + 2, button.y),
            Some(Action::Cancel(id))
        );
    }

    #[test]
    fn empty_filter_shows_message() {
        let mut screen = DashboardScreen::new(&user(), Vec::new());
        let text = render(&mut screen);
        assert!(text.contains("No reservations yet"));
    }
}
