//! Hotel page with the booking sidebar.

use beiramar_protocol::hotel::{DEFAULT_GUESTS, next_guest_option, prev_guest_option};
use beiramar_protocol::{
    Booking, CalendarDate, Hotel, Language, Message, ProtocolError, Room, Stay,
};
use chrono::Utc;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};
use tracing::debug;

use super::stay::{StayDates, StayField};
use super::{Action, Ctx, cycle, hit, money};
use crate::event::InputMode;
use crate::state::Route;
use crate::widgets::button::{render_button, render_choice};

const SIDEBAR_WIDTH: u16 = 36;
const ROOM_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Room(usize),
    CheckIn,
    CheckOut,
    Guests,
    Continue,
}

/// State of a hotel page.
#[derive(Debug)]
pub struct DetailForm {
    hotel: Hotel,
    focus: Field,
    selected_room: Option<u32>,
    stay: StayDates,
    guests: u8,
    /// Translation key of the last validation error.
    error: Option<&'static str>,
    areas: Vec<(Rect, Field)>,
}

impl DetailForm {
    /// The page of `hotel`, nothing selected.
    #[must_use]
    pub fn new(hotel: Hotel, today: CalendarDate) -> Self {
        Self {
            hotel,
            focus: Field::Room(0),
            selected_room: None,
            stay: StayDates::new(today),
            guests: DEFAULT_GUESTS,
            error: None,
            areas: Vec::new(),
        }
    }

    /// The displayed hotel.
    #[must_use]
    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    /// The room chosen for booking.
    #[must_use]
    pub fn selected_room(&self) -> Option<&Room> {
        let id = self.selected_room?;
        self.hotel.room(id).ok()
    }

    /// The stay dates and their pickers.
    #[must_use]
    pub fn stay(&self) -> &StayDates {
        &self.stay
    }

    /// Translation key of the validation error shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.stay.is_open() {
            InputMode::Calendar
        } else {
            InputMode::Normal
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message, ctx: &Ctx<'_>) -> Option<Action> {
        if self.stay.handle_message(msg, ctx) {
            return None;
        }
        let order = self.order();

        match (self.focus, msg) {
            (_, Message::NextField | Message::NavigateDown) => {
                self.focus = cycle(&order, self.focus, true);
            }
            (_, Message::PrevField | Message::NavigateUp) => {
                self.focus = cycle(&order, self.focus, false);
            }
            (_, Message::Escape) => return Some(Action::Navigate(Route::hotels())),

            (Field::Room(index), Message::Select) => return self.choose_room(index, ctx),
            (Field::CheckIn, Message::Select) => self.stay.toggle(StayField::CheckIn, ctx),
            (Field::CheckOut, Message::Select) => self.stay.toggle(StayField::CheckOut, ctx),
            (Field::Guests, Message::NavigateLeft) => self.guests = prev_guest_option(self.guests),
            (Field::Guests, Message::NavigateRight | Message::Select) => {
                self.guests = next_guest_option(self.guests);
            }
            (Field::Continue, Message::Select) => return self.submit(ctx),
            _ => {}
        }
        None
    }

    /// Closes the calendar when a press lands outside it.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        self.stay.pointer_down(column, row);
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16, ctx: &Ctx<'_>) -> Option<Action> {
        if self.stay.click(column, row, ctx) {
            return None;
        }
        let field = hit(&self.areas, column, row)?;
        self.focus = field;
        match field {
            Field::Room(index) => self.choose_room(index, ctx),
            Field::CheckIn => {
                self.stay.toggle(StayField::CheckIn, ctx);
                None
            }
            Field::CheckOut => {
                self.stay.toggle(StayField::CheckOut, ctx);
                None
            }
            Field::Guests => {
                self.guests = next_guest_option(self.guests);
                None
            }
            Field::Continue => self.submit(ctx),
        }
    }

    /// Draws the page.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let [main, _, sidebar] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(SIDEBAR_WIDTH),
        ])
        .areas(area);
        self.render_main(ctx.lang, main, buf);
        self.render_sidebar(ctx, sidebar, buf);
    }

    /// Draws the open calendar.
    pub fn render_overlay(&self, ctx: &Ctx<'_>, buf: &mut Buffer) {
        self.stay.render_overlay(ctx, buf);
    }

    fn order(&self) -> Vec<Field> {
        (0..self.hotel.rooms.len())
            .map(Field::Room)
            .chain([
                Field::CheckIn,
                Field::CheckOut,
                Field::Guests,
                Field::Continue,
            ])
            .collect()
    }

    fn choose_room(&mut self, index: usize, ctx: &Ctx<'_>) -> Option<Action> {
        if ctx.user.is_none() {
            return Some(Action::Navigate(Route::Login));
        }
        let room = self.hotel.rooms.get(index)?;
        debug!(hotel = self.hotel.id, room = room.id, "room selected");
        self.selected_room = Some(room.id);
        self.error = None;
        self.focus = Field::CheckIn;
        None
    }

    fn submit(&mut self, ctx: &Ctx<'_>) -> Option<Action> {
        let room = self.selected_room()?.clone();
        let Some(user) = ctx.user else {
            return Some(Action::Navigate(Route::Login));
        };
        match Stay::from_strings(self.stay.check_in(), self.stay.check_out()) {
            Ok(stay) => {
                self.error = None;
                let booking =
                    Booking::pending(&self.hotel, &room, stay, self.guests, user.id, Utc::now());
                Some(Action::StartBooking(Box::new(booking)))
            }
            Err(err) => {
                debug!(%err, "stay rejected");
                self.error = Some(match err {
                    ProtocolError::CheckOutNotAfterCheckIn => "error_order",
                    _ => "error_dates",
                });
                None
            }
        }
    }

    fn render_main(&mut self, lang: Language, area: Rect, buf: &mut Buffer) {
        let hotel = &self.hotel;
        let [header, description, amenities, rooms_title, rooms] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                hotel.location.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                hotel.name.clone(),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(hotel.stars(), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        " {:.1} ({} {})",
                        hotel.rating,
                        hotel.review_count,
                        lang.t("hotels", "reviews")
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ])
        .render(header, buf);

        Paragraph::new(hotel.description.clone())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(description, buf);

        Paragraph::new(vec![
            Line::from(Span::styled(
                lang.t("detail", "amenities"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                hotel
                    .amenities
                    .iter()
                    .map(|a| format!("✓ {a}"))
                    .collect::<Vec<_>>()
                    .join("  "),
                Style::default().fg(Color::Gray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .render(amenities, buf);

        Line::from(Span::styled(
            lang.t("detail", "available_rooms"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .render(rooms_title, buf);

        let mut y = rooms.y;
        for (index, room) in hotel.rooms.iter().enumerate() {
            if y + ROOM_HEIGHT > rooms.bottom() {
                break;
            }
            let card = Rect {
                x: rooms.x,
                y,
                width: rooms.width,
                height: ROOM_HEIGHT,
            };
            let selected = self.selected_room == Some(room.id);
            let focused = self.focus == Field::Room(index);
            let border = match (focused, selected) {
                (true, _) => Color::Yellow,
                (false, true) => Color::LightYellow,
                (false, false) => Color::DarkGray,
            };
            let marker = if selected { "● " } else { "○ " };
            Paragraph::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::LightYellow)),
                Span::styled(
                    room.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} {}", lang.t("detail", "up_to"), room.capacity),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!(
                        "  {}/{}",
                        money(u64::from(room.price)),
                        lang.t("detail", "night")
                    ),
                    Style::default().fg(Color::LightYellow),
                ),
            ]))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            )
            .render(card, buf);
            self.areas.push((card, Field::Room(index)));
            y += ROOM_HEIGHT;
        }
    }

    fn render_sidebar(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", lang.t("detail", "book_title")),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let [price, check_in, check_out, guests, summary, button, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(inner);

        if let Some(room) = self.selected_room() {
            Line::from(vec![
                Span::styled(
                    money(u64::from(room.price)),
                    Style::default()
                        .fg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" /{}  {}", lang.t("detail", "night"), room.name),
                    Style::default().fg(Color::Gray),
                ),
            ])
            .render(price, buf);
        }

        self.stay.render_trigger(
            StayField::CheckIn,
            lang.t("detail", "checkin"),
            self.focus == Field::CheckIn,
            ctx,
            check_in,
            buf,
        );
        self.stay.render_trigger(
            StayField::CheckOut,
            lang.t("detail", "checkout"),
            self.focus == Field::CheckOut,
            ctx,
            check_out,
            buf,
        );
        render_choice(
            lang.t("detail", "guests_label"),
            &self.guests.to_string(),
            self.focus == Field::Guests,
            guests,
            buf,
        );
        self.areas.push((check_in, Field::CheckIn));
        self.areas.push((check_out, Field::CheckOut));
        self.areas.push((guests, Field::Guests));

        let stay = Stay::from_strings(self.stay.check_in(), self.stay.check_out());
        if let (Some(room), Ok(stay)) = (self.selected_room(), stay) {
            let nights = stay.nights();
            let total = u64::from(room.price) * u64::from(nights);
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!(
                        "{} × {} {}",
                        money(u64::from(room.price)),
                        nights,
                        lang.t("detail", "nights_label")
                    ),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("{} ", lang.t("detail", "total_label")),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        money(total),
                        Style::default()
                            .fg(Color::LightYellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            ])
            .render(summary, buf);
        }

        let has_room = self.selected_room.is_some();
        let label = if has_room {
            lang.t("detail", "continue")
        } else {
            lang.t("detail", "select_first")
        };
        render_button(label, self.focus == Field::Continue, has_room, button, buf);
        self.areas.push((button, Field::Continue));

        let note = match (self.error, ctx.user) {
            (Some(key), _) => Some((lang.t("detail", key), Color::Red)),
            (None, None) => Some((lang.t("detail", "sign_in_hint"), Color::Gray)),
            (None, Some(_)) => None,
        };
        if let Some((text, color)) = note {
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .render(hint, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::PointerListeners;
    use crate::test_utils::buffer_to_string;
    use beiramar_protocol::{BookingStatus, Role, User, catalog};

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 110,
        height: 32,
    };

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2025, 6, 10).unwrap()
    }

    fn guest() -> User {
        User {
            id: 42,
            name: "Rita".to_string(),
            email: "rita@example.com".to_string(),
            role: Role::User,
        }
    }

    fn ctx<'a>(listeners: &'a PointerListeners, user: Option<&'a User>) -> Ctx<'a> {
        Ctx {
            lang: Language::En,
            user,
            listeners,
            viewport: VIEWPORT,
            today: today(),
        }
    }

    fn rendered(ctx: &Ctx<'_>) -> (DetailForm, Buffer) {
        let mut form = DetailForm::new(catalog::find(1).unwrap(), today());
        let mut buf = Buffer::empty(VIEWPORT);
        form.render(ctx, VIEWPORT, &mut buf);
        (form, buf)
    }

    #[test]
    fn choosing_room_without_user_goes_to_login() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners, None);
        let (mut form, _) = rendered(&ctx);
        assert_eq!(
            form.update(&Message::Select, &ctx),
            Some(Action::Navigate(Route::Login))
        );
        assert!(form.selected_room().is_none());
    }

    #[test]
    fn continue_is_inert_without_room() {
        let listeners = PointerListeners::default();
        let user = guest();
        let ctx = ctx(&listeners, Some(&user));
        let (mut form, _) = rendered(&ctx);
        form.focus = Field::Continue;
        assert_eq!(form.update(&Message::Select, &ctx), None);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn continue_requires_both_dates() {
        let listeners = PointerListeners::default();
        let user = guest();
        let ctx = ctx(&listeners, Some(&user));
        let (mut form, _) = rendered(&ctx);
        form.update(&Message::Select, &ctx);
        assert!(form.selected_room().is_some());

        form.focus = Field::Continue;
        assert_eq!(form.update(&Message::Select, &ctx), None);
        assert_eq!(form.error(), Some("error_dates"));
    }

    #[test]
    fn continue_rejects_inverted_stay() {
        let listeners = PointerListeners::default();
        let user = guest();
        let ctx = ctx(&listeners, Some(&user));
        let (mut form, _) = rendered(&ctx);
        form.update(&Message::Select, &ctx);
        form.stay.set(StayField::CheckIn, "2025-06-14");
        form.stay.set(StayField::CheckOut, "2025-06-12");

        form.focus = Field::Continue;
        assert_eq!(form.update(&Message::Select, &ctx), None);
        assert_eq!(form.error(), Some("error_order"));
    }

    #[test]
    fn continue_starts_pending_booking() {
        let listeners = PointerListeners::default();
        let user = guest();
        let ctx = ctx(&listeners, Some(&user));
        let (mut form, _) = rendered(&ctx);
        form.update(&Message::Select, &ctx);

        // Pick both dates with the keyboard.
        form.update(&Message::Select, &ctx);
        form.update(&Message::CalendarMove { days: 2 }, &ctx);
        form.update(&Message::Select, &ctx);
        form.update(&Message::NextField, &ctx);
        form.update(&Message::Select, &ctx);
        form.update(&Message::CalendarMove { days: 5 }, &ctx);
        form.update(&Message::Select, &ctx);
        assert_eq!(form.stay().check_in(), "2025-06-12");
        assert_eq!(form.stay().check_out(), "2025-06-15");

        form.focus = Field::Continue;
        let Some(Action::StartBooking(booking)) = form.update(&Message::Select, &ctx) else {
            panic!("expected a pending booking");
        };
        let room = &form.hotel().rooms[0];
        assert_eq!(booking.hotel_id, 1);
        assert_eq!(booking.room_id, room.id);
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.total_price, u64::from(room.price) * 3);
        assert_eq!(booking.user_id, 42);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn escape_returns_to_list() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners, None);
        let (mut form, _) = rendered(&ctx);
        assert_eq!(
            form.update(&Message::Escape, &ctx),
            Some(Action::Navigate(Route::hotels()))
        );
    }

    #[test]
    fn renders_hotel_and_sign_in_hint() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners, None);
        let (form, buf) = rendered(&ctx);
        let content = buffer_to_string(&buf);
        assert!(content.contains(&form.hotel().name));
        assert!(content.contains("Available rooms"));
        assert!(content.contains("Select a room first"));
        assert!(content.contains("Sign in to book this hotel"));
    }
}
