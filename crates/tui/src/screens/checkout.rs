//! Booking summary, payment and confirmation.

use beiramar_protocol::booking::{format_card_number, format_expiry, sanitize_cvv};
use beiramar_protocol::{Booking, Language, Message, PaymentDetails, PaymentMethod};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph, Widget},
};
use tracing::debug;

use super::{Action, Ctx, cycle, hit, money};
use crate::event::InputMode;
use crate::state::Route;
use crate::widgets::button::{render_button, render_choice};
use crate::widgets::text_field::{TextInput, render_text_field};

const SIDEBAR_WIDTH: u16 = 36;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<22}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn panel(title: &str) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

/// Price lines shared by the summary and payment screens.
fn price_lines(booking: &Booking, lang: Language) -> Vec<Line<'static>> {
    vec![
        row(
            &format!(
                "{} × {} {}",
                money(u64::from(booking.price_per_night)),
                booking.nights,
                lang.t("booking", "nights")
            ),
            money(booking.total_price),
        ),
        row(lang.t("booking", "taxes"), money(booking.taxes())),
        row(
            lang.t("booking", "service_fee"),
            lang.t("booking", "free").to_string(),
        ),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!("{:<22}", lang.t("booking", "total")),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                money(booking.grand_total()),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

/// Review of the pending booking before payment.
#[derive(Debug)]
pub struct BookingSummary {
    booking: Booking,
    button: Rect,
}

impl BookingSummary {
    /// Summarizes `booking`.
    #[must_use]
    pub fn new(booking: Booking) -> Self {
        Self {
            booking,
            button: Rect::default(),
        }
    }

    /// The booking under review.
    #[must_use]
    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        match msg {
            Message::Select => Some(Action::Navigate(Route::Payment)),
            Message::Escape => Some(Action::Navigate(Route::Detail {
                hotel_id: self.booking.hotel_id,
            })),
            _ => None,
        }
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        hit(&[(self.button, ())], column, row).map(|()| Action::Navigate(Route::Payment))
    }

    /// Draws the summary.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let b = &self.booking;
        let [title, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
        heading(lang.t("booking", "title")).render(title, buf);

        let [stay, _, side] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(SIDEBAR_WIDTH + 8),
        ])
        .areas(body);

        Paragraph::new(vec![
            Line::from(Span::styled(
                b.hotel_location.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                b.hotel_name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                b.room_name.clone(),
                Style::default().fg(Color::LightYellow),
            )),
            Line::default(),
            row(lang.t("booking", "check_in"), b.check_in.long_display()),
            row(lang.t("booking", "check_out"), b.check_out.long_display()),
            row(lang.t("booking", "guests"), b.guests.to_string()),
            row(lang.t("booking", "nights"), b.nights.to_string()),
        ])
        .block(panel(lang.t("booking", "your_stay")))
        .render(stay, buf);

        let [prices, button] =
            Layout::vertical([Constraint::Length(8), Constraint::Length(3)]).areas(side);
        Paragraph::new(price_lines(b, lang))
            .block(panel(lang.t("booking", "price_summary")))
            .render(prices, buf);
        render_button(lang.t("booking", "proceed"), true, true, button, buf);
        self.button = button;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayField {
    Method,
    CardName,
    CardNumber,
    Expiry,
    Cvv,
    Pay,
}

/// Payment form for the pending booking.
#[derive(Debug)]
pub struct PaymentForm {
    booking: Booking,
    focus: PayField,
    method: PaymentMethod,
    card_name: TextInput,
    card_number: TextInput,
    expiry: TextInput,
    cvv: TextInput,
    busy: bool,
    error: bool,
    areas: Vec<(Rect, PayField)>,
}

impl PaymentForm {
    /// A card payment form for `booking`.
    #[must_use]
    pub fn new(booking: Booking) -> Self {
        Self {
            booking,
            focus: PayField::Method,
            method: PaymentMethod::Card,
            card_name: TextInput::new(),
            card_number: TextInput::new().formatted(format_card_number),
            expiry: TextInput::new().formatted(format_expiry),
            cvv: TextInput::new().formatted(sanitize_cvv),
            busy: false,
            error: false,
            areas: Vec::new(),
        }
    }

    /// The chosen payment method.
    #[must_use]
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Returns `true` while the payment is processing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Re-enables the form after a failed payment.
    pub fn fail(&mut self) {
        self.busy = false;
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.input(self.focus).is_some() {
            InputMode::Text
        } else {
            InputMode::Normal
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        if self.busy {
            return None;
        }
        let order = self.order();
        match (self.focus, msg) {
            (_, Message::Escape) => return Some(Action::Navigate(Route::Booking)),
            (_, Message::NextField | Message::NavigateDown) => {
                self.focus = cycle(&order, self.focus, true);
            }
            (_, Message::PrevField | Message::NavigateUp) => {
                self.focus = cycle(&order, self.focus, false);
            }
            (PayField::Method, Message::NavigateLeft) => self.method = self.method.prev(),
            (PayField::Method, Message::NavigateRight | Message::Select) => {
                self.method = self.method.next();
            }
            (PayField::Pay | PayField::Cvv, Message::Select) => return self.pay(),
            (_, Message::Select) => self.focus = cycle(&order, self.focus, true),
            (field, msg) => {
                if let Some(input) = self.input_mut(field) {
                    input.edit(msg);
                }
            }
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        if self.busy {
            return None;
        }
        let field = hit(&self.areas, column, row)?;
        self.focus = field;
        match field {
            PayField::Method => {
                self.method = self.method.next();
                None
            }
            PayField::Pay => self.pay(),
            _ => None,
        }
    }

    /// Draws the form and the order summary.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let lang = ctx.lang;
        let [title, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
        heading(lang.t("payment", "title")).render(title, buf);

        let [form, _, side] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(SIDEBAR_WIDTH + 8),
        ])
        .areas(body);

        let [method, fields, error, button] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(if self.method == PaymentMethod::Card { 9 } else { 3 }),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(form);

        render_choice(
            lang.t("payment", "method"),
            lang.t("payment", self.method.label_key()),
            self.focus == PayField::Method,
            method,
            buf,
        );
        self.areas.push((method, PayField::Method));

        if self.method == PaymentMethod::Card {
            let [name, number, small] = Layout::vertical([Constraint::Length(3); 3]).areas(fields);
            let [expiry, cvv] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(small);
            let placed = [
                (PayField::CardName, "card_name", "", name),
                (PayField::CardNumber, "card_number", "0000 0000 0000 0000", number),
                (PayField::Expiry, "expiry", "MM/YY", expiry),
                (PayField::Cvv, "cvv", "123", cvv),
            ];
            for (field, key, placeholder, rect) in placed {
                if let Some(input) = self.input(field) {
                    render_text_field(
                        input,
                        lang.t("payment", key),
                        placeholder,
                        self.focus == field,
                        rect,
                        buf,
                    );
                }
                self.areas.push((rect, field));
            }
        } else {
            Paragraph::new(lang.t("payment", "alt_hint"))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .block(Block::new().padding(Padding::vertical(1)))
                .render(fields, buf);
        }

        if self.error {
            Paragraph::new(lang.t("payment", "error_required"))
                .style(Style::default().fg(Color::Red))
                .render(error, buf);
        }

        let label = if self.busy {
            lang.t("payment", "processing").to_string()
        } else {
            format!(
                "{} {}",
                lang.t("payment", "pay"),
                money(self.booking.grand_total())
            )
        };
        render_button(&label, self.focus == PayField::Pay, !self.busy, button, buf);
        self.areas.push((button, PayField::Pay));

        let [summary] = Layout::vertical([Constraint::Length(12)]).areas(side);
        let b = &self.booking;
        let mut lines = vec![
            Line::from(Span::styled(
                b.hotel_location.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                b.hotel_name.clone(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                b.room_name.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        lines.extend(price_lines(b, lang));
        Paragraph::new(lines)
            .block(panel(lang.t("payment", "order_summary")))
            .render(summary, buf);
    }

    fn order(&self) -> Vec<PayField> {
        if self.method == PaymentMethod::Card {
            vec![
                PayField::Method,
                PayField::CardName,
                PayField::CardNumber,
                PayField::Expiry,
                PayField::Cvv,
                PayField::Pay,
            ]
        } else {
            vec![PayField::Method, PayField::Pay]
        }
    }

    fn input(&self, field: PayField) -> Option<&TextInput> {
        match field {
            PayField::CardName => Some(&self.card_name),
            PayField::CardNumber => Some(&self.card_number),
            PayField::Expiry => Some(&self.expiry),
            PayField::Cvv => Some(&self.cvv),
            PayField::Method | PayField::Pay => None,
        }
    }

    fn input_mut(&mut self, field: PayField) -> Option<&mut TextInput> {
        match field {
            PayField::CardName => Some(&mut self.card_name),
            PayField::CardNumber => Some(&mut self.card_number),
            PayField::Expiry => Some(&mut self.expiry),
            PayField::Cvv => Some(&mut self.cvv),
            PayField::Method | PayField::Pay => None,
        }
    }

    fn pay(&mut self) -> Option<Action> {
        if self.method == PaymentMethod::Card {
            let missing = [&self.card_name, &self.card_number, &self.expiry, &self.cvv]
                .iter()
                .any(|input| input.value().trim().is_empty());
            if missing {
                self.error = true;
                return None;
            }
        }
        debug!(method = ?self.method, booking = %self.booking.id, "payment submitted");
        self.error = false;
        self.busy = true;
        Some(Action::Pay(PaymentDetails::new(
            self.method,
            self.card_number.value(),
        )))
    }
}

/// Receipt for a confirmed booking.
#[derive(Debug)]
pub struct Confirmation {
    booking: Booking,
    button: Rect,
}

impl Confirmation {
    /// Shows the receipt of `booking`.
    #[must_use]
    pub fn new(booking: Booking) -> Self {
        Self {
            booking,
            button: Rect::default(),
        }
    }

    /// The confirmed booking.
    #[must_use]
    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        match msg {
            Message::Select => Some(Action::Navigate(Route::Dashboard)),
            Message::Escape => Some(Action::Navigate(Route::Home)),
            _ => None,
        }
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        hit(&[(self.button, ())], column, row).map(|()| Action::Navigate(Route::Dashboard))
    }

    /// Draws the receipt.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let b = &self.booking;
        let [column] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        let [card, button] = Layout::vertical([Constraint::Length(12), Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(column);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "✓",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            heading(lang.t("payment", "success_title")).alignment(Alignment::Center),
            Line::default(),
            row(lang.t("payment", "success_ref"), b.id.clone()),
            row(lang.t("payment", "hotel"), b.hotel_name.clone()),
            row(lang.t("payment", "room"), b.room_name.clone()),
            row(lang.t("booking", "check_in"), b.check_in.short_display()),
            row(lang.t("booking", "check_out"), b.check_out.short_display()),
            row(lang.t("payment", "total_paid"), money(b.grand_total())),
        ])
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
        .render(card, buf);

        render_button(lang.t("payment", "view_bookings"), true, true, button, buf);
        self.button = button;
    }
}
