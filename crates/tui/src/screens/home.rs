//! Search form of the home screen.
//!
//! Destination with suggestions, a check-in / check-out pair, a guest count
//! and a search button, above the first few catalog hotels.

use beiramar_protocol::hotel::{DEFAULT_GUESTS, next_guest_option, prev_guest_option, suggestions};
use beiramar_protocol::{CalendarDate, Hotel, Language, Message, catalog};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};
use tracing::debug;

use super::stay::{StayDates, StayField};
use super::{Action, Ctx, cycle, hit, money};
use crate::event::InputMode;
use crate::listener::ListenerGuard;
use crate::state::Route;
use crate::widgets::button::{render_button, render_choice};
use crate::widgets::text_field::{TextInput, render_text_field};

/// Number of catalog hotels shown below the form.
pub const FEATURED_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Destination,
    CheckIn,
    CheckOut,
    Guests,
    Search,
    Featured(usize),
}

const ORDER: [Field; 5 + FEATURED_COUNT] = [
    Field::Destination,
    Field::CheckIn,
    Field::CheckOut,
    Field::Guests,
    Field::Search,
    Field::Featured(0),
    Field::Featured(1),
    Field::Featured(2),
];

impl Field {
    fn stay(self) -> Option<StayField> {
        match self {
            Self::CheckIn => Some(StayField::CheckIn),
            Self::CheckOut => Some(StayField::CheckOut),
            _ => None,
        }
    }
}

/// State of the home screen.
#[derive(Debug)]
pub struct SearchForm {
    hotels: Vec<Hotel>,
    focus: Field,
    destination: TextInput,
    stay: StayDates,
    guests: u8,
    /// Held while the suggestion list is shown.
    suggestions_open: Option<ListenerGuard>,
    highlighted: Option<usize>,
    destination_area: Rect,
    areas: Vec<(Rect, Field)>,
}

impl SearchForm {
    /// An empty form.
    #[must_use]
    pub fn new(today: CalendarDate) -> Self {
        Self {
            hotels: catalog::hotels(),
            focus: Field::Destination,
            destination: TextInput::new(),
            stay: StayDates::new(today),
            guests: DEFAULT_GUESTS,
            suggestions_open: None,
            highlighted: None,
            destination_area: Rect::default(),
            areas: Vec::new(),
        }
    }

    /// The destination text.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.destination.value()
    }

    /// The stay dates and their pickers.
    #[must_use]
    pub fn stay(&self) -> &StayDates {
        &self.stay
    }

    /// The selected guest count.
    #[must_use]
    pub fn guests(&self) -> u8 {
        self.guests
    }

    /// Suggestions for the current destination text.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        suggestions(&self.hotels, self.destination.value())
    }

    /// Returns `true` while the suggestion list is drawn.
    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_open.is_some() && !self.suggestions().is_empty()
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.stay.is_open() {
            InputMode::Calendar
        } else if self.focus == Field::Destination {
            InputMode::Text
        } else {
            InputMode::Normal
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message, ctx: &Ctx<'_>) -> Option<Action> {
        if self.stay.handle_message(msg, ctx) {
            return None;
        }

        match (self.focus, msg) {
            (_, Message::NextField) => self.focus_field(cycle(&ORDER, self.focus, true), ctx),
            (_, Message::PrevField) => self.focus_field(cycle(&ORDER, self.focus, false), ctx),

            (Field::Destination, Message::Input { ch }) => {
                self.destination.insert_char(*ch);
                self.show_suggestions(ctx);
            }
            (Field::Destination, Message::Backspace) => {
                self.destination.backspace();
                self.show_suggestions(ctx);
            }
            (Field::Destination, Message::NavigateLeft) => self.destination.move_left(),
            (Field::Destination, Message::NavigateRight) => self.destination.move_right(),
            (Field::Destination, Message::NavigateDown) => self.move_highlight(true),
            (Field::Destination, Message::NavigateUp) => self.move_highlight(false),
            (Field::Destination, Message::Escape) => self.hide_suggestions(),
            (Field::Destination, Message::Select) => {
                let picked = self
                    .highlighted
                    .and_then(|index| self.suggestions().get(index).cloned());
                match picked {
                    Some(suggestion) => self.pick_suggestion(suggestion),
                    None => return Some(self.search()),
                }
            }

            (Field::CheckIn | Field::CheckOut, Message::Select) => {
                if let Some(field) = self.focus.stay() {
                    self.stay.toggle(field, ctx);
                }
            }

            (Field::Guests, Message::NavigateLeft) => self.guests = prev_guest_option(self.guests),
            (Field::Guests, Message::NavigateRight | Message::Select) => {
                self.guests = next_guest_option(self.guests);
            }

            (Field::Search, Message::Select) => return Some(self.search()),
            (Field::Featured(index), Message::Select) => return self.open_featured(index),

            (_, Message::NavigateDown) => self.focus_field(cycle(&ORDER, self.focus, true), ctx),
            (_, Message::NavigateUp) => self.focus_field(cycle(&ORDER, self.focus, false), ctx),
            _ => {}
        }
        None
    }

    /// Closes popovers and suggestions when a press lands outside them.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        self.stay.pointer_down(column, row);
        if self.suggestions_open.is_some() {
            let position = Position::new(column, row);
            let inside = self.destination_area.contains(position)
                || self.suggestions_area().contains(position);
            if !inside {
                self.hide_suggestions();
            }
        }
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16, ctx: &Ctx<'_>) -> Option<Action> {
        if self.stay.click(column, row, ctx) {
            return None;
        }
        if self.suggestions_visible() {
            let list = self.suggestions_area();
            if list.contains(Position::new(column, row)) {
                let index = usize::from(row.saturating_sub(list.y + 1));
                if let Some(suggestion) = self.suggestions().get(index).cloned() {
                    self.pick_suggestion(suggestion);
                }
                return None;
            }
        }

        let field = hit(&self.areas, column, row)?;
        self.focus_field(field, ctx);
        match field {
            Field::CheckIn | Field::CheckOut => {
                if let Some(stay) = field.stay() {
                    self.stay.toggle(stay, ctx);
                }
                None
            }
            Field::Guests => {
                self.guests = next_guest_option(self.guests);
                None
            }
            Field::Search => Some(self.search()),
            Field::Featured(index) => self.open_featured(index),
            Field::Destination => None,
        }
    }

    /// Draws the page.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        let [hero, _, form, _, featured_title, featured] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                lang.t("home", "hero_title"),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                lang.t("home", "hero_sub"),
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .render(hero, buf);

        let [destination, check_in, check_out, guests, search] = Layout::horizontal([
            Constraint::Min(16),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(11),
            Constraint::Length(12),
        ])
        .areas(form);

        self.areas.clear();
        self.destination_area = destination;
        self.areas.push((destination, Field::Destination));
        self.areas.push((check_in, Field::CheckIn));
        self.areas.push((check_out, Field::CheckOut));
        self.areas.push((guests, Field::Guests));
        self.areas.push((search, Field::Search));

        render_text_field(
            &self.destination,
            lang.t("home", "destination"),
            lang.t("home", "destination_placeholder"),
            self.focus == Field::Destination,
            destination,
            buf,
        );
        self.stay.render_trigger(
            StayField::CheckIn,
            lang.t("home", "checkin"),
            self.focus == Field::CheckIn,
            ctx,
            check_in,
            buf,
        );
        self.stay.render_trigger(
            StayField::CheckOut,
            lang.t("home", "checkout"),
            self.focus == Field::CheckOut,
            ctx,
            check_out,
            buf,
        );
        render_choice(
            lang.t("home", "guests"),
            &self.guests.to_string(),
            self.focus == Field::Guests,
            guests,
            buf,
        );
        render_button(
            lang.t("home", "search"),
            self.focus == Field::Search,
            true,
            search,
            buf,
        );

        Line::from(Span::styled(
            lang.t("home", "featured_title"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .render(featured_title, buf);

        let cards = Layout::vertical([Constraint::Length(4); FEATURED_COUNT]).split(featured);
        for (index, (hotel, card)) in self.hotels.iter().zip(cards.iter()).enumerate() {
            if card.height < 3 {
                break;
            }
            let focused = self.focus == Field::Featured(index);
            render_hotel_card(hotel, lang, focused, *card, buf);
            self.areas.push((*card, Field::Featured(index)));
        }
    }

    /// Draws the suggestion list and the open calendar.
    pub fn render_overlay(&self, ctx: &Ctx<'_>, buf: &mut Buffer) {
        if self.suggestions_visible() {
            let area = self.suggestions_area().intersection(buf.area);
            if !area.is_empty() {
                Clear.render(area, buf);
                let lines: Vec<Line> = self
                    .suggestions()
                    .into_iter()
                    .enumerate()
                    .map(|(index, suggestion)| {
                        let style = if self.highlighted == Some(index) {
                            Style::default().fg(Color::Black).bg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::White)
                        };
                        Line::from(Span::styled(format!(" ◆ {suggestion}"), style))
                    })
                    .collect();
                Paragraph::new(lines)
                    .block(
                        Block::bordered()
                            .border_type(BorderType::Rounded)
                            .border_style(Style::default().fg(Color::Yellow)),
                    )
                    .render(area, buf);
            }
        }
        self.stay.render_overlay(ctx, buf);
    }

    fn suggestions_area(&self) -> Rect {
        let count = u16::try_from(self.suggestions().len()).unwrap_or(u16::MAX);
        Rect {
            x: self.destination_area.x,
            y: self.destination_area.bottom(),
            width: self.destination_area.width,
            height: count.saturating_add(2),
        }
    }

    fn focus_field(&mut self, field: Field, ctx: &Ctx<'_>) {
        self.focus = field;
        if field == Field::Destination {
            self.show_suggestions(ctx);
        } else {
            self.hide_suggestions();
        }
    }

    fn show_suggestions(&mut self, ctx: &Ctx<'_>) {
        self.highlighted = None;
        if self.suggestions_open.is_none() {
            self.suggestions_open = Some(ctx.listeners.register());
        }
    }

    fn hide_suggestions(&mut self) {
        self.suggestions_open = None;
        self.highlighted = None;
    }

    fn move_highlight(&mut self, forward: bool) {
        let count = self.suggestions().len();
        if self.suggestions_open.is_none() || count == 0 {
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        });
    }

    fn pick_suggestion(&mut self, suggestion: String) {
        debug!(%suggestion, "destination suggestion picked");
        self.destination.set_value(suggestion);
        self.hide_suggestions();
    }

    fn search(&mut self) -> Action {
        self.hide_suggestions();
        self.stay.dismiss();
        Action::Navigate(Route::Hotels {
            query: self.destination.value().to_string(),
        })
    }

    fn open_featured(&self, index: usize) -> Option<Action> {
        let hotel = self.hotels.get(index)?;
        Some(Action::Navigate(Route::Detail { hotel_id: hotel.id }))
    }
}

/// Draws a hotel summary card: name and location, then rating and price.
pub(crate) fn render_hotel_card(
    hotel: &Hotel,
    lang: Language,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                hotel.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", hotel.location),
                Style::default().fg(Color::Gray),
            ),
        ]),
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
            Span::styled(
                format!(
                    "   {} {}/{}",
                    lang.t("hotels", "from"),
                    money(u64::from(hotel.price_from)),
                    lang.t("hotels", "night")
                ),
                Style::default().fg(Color::LightYellow),
            ),
        ]),
    ])
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    )
    .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::PointerListeners;
    use crate::test_utils::buffer_to_string;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2025, 6, 10).unwrap()
    }

    fn ctx(listeners: &PointerListeners) -> Ctx<'_> {
        Ctx {
            lang: Language::En,
            user: None,
            listeners,
            viewport: VIEWPORT,
            today: today(),
        }
    }

    fn rendered(listeners: &PointerListeners) -> (SearchForm, Buffer) {
        let mut form = SearchForm::new(today());
        let mut buf = Buffer::empty(VIEWPORT);
        form.render(&ctx(listeners), VIEWPORT, &mut buf);
        (form, buf)
    }

    fn type_text(form: &mut SearchForm, text: &str, ctx: &Ctx<'_>) {
        for ch in text.chars() {
            form.update(&Message::Input { ch }, ctx);
        }
    }

    #[test]
    fn starts_in_text_mode_on_destination() {
        let form = SearchForm::new(today());
        assert_eq!(form.input_mode(), InputMode::Text);
        assert_eq!(form.guests(), DEFAULT_GUESTS);
    }

    #[test]
    fn typing_shows_suggestions() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);

        type_text(&mut form, "par", &ctx);
        assert_eq!(form.destination(), "par");
        assert!(form.suggestions_visible());
        assert!(listeners.is_active());
        assert!(
            form.suggestions()
                .iter()
                .all(|s| s.to_lowercase().contains("par"))
        );
    }

    #[test]
    fn arrow_and_enter_pick_a_suggestion() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        type_text(&mut form, "par", &ctx);
        let first = form.suggestions()[0].clone();

        form.update(&Message::NavigateDown, &ctx);
        assert_eq!(form.update(&Message::Select, &ctx), None);
        assert_eq!(form.destination(), first);
        assert!(!form.suggestions_visible());
        assert!(!listeners.is_active());
    }

    #[test]
    fn enter_without_highlight_searches() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        type_text(&mut form, "Lisboa", &ctx);

        assert_eq!(
            form.update(&Message::Select, &ctx),
            Some(Action::Navigate(Route::Hotels {
                query: "Lisboa".to_string()
            }))
        );
    }

    #[test]
    fn outside_press_hides_suggestions() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        type_text(&mut form, "a", &ctx);
        assert!(form.suggestions_visible());

        form.pointer_down(90, 28);
        assert!(!form.suggestions_visible());
        assert_eq!(form.destination(), "a");
    }

    #[test]
    fn clicking_a_suggestion_fills_destination() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        type_text(&mut form, "par", &ctx);
        let list = form.suggestions_area();
        let first = form.suggestions()[0].clone();

        form.pointer_down(list.x + 2, list.y + 1);
        form.click(list.x + 2, list.y + 1, &ctx);
        assert_eq!(form.destination(), first);
    }

    #[test]
    fn tab_moves_to_check_in_and_enter_opens_calendar() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);

        form.update(&Message::NextField, &ctx);
        assert_eq!(form.input_mode(), InputMode::Normal);
        form.update(&Message::Select, &ctx);
        assert_eq!(form.input_mode(), InputMode::Calendar);

        form.update(&Message::CalendarMove { days: 1 }, &ctx);
        form.update(&Message::Select, &ctx);
        assert_eq!(form.stay().check_in(), "2025-06-11");
        assert_eq!(form.input_mode(), InputMode::Normal);
    }

    #[test]
    fn clicking_trigger_opens_calendar_below_it() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        let trigger = form.stay().picker(StayField::CheckOut).trigger_area();

        form.pointer_down(trigger.x + 1, trigger.y + 1);
        form.click(trigger.x + 1, trigger.y + 1, &ctx);
        let picker = form.stay().picker(StayField::CheckOut);
        assert!(picker.is_open());
        assert_eq!(picker.popover_area().y, trigger.bottom());
    }

    #[test]
    fn guests_cycle_through_options() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, _) = rendered(&listeners);
        for _ in 0..3 {
            form.update(&Message::NextField, &ctx);
        }
        form.update(&Message::NavigateRight, &ctx);
        assert_eq!(form.guests(), 3);
        form.update(&Message::NavigateLeft, &ctx);
        form.update(&Message::NavigateLeft, &ctx);
        assert_eq!(form.guests(), 1);
    }

    #[test]
    fn featured_card_opens_hotel() {
        let listeners = PointerListeners::default();
        let ctx = ctx(&listeners);
        let (mut form, buf) = rendered(&listeners);
        let first = catalog::hotels()[0].clone();
        assert!(buffer_to_string(&buf).contains(&first.name));

        let (card, _) = form.areas[5];
        assert_eq!(
            form.click(card.x + 2, card.y + 1, &ctx),
            Some(Action::Navigate(Route::Detail { hotel_id: first.id }))
        );
    }

    #[test]
    fn renders_labels_in_language() {
        let listeners = PointerListeners::default();
        let mut form = SearchForm::new(today());
        let mut buf = Buffer::empty(VIEWPORT);
        let ctx = Ctx {
            lang: Language::Pt,
            ..ctx(&listeners)
        };
        form.render(&ctx, VIEWPORT, &mut buf);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Destino"));
        assert!(content.contains("Entrada"));
        assert!(content.contains("Pesquisar"));
    }
}
