//! Filterable hotel list.

use beiramar_protocol::hotel::{RATING_STEPS, locations};
use beiramar_protocol::{Hotel, HotelQuery, Language, Message, SortOrder, catalog};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::home::render_hotel_card;
use super::{Action, Ctx, cycle, hit, money};
use crate::event::InputMode;
use crate::state::Route;
use crate::widgets::button::{render_button, render_choice};
use crate::widgets::text_field::{TextInput, render_text_field};

const SIDEBAR_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Search,
    Location,
    MaxPrice,
    MinRating,
    Sort,
    Reset,
    List,
}

const ORDER: [Field; 7] = [
    Field::Search,
    Field::Location,
    Field::MaxPrice,
    Field::MinRating,
    Field::Sort,
    Field::Reset,
    Field::List,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Field(Field),
    Hotel(u32),
}

/// State of the hotel list screen.
#[derive(Debug)]
pub struct HotelList {
    hotels: Vec<Hotel>,
    locations: Vec<String>,
    query: HotelQuery,
    search: TextInput,
    focus: Field,
    selected: usize,
    areas: Vec<(Rect, Target)>,
}

impl HotelList {
    /// The list filtered by `text`, other filters at their defaults.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let hotels = catalog::hotels();
        Self {
            locations: locations(&hotels),
            hotels,
            query: HotelQuery::with_text(text),
            search: TextInput::with_value(text),
            focus: Field::List,
            selected: 0,
            areas: Vec::new(),
        }
    }

    /// The active filters.
    #[must_use]
    pub fn query(&self) -> &HotelQuery {
        &self.query
    }

    /// Hotels passing the filters, in display order.
    #[must_use]
    pub fn results(&self) -> Vec<&Hotel> {
        self.query.apply(&self.hotels)
    }

    /// Index of the highlighted result.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.focus == Field::Search {
            InputMode::Text
        } else {
            InputMode::Normal
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        match (self.focus, msg) {
            (_, Message::NextField) => self.focus = cycle(&ORDER, self.focus, true),
            (_, Message::PrevField) => self.focus = cycle(&ORDER, self.focus, false),

            (Field::Search, Message::Input { ch }) => {
                self.search.insert_char(*ch);
                self.sync_text();
            }
            (Field::Search, Message::Backspace) => {
                self.search.backspace();
                self.sync_text();
            }
            (Field::Search, Message::NavigateLeft) => self.search.move_left(),
            (Field::Search, Message::NavigateRight) => self.search.move_right(),
            (Field::Search, Message::Select | Message::NavigateDown) => self.focus = Field::List,

            (_, Message::CycleSort) => self.step(Field::Sort, true),
            (_, Message::ResetFilters) => self.reset(),

            (Field::Reset, Message::Select) => self.reset(),
            (
                Field::Location | Field::MaxPrice | Field::MinRating | Field::Sort,
                Message::NavigateRight | Message::Select,
            ) => self.step(self.focus, true),
            (
                Field::Location | Field::MaxPrice | Field::MinRating | Field::Sort,
                Message::NavigateLeft,
            ) => self.step(self.focus, false),

            (Field::List, Message::NavigateUp) => {
                if self.selected == 0 {
                    self.focus = Field::Reset;
                } else {
                    self.selected -= 1;
                }
            }
            (Field::List, Message::NavigateDown) => {
                let count = self.results().len();
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            (Field::List, Message::Select) => {
                let hotel = self.results().get(self.selected)?.id;
                return Some(Action::Navigate(Route::Detail { hotel_id: hotel }));
            }

            (_, Message::NavigateDown) => self.focus = cycle(&ORDER, self.focus, true),
            (_, Message::NavigateUp) => self.focus = cycle(&ORDER, self.focus, false),
            _ => {}
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        match hit(&self.areas, column, row)? {
            Target::Hotel(hotel_id) => Some(Action::Navigate(Route::Detail { hotel_id })),
            Target::Field(Field::Reset) => {
                self.focus = Field::Reset;
                self.reset();
                None
            }
            Target::Field(field) => {
                self.focus = field;
                self.step(field, true);
                None
            }
        }
    }

    /// Draws the page.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        let lang = ctx.lang;
        self.areas.clear();

        let [sidebar, _, main] = Layout::horizontal([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let rows = Layout::vertical([Constraint::Length(3); 6]).split(sidebar);
        let location = self
            .query
            .location
            .clone()
            .unwrap_or_else(|| lang.t("hotels", "all").to_string());
        let rating = if self.query.min_rating > 0.0 {
            format!("{:.1}+", self.query.min_rating)
        } else {
            lang.t("hotels", "any").to_string()
        };
        let choices = [
            (Field::Location, lang.t("hotels", "location"), location),
            (
                Field::MaxPrice,
                lang.t("hotels", "max_price"),
                format!(
                    "{}/{}",
                    money(u64::from(self.query.max_price)),
                    lang.t("hotels", "night")
                ),
            ),
            (Field::MinRating, lang.t("hotels", "min_rating"), rating),
            (
                Field::Sort,
                lang.t("hotels", "sort"),
                lang.t("hotels", self.query.sort.label_key()).to_string(),
            ),
        ];

        render_text_field(
            &self.search,
            lang.t("hotels", "title"),
            lang.t("hotels", "search_placeholder"),
            self.focus == Field::Search,
            rows[0],
            buf,
        );
        self.areas.push((rows[0], Target::Field(Field::Search)));
        for ((field, label, value), row) in choices.into_iter().zip(rows.iter().skip(1)) {
            render_choice(label, &value, self.focus == field, *row, buf);
            self.areas.push((*row, Target::Field(field)));
        }
        render_button(
            lang.t("hotels", "reset"),
            self.focus == Field::Reset,
            true,
            rows[5],
            buf,
        );
        self.areas.push((rows[5], Target::Field(Field::Reset)));

        self.render_results(lang, main, buf);
    }

    fn render_results(&mut self, lang: Language, area: Rect, buf: &mut Buffer) {
        let [count_line, list] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let results: Vec<(u32, usize)> = self
            .results()
            .iter()
            .enumerate()
            .map(|(index, hotel)| (hotel.id, index))
            .collect();
        self.selected = self.selected.min(results.len().saturating_sub(1));

        Line::from(vec![
            Span::styled(
                results.len().to_string(),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", lang.t("hotels", "properties_found")),
                Style::default().fg(Color::Gray),
            ),
        ])
        .render(count_line, buf);

        if results.is_empty() {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    lang.t("hotels", "no_results"),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!("r: {}", lang.t("hotels", "reset")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .render(list, buf);
            return;
        }

        let visible = usize::from((list.height / CARD_HEIGHT).max(1));
        let first = self.selected.saturating_sub(visible - 1);
        let mut y = list.y;
        for (hotel_id, index) in results.into_iter().skip(first).take(visible) {
            let Some(hotel) = self.hotels.iter().find(|h| h.id == hotel_id) else {
                continue;
            };
            let card = Rect {
                x: list.x,
                y,
                width: list.width,
                height: CARD_HEIGHT.min(list.bottom().saturating_sub(y)),
            };
            let focused = self.focus == Field::List && index == self.selected;
            render_hotel_card(hotel, lang, focused, card, buf);
            self.areas.push((card, Target::Hotel(hotel_id)));
            y += CARD_HEIGHT;
        }
    }

    fn sync_text(&mut self) {
        self.query.text = self.search.value().to_string();
        self.selected = 0;
    }

    fn reset(&mut self) {
        self.query = HotelQuery::default();
        self.search.clear();
        self.selected = 0;
    }

    fn step(&mut self, field: Field, forward: bool) {
        match field {
            Field::Location => {
                // Location cycles through `All` plus each location.
                let steps = if forward { 1 } else { self.locations.len() };
                for _ in 0..steps {
                    self.query.cycle_location(&self.locations);
                }
            }
            Field::MaxPrice if forward => self.query.raise_max_price(),
            Field::MaxPrice => self.query.lower_max_price(),
            Field::MinRating => {
                let steps = if forward { 1 } else { RATING_STEPS.len() - 1 };
                for _ in 0..steps {
                    self.query.cycle_min_rating();
                }
            }
            Field::Sort => {
                self.query.sort = cycle(&SortOrder::ALL, self.query.sort, forward);
            }
            Field::Search | Field::Reset | Field::List => return,
        }
        self.selected = 0;
    }
}
