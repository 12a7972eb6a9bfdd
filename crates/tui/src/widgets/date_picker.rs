//! Popover date picker.
//!
//! A trigger button shows the current value; activating it opens a calendar
//! popover anchored to the trigger. The picker never stores the value itself:
//! every interaction that changes the date returns `Some(new_value)` and the
//! owning form writes it back, passing the current value in again through
//! [`PickerProps`] on the next call.
//!
//! # Layout
//!
//! ```text
//! ╭────────────────────────────╮
//! │ ‹        June 2025       › │
//! │Sun Mon Tue Wed Thu Fri Sat │
//! │  1   2   3   4   5   6   7 │
//! │  8   9  10  11  12  13  14 │
//! │ 15  16  17  18  19  20  21 │
//! │ 22  23  24  25  26  27  28 │
//! │ 29  30                     │
//! │                            │
//! │    Today         Clear     │
//! ╰────────────────────────────╯
//! ```

use beiramar_protocol::date::{WEEKDAY_NAMES, parse_optional};
use beiramar_protocol::{CalendarDate, Language, Message, MonthView, RangeBounds};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Widget},
};
use tracing::debug;

use crate::listener::{ListenerGuard, PointerListeners};

/// Width of the popover, borders included.
pub const POPOVER_WIDTH: u16 = 30;

/// Height of the popover, borders included.
pub const POPOVER_HEIGHT: u16 = 11;

/// Minimum distance between the popover and the left edge of the viewport.
pub const MARGIN: u16 = 1;

const INNER_WIDTH: u16 = POPOVER_WIDTH - 2;
const CELL_WIDTH: u16 = 4;
const NAV_WIDTH: u16 = 3;
const WEEKDAY_ROW: u16 = 1;
const GRID_TOP: u16 = 2;
const GRID_ROWS: u16 = 6;
const FOOTER_ROW: u16 = GRID_TOP + GRID_ROWS;
const FOOTER_SPLIT: u16 = INNER_WIDTH / 2;

const DEFAULT_PLACEHOLDER: &str = "Select date";

/// Inputs supplied by the owning form on every call.
///
/// All dates are canonical strings; empty or malformed strings mean "unset".
///
/// # Examples
///
/// ```
/// use beiramar_protocol::CalendarDate;
/// use beiramar_tui::widgets::date_picker::PickerProps;
///
/// let props = PickerProps::new("2025-06-12")
///     .min("2025-06-10")
///     .range("2025-06-12", "2025-06-15");
///
/// let day = |d| CalendarDate::from_ymd(2025, 6, d).unwrap();
/// assert!(props.is_disabled(day(9)));
/// assert!(!props.is_disabled(day(10)));
/// assert_eq!(props.selected(), Some(day(12)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerProps<'a> {
    /// The current value.
    pub value: &'a str,
    /// The earliest selectable day.
    pub min: &'a str,
    /// Start of the highlighted range.
    pub range_start: &'a str,
    /// End of the highlighted range.
    pub range_end: &'a str,
    /// Text shown by the trigger when no value is set.
    pub placeholder: &'a str,
}

impl<'a> PickerProps<'a> {
    /// Props for the given value, with no minimum and no range.
    #[must_use]
    pub fn new(value: &'a str) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Sets the minimum date.
    #[must_use]
    pub fn min(mut self, min: &'a str) -> Self {
        self.min = min;
        self
    }

    /// Sets the highlighted range.
    #[must_use]
    pub fn range(mut self, start: &'a str, end: &'a str) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// The parsed value.
    #[must_use]
    pub fn selected(&self) -> Option<CalendarDate> {
        parse_optional(self.value)
    }

    /// The parsed minimum.
    #[must_use]
    pub fn min_date(&self) -> Option<CalendarDate> {
        parse_optional(self.min)
    }

    /// The parsed range bounds.
    #[must_use]
    pub fn bounds(&self) -> RangeBounds {
        RangeBounds::from_strings(self.range_start, self.range_end)
    }

    /// Returns `true` if `date` is strictly before the minimum.
    #[must_use]
    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.min_date().is_some_and(|min| date < min)
    }
}

/// Flags of one day cell. Each flag is computed independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayState {
    /// Before the minimum; the cell ignores input.
    pub disabled: bool,
    /// Equal to the current value.
    pub selected: bool,
    /// Equal to today.
    pub today: bool,
    /// Strictly between both range bounds.
    pub in_range: bool,
    /// Equal to one of the range bounds.
    pub range_edge: bool,
}

impl DayState {
    /// Computes the flags of `date`.
    #[must_use]
    pub fn of(date: CalendarDate, props: &PickerProps<'_>, today: CalendarDate) -> Self {
        let bounds = props.bounds();
        Self {
            disabled: props.is_disabled(date),
            selected: props.selected() == Some(date),
            today: date == today,
            in_range: bounds.strictly_contains(date),
            range_edge: bounds.is_edge(date),
        }
    }

    /// Whether the today marker is drawn; the selection hides it.
    #[must_use]
    pub fn shows_today(self) -> bool {
        self.today && !self.selected
    }

    /// Whether the range-edge marker is drawn; the selection hides it.
    #[must_use]
    pub fn shows_edge(self) -> bool {
        self.range_edge && !self.selected
    }
}

/// What a position inside the open popover refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverHit {
    /// The previous-month button.
    PrevMonth,
    /// The next-month button.
    NextMonth,
    /// A day cell.
    Day(CalendarDate),
    /// The Today button.
    Today,
    /// The Clear button.
    Clear,
    /// Any other part of the popover (border, title, blanks).
    Inside,
}

/// Computes the popover rectangle for a trigger.
///
/// The popover opens below the trigger when the rows under it can hold the
/// whole popover, and above it otherwise. Horizontally it starts at the
/// trigger, shifted left so it does not cross the right edge of the viewport,
/// but never closer than [`MARGIN`] to the left edge.
///
/// # Examples
///
/// ```
/// use ratatui::layout::Rect;
/// use beiramar_tui::widgets::date_picker::{POPOVER_HEIGHT, popover_position};
///
/// let viewport = Rect::new(0, 0, 80, 40);
/// let below = popover_position(Rect::new(10, 5, 20, 3), viewport);
/// assert_eq!((below.x, below.y), (10, 8));
///
/// let above = popover_position(Rect::new(10, 30, 20, 3), viewport);
/// assert_eq!(above.y, 30 - POPOVER_HEIGHT);
/// ```
#[must_use]
pub fn popover_position(trigger: Rect, viewport: Rect) -> Rect {
    let space_below = viewport.bottom().saturating_sub(trigger.bottom());
    let y = if space_below >= POPOVER_HEIGHT {
        trigger.bottom()
    } else {
        trigger.y.saturating_sub(POPOVER_HEIGHT).max(viewport.y)
    };
    let x = trigger
        .x
        .min(viewport.right().saturating_sub(POPOVER_WIDTH))
        .max(MARGIN);
    Rect::new(x, y, POPOVER_WIDTH, POPOVER_HEIGHT)
}

#[derive(Debug)]
struct OpenPopover {
    today: CalendarDate,
    cursor: CalendarDate,
    _listener: ListenerGuard,
}

/// Per-instance state of a date picker.
///
/// Owned by the form that shows the picker. Holds the displayed month, the
/// rectangles of the last render and, while open, the outside-click listener
/// registration.
#[derive(Debug)]
pub struct DatePickerState {
    view: MonthView,
    trigger: Rect,
    popover: Rect,
    open: Option<OpenPopover>,
}

impl DatePickerState {
    /// Creates a closed picker showing the month of `value`, or of `today`
    /// when the value is unset.
    #[must_use]
    pub fn new(value: &str, today: CalendarDate) -> Self {
        Self {
            view: MonthView::of(parse_optional(value).unwrap_or(today)),
            trigger: Rect::default(),
            popover: Rect::default(),
            open: None,
        }
    }

    /// The displayed month.
    #[must_use]
    pub fn view(&self) -> MonthView {
        self.view
    }

    /// Returns `true` while the popover is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The keyboard cursor, while open.
    #[must_use]
    pub fn cursor(&self) -> Option<CalendarDate> {
        self.open.as_ref().map(|open| open.cursor)
    }

    /// Today as captured when the popover opened.
    #[must_use]
    pub fn today(&self) -> Option<CalendarDate> {
        self.open.as_ref().map(|open| open.today)
    }

    /// Where the trigger was last drawn.
    #[must_use]
    pub fn trigger_area(&self) -> Rect {
        self.trigger
    }

    /// Where the popover is anchored.
    #[must_use]
    pub fn popover_area(&self) -> Rect {
        self.popover
    }

    /// Records where the trigger is drawn.
    pub fn set_trigger_area(&mut self, area: Rect) {
        self.trigger = area;
    }

    /// Returns `true` if the position lies on the trigger.
    #[must_use]
    pub fn trigger_contains(&self, column: u16, row: u16) -> bool {
        self.trigger.contains(Position::new(column, row))
    }

    /// Activates the trigger: positions the popover, then opens or closes it.
    ///
    /// A trigger that has not been measured yet keeps the previous position.
    pub fn toggle(
        &mut self,
        props: &PickerProps<'_>,
        viewport: Rect,
        listeners: &PointerListeners,
        today: CalendarDate,
    ) {
        if self.trigger.is_empty() {
            debug!("date picker trigger not measured, keeping popover position");
        } else {
            self.popover = popover_position(self.trigger, viewport);
        }

        if self.open.take().is_some() {
            return;
        }
        let cursor = [props.selected(), Some(today)]
            .into_iter()
            .flatten()
            .find(|date| self.view.contains(*date))
            .unwrap_or_else(|| self.view.first_day());
        self.open = Some(OpenPopover {
            today,
            cursor,
            _listener: listeners.register(),
        });
    }

    /// Handles a pointer press anywhere on screen.
    ///
    /// Closes the popover when the press is outside both the trigger and the
    /// popover, leaving the value untouched. Returns `true` if it closed.
    pub fn handle_pointer_down(&mut self, column: u16, row: u16) -> bool {
        if self.open.is_none() {
            return false;
        }
        let position = Position::new(column, row);
        if self.trigger.contains(position) || self.popover.contains(position) {
            return false;
        }
        self.dismiss();
        true
    }

    /// Resolves a position to a popover element.
    ///
    /// Returns `None` when closed or when the position is outside the popover.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<PopoverHit> {
        self.open.as_ref()?;
        if !self.popover.contains(Position::new(column, row)) {
            return None;
        }
        let inner_x = self.popover.x + 1;
        let inner_y = self.popover.y + 1;
        if column < inner_x || row < inner_y || column >= inner_x + INNER_WIDTH {
            return Some(PopoverHit::Inside);
        }
        let x = column - inner_x;
        let y = row - inner_y;

        let hit = match y {
            0 if x < NAV_WIDTH => PopoverHit::PrevMonth,
            0 if x >= INNER_WIDTH - NAV_WIDTH => PopoverHit::NextMonth,
            GRID_TOP..FOOTER_ROW => {
                let index = usize::from((y - GRID_TOP) * 7 + x / CELL_WIDTH);
                match self.view.cells().get(index) {
                    Some(Some(date)) => PopoverHit::Day(*date),
                    _ => PopoverHit::Inside,
                }
            }
            FOOTER_ROW if x < FOOTER_SPLIT => PopoverHit::Today,
            FOOTER_ROW => PopoverHit::Clear,
            _ => PopoverHit::Inside,
        };
        Some(hit)
    }

    /// Handles a click inside the popover.
    pub fn click(&mut self, column: u16, row: u16, props: &PickerProps<'_>) -> Option<String> {
        match self.hit_test(column, row)? {
            PopoverHit::PrevMonth => {
                self.prev_month();
                None
            }
            PopoverHit::NextMonth => {
                self.next_month();
                None
            }
            PopoverHit::Day(date) => self.select_day(date, props),
            PopoverHit::Today => self.pick_today(props),
            PopoverHit::Clear => self.clear(),
            PopoverHit::Inside => None,
        }
    }

    /// Shows the previous month.
    pub fn prev_month(&mut self) {
        self.view = self.view.prev();
        self.keep_cursor_in_view();
    }

    /// Shows the next month.
    pub fn next_month(&mut self) {
        self.view = self.view.next();
        self.keep_cursor_in_view();
    }

    /// Picks `date` unless it is disabled.
    pub fn select_day(&mut self, date: CalendarDate, props: &PickerProps<'_>) -> Option<String> {
        if props.is_disabled(date) {
            return None;
        }
        self.dismiss();
        Some(date.to_string())
    }

    /// Picks today; a no-op that keeps the popover open when today is disabled.
    pub fn pick_today(&mut self, props: &PickerProps<'_>) -> Option<String> {
        let today = self.today()?;
        self.select_day(today, props)
    }

    /// Clears the value and closes the popover.
    pub fn clear(&mut self) -> Option<String> {
        self.dismiss();
        Some(String::new())
    }

    /// Closes the popover without changing the value.
    pub fn dismiss(&mut self) {
        self.open = None;
    }

    /// Moves the keyboard cursor, following it into other months.
    pub fn move_cursor(&mut self, days: i32) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if let Some(cursor) = open.cursor.offset_days(i64::from(days)) {
            open.cursor = cursor;
            if !self.view.contains(cursor) {
                self.view = MonthView::of(cursor);
            }
        }
    }

    /// Picks the day under the keyboard cursor.
    pub fn select_cursor(&mut self, props: &PickerProps<'_>) -> Option<String> {
        let cursor = self.cursor()?;
        self.select_day(cursor, props)
    }

    /// Applies a keyboard message to the open popover.
    pub fn handle_message(&mut self, msg: &Message, props: &PickerProps<'_>) -> Option<String> {
        match msg {
            Message::CalendarMove { days } => {
                self.move_cursor(*days);
                None
            }
            Message::PrevMonth => {
                self.prev_month();
                None
            }
            Message::NextMonth => {
                self.next_month();
                None
            }
            Message::Select => self.select_cursor(props),
            Message::PickToday => self.pick_today(props),
            Message::ClearDate => self.clear(),
            Message::Escape => {
                self.dismiss();
                None
            }
            _ => None,
        }
    }

    fn keep_cursor_in_view(&mut self) {
        let view = self.view;
        if let Some(open) = self.open.as_mut()
            && !view.contains(open.cursor)
        {
            let day = open.cursor.day().min(view.days_in_month());
            open.cursor =
                CalendarDate::from_ymd(view.year(), view.month(), day).unwrap_or(view.first_day());
        }
    }
}

/// Renders the trigger button and records its area for hit-testing.
///
/// `focused` draws the keyboard focus; an open popover is drawn as active.
pub fn render_date_trigger(
    state: &mut DatePickerState,
    props: &PickerProps<'_>,
    label: &str,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    state.set_trigger_area(area);

    let border_color = if state.is_open() {
        Color::Cyan
    } else if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::Gray),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    let text = match props.selected() {
        Some(date) => Span::styled(date.short_display(), Style::default().fg(Color::White)),
        None => {
            let placeholder = if props.placeholder.is_empty() {
                DEFAULT_PLACEHOLDER
            } else {
                props.placeholder
            };
            Span::styled(
                placeholder.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        }
    };
    Line::from(vec![Span::raw(" "), text]).render(inner, buf);

    if inner.width > 2 {
        put(
            buf,
            inner.right() - 2,
            inner.y,
            "▾",
            Style::default().fg(border_color),
        );
    }
}

/// Renders the open popover on top of everything drawn so far.
pub fn render_date_popover(
    state: &DatePickerState,
    props: &PickerProps<'_>,
    lang: Language,
    buf: &mut Buffer,
) {
    let Some(open) = state.open.as_ref() else {
        return;
    };
    let area = state.popover.intersection(buf.area);
    if area.is_empty() {
        return;
    }

    Clear.render(area, buf);
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .render(area, buf);

    let x0 = state.popover.x + 1;
    let y0 = state.popover.y + 1;
    let nav = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    put(buf, x0, y0, " ‹ ", nav);
    put(buf, x0 + INNER_WIDTH - NAV_WIDTH, y0, " › ", nav);
    let title = state.view.title();
    let title_width = u16::try_from(title.chars().count()).unwrap_or(INNER_WIDTH);
    put(
        buf,
        x0 + INNER_WIDTH.saturating_sub(title_width) / 2,
        y0,
        &title,
        Style::default()
            .fg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    );

    for (column, name) in (0u16..).zip(WEEKDAY_NAMES) {
        put(
            buf,
            x0 + column * CELL_WIDTH,
            y0 + WEEKDAY_ROW,
            name,
            Style::default().fg(Color::DarkGray),
        );
    }

    for (index, cell) in (0u16..).zip(state.view.cells()) {
        let Some(date) = cell else { continue };
        let day = DayState::of(date, props, open.today);
        put(
            buf,
            x0 + (index % 7) * CELL_WIDTH,
            y0 + GRID_TOP + index / 7,
            &format!("{:>3} ", date.day()),
            day_style(day, date == open.cursor),
        );
    }

    let today_style = if props.is_disabled(open.today) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    put_centered(
        buf,
        x0,
        FOOTER_SPLIT,
        y0 + FOOTER_ROW,
        lang.t("datepicker", "today"),
        today_style,
    );
    put_centered(
        buf,
        x0 + FOOTER_SPLIT,
        INNER_WIDTH - FOOTER_SPLIT,
        y0 + FOOTER_ROW,
        lang.t("datepicker", "clear"),
        Style::default().fg(Color::LightRed),
    );
}

fn day_style(day: DayState, is_cursor: bool) -> Style {
    let mut style = Style::default().fg(Color::White);
    if day.in_range {
        style = style.bg(Color::Blue);
    }
    if day.shows_edge() {
        style = style.fg(Color::LightYellow).add_modifier(Modifier::BOLD);
    }
    if day.shows_today() {
        style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    }
    if day.selected {
        style = style
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    if day.disabled {
        style = style.fg(Color::DarkGray).remove_modifier(Modifier::BOLD);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Writes `text` if its start lies inside the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    if buf.area.contains(Position::new(x, y)) {
        buf.set_string(x, y, text, style);
    }
}

fn put_centered(buf: &mut Buffer, x: u16, width: u16, y: u16, text: &str, style: Style) {
    let text_width = u16::try_from(text.chars().count()).unwrap_or(width);
    put(buf, x + width.saturating_sub(text_width) / 2, y, text, style);
}
