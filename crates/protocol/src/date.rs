//! Calendar dates, month views and range bounds.
//!
//! This module defines the date types shared by the search form, the booking
//! flow and the date picker widget. Every date is a local calendar day with no
//! time-of-day component and no time zone conversion.
//!
//! # Canonical Format
//!
//! Dates are exchanged as `YYYY-MM-DD` strings (zero-padded month and day).
//! An empty or malformed string means "no date" and never signals an error
//! at the widget boundary:
//!
//! ```
//! use beiramar_protocol::CalendarDate;
//!
//! let date = CalendarDate::from_canonical("2025-06-15").unwrap();
//! assert_eq!(date.to_string(), "2025-06-15");
//!
//! assert!(CalendarDate::from_canonical("").is_none());
//! assert!(CalendarDate::from_canonical("2025-02-30").is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProtocolError;

/// English month names, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short weekday names, indexed by weekday (0 = Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar day in the user's local calendar.
///
/// Ordering follows the calendar, so `a < b` means `a` is an earlier day.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::CalendarDate;
///
/// let check_in = CalendarDate::from_ymd(2025, 6, 10).unwrap();
/// let check_out = CalendarDate::from_ymd(2025, 6, 14).unwrap();
/// assert!(check_in < check_out);
/// assert_eq!(check_in.days_until(check_out), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its year, month (1-12) and day (1-31) fields.
    ///
    /// Returns `None` when the fields do not name a real calendar day.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a canonical `YYYY-MM-DD` string.
    ///
    /// Returns `None` for empty, malformed or out-of-calendar input. Month and
    /// day may omit their leading zero; the year must be 1 to 4 digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::CalendarDate;
    ///
    /// assert!(CalendarDate::from_canonical("2025-6-5").is_some());
    /// assert!(CalendarDate::from_canonical("2025/06/05").is_none());
    /// assert!(CalendarDate::from_canonical("tomorrow").is_none());
    /// ```
    #[must_use]
    pub fn from_canonical(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let year = numeric_field(parts.next()?, 4)?;
        let month = numeric_field(parts.next()?, 2)?;
        let day = numeric_field(parts.next()?, 2)?;
        if parts.next().is_some() {
            return None;
        }
        Self::from_ymd(i32::try_from(year).ok()?, month, day)
    }

    /// Returns today's date in the local time zone.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The year field.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The month field (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The day-of-month field (1-31).
    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// The weekday index, with Sunday as 0 and Saturday as 6.
    #[must_use]
    pub fn weekday_index(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Number of days from `self` to `other` (negative when `other` is earlier).
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Shifts the date by a signed number of days.
    ///
    /// Returns `None` if the result falls outside the supported calendar.
    #[must_use]
    pub fn offset_days(self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        if days >= 0 {
            self.0.checked_add_days(magnitude).map(Self)
        } else {
            self.0.checked_sub_days(magnitude).map(Self)
        }
    }

    /// Formats the date for the picker trigger, e.g. `Jun 15, 2025`.
    #[must_use]
    pub fn short_display(self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// Formats the date with its weekday, e.g. `Sun, June 15, 2025`.
    #[must_use]
    pub fn long_display(self) -> String {
        self.0.format("%a, %B %-d, %Y").to_string()
    }
}

/// Parses one numeric date field of at most `max_len` ASCII digits.
fn numeric_field(part: &str, max_len: usize) -> Option<u32> {
    if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(s).ok_or_else(|| ProtocolError::InvalidDate(s.to_string()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an optional canonical date string.
///
/// Empty and malformed strings both map to `None`.
#[must_use]
pub fn parse_optional(value: &str) -> Option<CalendarDate> {
    CalendarDate::from_canonical(value)
}

/// Formats an optional date as its canonical string, or `""` when absent.
#[must_use]
pub fn canonical_or_empty(date: Option<CalendarDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// The (year, month) pair displayed by a calendar grid.
///
/// Independent of any selected value; navigating the view never changes the
/// selection.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::MonthView;
///
/// let december = MonthView::new(2025, 12).unwrap();
/// assert_eq!(december.next(), MonthView::new(2026, 1).unwrap());
/// assert_eq!(december.next().prev(), december);
/// assert_eq!(december.title(), "December 2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    /// Creates a view of the given year and month (1-12).
    ///
    /// Returns `None` for an invalid month or an unsupported year.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The view containing the given date.
    #[must_use]
    pub fn of(date: CalendarDate) -> Self {
        Self {
            first: date.0.with_day(1).unwrap_or(date.0),
        }
    }

    /// The displayed year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// The displayed month (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// The following month, wrapping December into January of the next year.
    ///
    /// Stays put at the end of the supported calendar.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// The preceding month, wrapping January into December of the previous year.
    #[must_use]
    pub fn prev(self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// The first day of the displayed month.
    #[must_use]
    pub fn first_day(self) -> CalendarDate {
        CalendarDate(self.first)
    }

    /// Number of days in the displayed month.
    ///
    /// Computed as the day before the first of the following month.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::MonthView;
    ///
    /// assert_eq!(MonthView::new(2024, 2).unwrap().days_in_month(), 29);
    /// assert_eq!(MonthView::new(2025, 2).unwrap().days_in_month(), 28);
    /// assert_eq!(MonthView::new(2025, 12).unwrap().days_in_month(), 31);
    /// ```
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.next()
            .first_day()
            .offset_days(-1)
            .map_or(31, CalendarDate::day)
    }

    /// Number of empty cells before day 1, equal to the weekday of the 1st.
    #[must_use]
    pub fn leading_blanks(self) -> u32 {
        self.first_day().weekday_index()
    }

    /// Builds the grid cells: `leading_blanks()` empty cells, then one cell per day.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::MonthView;
    ///
    /// // June 2025 starts on a Sunday.
    /// let cells = MonthView::new(2025, 6).unwrap().cells();
    /// assert_eq!(cells.len(), 30);
    /// assert_eq!(cells[0].unwrap().day(), 1);
    /// ```
    #[must_use]
    pub fn cells(self) -> Vec<Option<CalendarDate>> {
        let blanks = self.leading_blanks() as usize;
        let days = self.days_in_month();
        let mut cells = Vec::with_capacity(blanks + days as usize);
        cells.resize(blanks, None);
        cells.extend((1..=days).map(|day| CalendarDate::from_ymd(self.year(), self.month(), day)));
        cells
    }

    /// Returns `true` if the date falls within the displayed month.
    #[must_use]
    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The header title, e.g. `June 2025`.
    #[must_use]
    pub fn title(self) -> String {
        format!("{} {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }
}

/// Caller-supplied range bounds used only for highlighting.
///
/// Either bound may be absent. The in-range predicate needs both; the edge
/// predicate applies to each present bound. An inverted range (start after
/// end) highlights nothing.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{CalendarDate, RangeBounds};
///
/// let day = |d| CalendarDate::from_ymd(2025, 6, d).unwrap();
/// let range = RangeBounds::new(Some(day(10)), Some(day(14)));
///
/// assert!(range.strictly_contains(day(12)));
/// assert!(!range.strictly_contains(day(10)));
/// assert!(range.is_edge(day(14)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeBounds {
    /// Start of the highlighted span.
    pub start: Option<CalendarDate>,
    /// End of the highlighted span.
    pub end: Option<CalendarDate>,
}

impl RangeBounds {
    /// Creates range bounds from optional dates.
    #[must_use]
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    /// Creates range bounds from canonical strings (empty or malformed means absent).
    #[must_use]
    pub fn from_strings(start: &str, end: &str) -> Self {
        Self::new(parse_optional(start), parse_optional(end))
    }

    /// Returns `true` when both bounds are present and start is after end.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Returns `true` if the date lies strictly between both bounds.
    #[must_use]
    pub fn strictly_contains(&self, date: CalendarDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start < date && date < end,
            _ => false,
        }
    }

    /// Returns `true` if the date equals one of the bounds.
    #[must_use]
    pub fn is_edge(&self, date: CalendarDate) -> bool {
        if self.is_inverted() {
            return false;
        }
        self.start == Some(date) || self.end == Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::from_canonical(s).expect("valid test date")
    }

    #[test]
    fn parses_canonical_strings() {
        let d = date("2025-06-15");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 6, 15));
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in [
            "",
            "2025",
            "2025-06",
            "2025-06-15-01",
            "2025-13-01",
            "2025-00-10",
            "2025-02-29",
            "20250-01-01",
            "2025-+6-01",
            "abcd-ef-gh",
            "2025-06-15T10:00",
        ] {
            assert!(
                CalendarDate::from_canonical(input).is_none(),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn leap_day_parses_in_leap_years() {
        assert!(CalendarDate::from_canonical("2024-02-29").is_some());
    }

    #[test]
    fn formats_zero_padded() {
        let d = CalendarDate::from_ymd(2026, 1, 5).unwrap();
        assert_eq!(d.to_string(), "2026-01-05");
    }

    #[test]
    fn from_str_reports_the_offending_input() {
        let err = "nope".parse::<CalendarDate>().unwrap_err();
        assert_eq!(err.to_string(), "invalid date: \"nope\"");
    }

    #[test]
    fn short_display_matches_trigger_format() {
        assert_eq!(date("2025-06-05").short_display(), "Jun 5, 2025");
        assert_eq!(date("2025-12-25").short_display(), "Dec 25, 2025");
    }

    #[test]
    fn long_display_includes_weekday() {
        assert_eq!(date("2025-06-15").long_display(), "Sun, June 15, 2025");
    }

    #[test]
    fn serde_uses_canonical_string() {
        let d = date("2025-06-15");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CalendarDate>("\"June 15\"").is_err());
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        assert_eq!(date("2025-06-15").weekday_index(), 0);
        assert_eq!(date("2025-06-21").weekday_index(), 6);
    }

    #[test]
    fn offset_days_crosses_month_boundaries() {
        assert_eq!(date("2025-06-30").offset_days(1), Some(date("2025-07-01")));
        assert_eq!(date("2025-03-01").offset_days(-1), Some(date("2025-02-28")));
        assert_eq!(date("2025-06-15").offset_days(-7), Some(date("2025-06-08")));
    }

    #[test]
    fn days_until_is_signed() {
        assert_eq!(date("2025-06-10").days_until(date("2025-06-14")), 4);
        assert_eq!(date("2025-06-14").days_until(date("2025-06-10")), -4);
    }

    #[test]
    fn canonical_helpers_treat_empty_as_absent() {
        assert_eq!(parse_optional(""), None);
        assert_eq!(canonical_or_empty(None), "");
        assert_eq!(canonical_or_empty(Some(date("2025-06-15"))), "2025-06-15");
    }

    #[test]
    fn month_view_wraps_years() {
        let dec = MonthView::new(2025, 12).unwrap();
        let jan = MonthView::new(2026, 1).unwrap();
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.prev(), dec);
    }

    #[test]
    fn month_view_rejects_invalid_month() {
        assert!(MonthView::new(2025, 0).is_none());
        assert!(MonthView::new(2025, 13).is_none());
    }

    #[test]
    fn month_view_grid_for_june_2025() {
        // June 1st 2025 is a Sunday.
        let view = MonthView::new(2025, 6).unwrap();
        assert_eq!(view.leading_blanks(), 0);
        assert_eq!(view.days_in_month(), 30);
        assert_eq!(view.cells().len(), 30);
    }

    #[test]
    fn month_view_grid_for_may_2026() {
        // May 1st 2026 is a Friday.
        let view = MonthView::new(2026, 5).unwrap();
        assert_eq!(view.leading_blanks(), 5);
        let cells = view.cells();
        assert_eq!(cells.len(), 5 + 31);
        assert!(cells[..5].iter().all(Option::is_none));
        assert_eq!(cells[5], Some(date("2026-05-01")));
        assert_eq!(cells.last().copied().flatten(), Some(date("2026-05-31")));
    }

    #[test]
    fn month_view_contains() {
        let view = MonthView::new(2025, 6).unwrap();
        assert!(view.contains(date("2025-06-30")));
        assert!(!view.contains(date("2025-07-01")));
        assert!(!view.contains(date("2024-06-15")));
    }

    #[test]
    fn range_flags_match_bounds() {
        let range = RangeBounds::from_strings("2025-06-10", "2025-06-14");
        for day in ["2025-06-11", "2025-06-12", "2025-06-13"] {
            assert!(range.strictly_contains(date(day)), "{day} should be in range");
            assert!(!range.is_edge(date(day)));
        }
        for day in ["2025-06-10", "2025-06-14"] {
            assert!(!range.strictly_contains(date(day)));
            assert!(range.is_edge(date(day)), "{day} should be an edge");
        }
        assert!(!range.strictly_contains(date("2025-06-15")));
        assert!(!range.is_edge(date("2025-06-15")));
    }

    #[test]
    fn single_bound_marks_only_its_edge() {
        let range = RangeBounds::from_strings("2025-06-10", "");
        assert!(range.is_edge(date("2025-06-10")));
        assert!(!range.strictly_contains(date("2025-06-11")));
    }

    #[test]
    fn inverted_range_highlights_nothing() {
        let range = RangeBounds::from_strings("2025-06-14", "2025-06-10");
        assert!(range.is_inverted());
        for day in ["2025-06-10", "2025-06-12", "2025-06-14"] {
            assert!(!range.strictly_contains(date(day)));
            assert!(!range.is_edge(date(day)));
        }
    }

    #[test]
    fn malformed_bounds_are_absent() {
        let range = RangeBounds::from_strings("garbage", "2025-06-14");
        assert_eq!(range.start, None);
        assert!(!range.strictly_contains(date("2025-06-12")));
    }
}
