//! Paired check-in and check-out pickers.
//!
//! The search form and the hotel page both ask for a stay the same way: the
//! check-in picker may not go before today, the check-out picker may not go
//! before the check-in (or today while check-in is unset), and both highlight
//! the range between the two values.

use beiramar_protocol::{CalendarDate, Message};
use ratatui::{buffer::Buffer, layout::Rect};
use tracing::debug;

use super::Ctx;
use crate::widgets::date_picker::{
    DatePickerState, PickerProps, render_date_popover, render_date_trigger,
};

/// One of the two pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayField {
    /// Arrival day.
    CheckIn,
    /// Departure day.
    CheckOut,
}

/// Check-in and check-out values with their pickers.
#[derive(Debug)]
pub struct StayDates {
    check_in: String,
    check_out: String,
    check_in_picker: DatePickerState,
    check_out_picker: DatePickerState,
}

fn stay_props<'a>(
    field: StayField,
    check_in: &'a str,
    check_out: &'a str,
    today: &'a str,
) -> PickerProps<'a> {
    match field {
        StayField::CheckIn => PickerProps::new(check_in)
            .min(today)
            .range(check_in, check_out),
        StayField::CheckOut => {
            let min = if check_in.is_empty() { today } else { check_in };
            PickerProps::new(check_out)
                .min(min)
                .range(check_in, check_out)
        }
    }
}

impl StayDates {
    /// Both values unset, both pickers showing the month of `today`.
    #[must_use]
    pub fn new(today: CalendarDate) -> Self {
        Self {
            check_in: String::new(),
            check_out: String::new(),
            check_in_picker: DatePickerState::new("", today),
            check_out_picker: DatePickerState::new("", today),
        }
    }

    /// The check-in value, canonical or empty.
    #[must_use]
    pub fn check_in(&self) -> &str {
        &self.check_in
    }

    /// The check-out value, canonical or empty.
    #[must_use]
    pub fn check_out(&self) -> &str {
        &self.check_out
    }

    /// Overwrites a value, as the owning form does with picker changes.
    pub fn set(&mut self, field: StayField, value: impl Into<String>) {
        let value = value.into();
        debug!(?field, %value, "stay date changed");
        match field {
            StayField::CheckIn => self.check_in = value,
            StayField::CheckOut => self.check_out = value,
        }
    }

    /// The picker state of one field.
    #[must_use]
    pub fn picker(&self, field: StayField) -> &DatePickerState {
        match field {
            StayField::CheckIn => &self.check_in_picker,
            StayField::CheckOut => &self.check_out_picker,
        }
    }

    /// The field whose popover is open, if any.
    #[must_use]
    pub fn open_field(&self) -> Option<StayField> {
        [StayField::CheckIn, StayField::CheckOut]
            .into_iter()
            .find(|field| self.picker(*field).is_open())
    }

    /// Returns `true` while either popover is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open_field().is_some()
    }

    /// Activates the trigger of `field`.
    pub fn toggle(&mut self, field: StayField, ctx: &Ctx<'_>) {
        let viewport = ctx.viewport;
        let listeners = ctx.listeners;
        let today = ctx.today;
        self.interact(field, today, |picker, props| {
            picker.toggle(props, viewport, listeners, today);
            None
        });
    }

    /// Closes any open popover.
    pub fn dismiss(&mut self) {
        self.check_in_picker.dismiss();
        self.check_out_picker.dismiss();
    }

    /// Routes a keyboard message to the open popover.
    ///
    /// Returns `false` when no popover is open and the message was not used.
    pub fn handle_message(&mut self, msg: &Message, ctx: &Ctx<'_>) -> bool {
        let Some(field) = self.open_field() else {
            return false;
        };
        if matches!(msg, Message::NextField | Message::PrevField) {
            self.dismiss();
            return false;
        }
        self.interact(field, ctx.today, |picker, props| {
            picker.handle_message(msg, props)
        });
        true
    }

    /// Lets open popovers see a pointer press before it becomes a click.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        self.check_in_picker.handle_pointer_down(column, row);
        self.check_out_picker.handle_pointer_down(column, row);
    }

    /// Handles a click on an open popover.
    ///
    /// Returns `true` when the click landed inside a popover.
    pub fn click(&mut self, column: u16, row: u16, ctx: &Ctx<'_>) -> bool {
        let Some(field) = self.open_field() else {
            return false;
        };
        if self.picker(field).hit_test(column, row).is_none() {
            return false;
        }
        self.interact(field, ctx.today, |picker, props| {
            picker.click(column, row, props)
        });
        true
    }

    /// The field whose trigger lies under the position.
    #[must_use]
    pub fn trigger_at(&self, column: u16, row: u16) -> Option<StayField> {
        [StayField::CheckIn, StayField::CheckOut]
            .into_iter()
            .find(|field| self.picker(*field).trigger_contains(column, row))
    }

    /// Draws the trigger of `field`, using `label` as title and placeholder.
    pub fn render_trigger(
        &mut self,
        field: StayField,
        label: &str,
        focused: bool,
        ctx: &Ctx<'_>,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let today = ctx.today.to_string();
        let Self {
            check_in,
            check_out,
            check_in_picker,
            check_out_picker,
        } = self;
        let picker = match field {
            StayField::CheckIn => check_in_picker,
            StayField::CheckOut => check_out_picker,
        };
        let props =
            stay_props(field, check_in.as_str(), check_out.as_str(), &today).placeholder(label);
        render_date_trigger(picker, &props, label, focused, area, buf);
    }

    /// Draws the open popover, if any.
    pub fn render_overlay(&self, ctx: &Ctx<'_>, buf: &mut Buffer) {
        let Some(field) = self.open_field() else {
            return;
        };
        let today = ctx.today.to_string();
        let props = stay_props(field, &self.check_in, &self.check_out, &today);
        render_date_popover(self.picker(field), &props, ctx.lang, buf);
    }

    fn interact(
        &mut self,
        field: StayField,
        today: CalendarDate,
        f: impl FnOnce(&mut DatePickerState, &PickerProps<'_>) -> Option<String>,
    ) {
        let today = today.to_string();
        let changed = {
            let Self {
                check_in,
                check_out,
                check_in_picker,
                check_out_picker,
            } = self;
            let picker = match field {
                StayField::CheckIn => check_in_picker,
                StayField::CheckOut => check_out_picker,
            };
            f(
                picker,
                &stay_props(field, check_in.as_str(), check_out.as_str(), &today),
            )
        };
        if let Some(value) = changed {
            self.set(field, value);
        }
    }
}
