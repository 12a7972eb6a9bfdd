//! Widget components for the beiramar TUI.
//!
//! Each widget is a rendering function that draws state into a buffer, in
//! the same `render_*(…, area, buf)` shape, so screens can compose them and
//! tests can render them into a plain [`Buffer`](ratatui::buffer::Buffer).
//!
//! # Modules
//!
//! - [`button`]: bordered buttons and arrow selectors
//! - [`date_picker`]: the popover calendar and its trigger
//! - [`help`]: the key binding overlay
//! - [`text_field`]: editable single-line inputs
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use beiramar_tui::widgets;
//!
//! let area = Rect::new(0, 0, 20, 3);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_button("Search", true, true, area, &mut buf);
//! ```

pub mod button;
pub mod date_picker;
pub mod help;
pub mod text_field;

pub use button::{render_button, render_choice};
pub use date_picker::{DatePickerState, PickerProps, render_date_popover, render_date_trigger};
pub use help::render_help_overlay;
pub use text_field::{TextInput, render_text_field};
