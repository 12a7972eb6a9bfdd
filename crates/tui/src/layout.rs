//! Centralized layout measurements for the TUI.
//!
//! This module defines shared constants for layout dimensions used across
//! the app frame and the screens.

/// Height of the header bar in rows.
///
/// The header displays the title, the navigation links and the help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status line under the page.
pub const STATUS_HEIGHT: u16 = 1;

/// Minimum terminal height for useful rendering (page and status line).
///
/// The search screen needs the most: hero, form row, and three featured
/// hotel cards.
pub const MIN_HEIGHT: u16 = 20;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The search form row holds five fields side by side.
pub const MIN_WIDTH: u16 = 80;
