//! Terminal UI for the beiramar hotel booking demo.
//!
//! This crate provides a Ratatui-based interface for searching the hotel
//! catalog, booking a stay with the popover date picker, paying, and
//! reviewing bookings as a guest or as the administrator.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Routes, access rules and session state
//! - [`screens`]: One state machine per page of the booking flow
//! - [`listener`]: Scoped registration of outside-click listeners
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use beiramar_config::Config;
//! use beiramar_store::Storage;
//! use beiramar_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let config = Config::load()?;
//!     let storage = Storage::open(config.storage_dir()?)?;
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(config, storage);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod listener;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use state::{AppState, Route};
