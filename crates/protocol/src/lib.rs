//! Shared protocol types for the beiramar application.
//!
//! This crate defines the domain types used across all beiramar components:
//! calendar dates and month views, the hotel catalog, bookings, user
//! accounts, translations, TUI messages, and error types.
//!
//! # Overview
//!
//! - [`date`]: `CalendarDate`, `MonthView` and `RangeBounds`
//! - [`hotel`]: hotels, rooms, search filters and sort orders
//! - [`catalog`]: the built-in hotel list
//! - [`booking`]: stays, bookings, payments and statistics
//! - [`user`]: accounts, roles and registration checks
//! - [`i18n`]: interface languages and translated texts
//! - [`message`]: TUI event messages
//! - [`error`]: error types for protocol operations
//!
//! # Examples
//!
//! Searching the catalog and pricing a stay:
//!
//! ```
//! use beiramar_protocol::{Booking, HotelQuery, SortOrder, Stay, catalog};
//!
//! let hotels = catalog::hotels();
//! let query = HotelQuery {
//!     sort: SortOrder::PriceAsc,
//!     ..HotelQuery::with_text("paris")
//! };
//! let results = query.apply(&hotels);
//! assert!(!results.is_empty());
//!
//! let hotel = results[0];
//! let stay = Stay::from_strings("2025-06-10", "2025-06-12").unwrap();
//! let booking = Booking::pending(hotel, &hotel.rooms[0], stay, 2, 1, chrono::Utc::now());
//! assert_eq!(booking.nights, 2);
//! assert_eq!(booking.grand_total(), (booking.total_price * 11 + 5) / 10);
//! ```

pub mod booking;
pub mod catalog;
pub mod date;
pub mod error;
pub mod hotel;
pub mod i18n;
pub mod message;
pub mod user;

// Re-export primary types at crate root for convenience
pub use booking::{
    Booking, BookingId, BookingStats, BookingStatus, PaymentDetails, PaymentMethod, Stay,
    StatusFilter,
};
pub use date::{CalendarDate, MonthView, RangeBounds};
pub use error::{ProtocolError, Result};
pub use hotel::{Hotel, HotelQuery, Room, SortOrder};
pub use i18n::Language;
pub use message::Message;
pub use user::{Role, User, UserId, UserRecord};
