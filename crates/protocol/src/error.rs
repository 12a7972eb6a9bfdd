//! Error types for the beiramar-protocol crate.
//!
//! This module defines the validation errors raised by protocol types, such
//! as malformed dates and inconsistent stay or registration input.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A string was not a canonical `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A stay was requested without both check-in and check-out dates.
    #[error("please select check-in and check-out dates")]
    MissingStayDates,

    /// The check-out date is on or before the check-in date.
    #[error("check-out must be after check-in")]
    CheckOutNotAfterCheckIn,

    /// The password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The password is shorter than the required minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// The minimum accepted length.
        min: usize,
    },

    /// No hotel with the given identifier exists in the catalog.
    #[error("hotel not found: {0}")]
    HotelNotFound(u32),

    /// The hotel has no room with the given identifier.
    #[error("room {room} not found in hotel {hotel}")]
    RoomNotFound {
        /// The hotel that was searched.
        hotel: u32,
        /// The missing room identifier.
        room: u32,
    },
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::CheckOutNotAfterCheckIn;
        assert_eq!(err.to_string(), "check-out must be after check-in");

        let err = ProtocolError::PasswordTooShort { min: 6 };
        assert_eq!(err.to_string(), "password must be at least 6 characters");

        let err = ProtocolError::RoomNotFound { hotel: 2, room: 9 };
        assert_eq!(err.to_string(), "room 9 not found in hotel 2");
    }
}
