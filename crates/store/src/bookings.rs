//! Confirmed bookings.

use beiramar_protocol::{Booking, BookingStatus, PaymentDetails, UserId};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::kv::{read_json, write_json};
use crate::{BOOKINGS_KEY, Storage};

impl Storage {
    /// Every stored booking, in confirmation order; an absent list reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read or parsed.
    pub fn all_bookings(&self) -> Result<Vec<Booking>> {
        Ok(read_json(self.kv(), BOOKINGS_KEY)?.unwrap_or_default())
    }

    /// The bookings of one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read or parsed.
    pub fn user_bookings(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let mut bookings = self.all_bookings()?;
        bookings.retain(|b| b.user_id == user_id);
        Ok(bookings)
    }

    /// Confirms a pending booking with its payment and appends it to the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read or written.
    #[instrument(skip(self, pending, payment), fields(booking = %pending.id))]
    pub fn confirm_booking(&self, pending: Booking, payment: PaymentDetails) -> Result<Booking> {
        let confirmed = pending.confirmed(payment);
        let mut bookings = self.all_bookings()?;
        bookings.push(confirmed.clone());
        write_json(self.kv(), BOOKINGS_KEY, &bookings)?;

        info!(total = confirmed.grand_total(), "booking confirmed");
        Ok(confirmed)
    }

    /// Marks a booking as cancelled; unknown identifiers change nothing.
    ///
    /// Returns `true` if a booking was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read or written.
    #[instrument(skip(self))]
    pub fn cancel_booking(&self, booking_id: &str) -> Result<bool> {
        let mut bookings = self.all_bookings()?;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) else {
            debug!("no booking with this id");
            return Ok(false);
        };
        booking.status = BookingStatus::Cancelled;
        write_json(self.kv(), BOOKINGS_KEY, &bookings)?;

        info!("booking cancelled");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beiramar_protocol::{PaymentMethod, Stay, catalog};
    use chrono::{TimeZone, Utc};

    fn pending(user_id: UserId, second: u32) -> Booking {
        let hotel = catalog::find(2).unwrap();
        let stay = Stay::from_strings("2025-06-10", "2025-06-12").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, second).unwrap();
        Booking::pending(&hotel, &hotel.rooms[1], stay, 2, user_id, now)
    }

    fn card() -> PaymentDetails {
        PaymentDetails::new(PaymentMethod::Card, "4242 4242 4242 9876")
    }

    #[test]
    fn no_bookings_reads_empty() {
        let storage = Storage::in_memory();
        assert!(storage.all_bookings().unwrap().is_empty());
    }

    #[test]
    fn confirm_appends_confirmed_booking() {
        let storage = Storage::in_memory();
        let confirmed = storage.confirm_booking(pending(7, 0), card()).unwrap();

        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.payment.as_ref().unwrap().last4, "9876");
        assert_eq!(storage.all_bookings().unwrap(), vec![confirmed]);
    }

    #[test]
    fn user_bookings_filters_by_owner() {
        let storage = Storage::in_memory();
        storage.confirm_booking(pending(7, 0), card()).unwrap();
        storage.confirm_booking(pending(8, 1), card()).unwrap();
        storage.confirm_booking(pending(7, 2), card()).unwrap();

        let mine = storage.user_bookings(7).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|b| b.user_id == 7));
        assert_eq!(storage.all_bookings().unwrap().len(), 3);
    }

    #[test]
    fn cancel_marks_only_matching_booking() {
        let storage = Storage::in_memory();
        let first = storage.confirm_booking(pending(7, 0), card()).unwrap();
        let second = storage.confirm_booking(pending(7, 1), card()).unwrap();

        assert!(storage.cancel_booking(&first.id).unwrap());
        let all = storage.all_bookings().unwrap();
        assert_eq!(all[0].status, BookingStatus::Cancelled);
        assert_eq!(all[1].id, second.id);
        assert_eq!(all[1].status, BookingStatus::Confirmed);
    }

    #[test]
    fn cancel_unknown_id_is_noop() {
        let storage = Storage::in_memory();
        storage.confirm_booking(pending(7, 0), card()).unwrap();
        assert!(!storage.cancel_booking("BK0").unwrap());
        assert_eq!(
            storage.all_bookings().unwrap()[0].status,
            BookingStatus::Confirmed
        );
    }
}
