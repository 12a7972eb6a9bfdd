//! Bookings, stays, payments and booking statistics.
//!
//! A booking starts as a *pending* value created from the hotel detail
//! screen, is reviewed on the summary screen, and becomes *confirmed* once the
//! simulated payment completes. Guests and the admin may later cancel it.
//!
//! # Pricing
//!
//! ```text
//! total        = price_per_night × nights
//! taxes        = round(total × 0.1)
//! service fee  = 0
//! grand total  = round(total × 1.1)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{ProtocolError, Result};
use crate::hotel::{Hotel, Room};
use crate::user::UserId;

/// Identifier of a booking, `BK` followed by the creation time in milliseconds.
pub type BookingId = String;

/// Maximum length of a formatted card number (`#### #### #### ####`).
const CARD_NUMBER_MAX_LEN: usize = 19;

/// Maximum length of a formatted expiry (`MM/YY`).
const EXPIRY_MAX_LEN: usize = 5;

/// Maximum number of CVV digits.
const CVV_MAX_LEN: usize = 4;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created but not paid.
    #[default]
    Pending,
    /// Paid and stored.
    Confirmed,
    /// Cancelled by the guest or the admin.
    Cancelled,
}

impl BookingStatus {
    /// Translation key of the status label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Pending => "filter_pending",
            Self::Confirmed => "filter_confirmed",
            Self::Cancelled => "filter_cancelled",
        }
    }
}

/// A validated check-in / check-out pair.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{CalendarDate, Stay};
///
/// let stay = Stay::from_strings("2025-06-10", "2025-06-14").unwrap();
/// assert_eq!(stay.nights(), 4);
///
/// assert!(Stay::from_strings("2025-06-10", "").is_err());
/// assert!(Stay::from_strings("2025-06-14", "2025-06-14").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stay {
    /// Arrival day.
    pub check_in: CalendarDate,
    /// Departure day, strictly after `check_in`.
    pub check_out: CalendarDate,
}

impl Stay {
    /// Validates optional dates into a stay.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingStayDates`] when either date is absent
    /// and [`ProtocolError::CheckOutNotAfterCheckIn`] when check-out is not
    /// strictly later.
    pub fn new(check_in: Option<CalendarDate>, check_out: Option<CalendarDate>) -> Result<Self> {
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return Err(ProtocolError::MissingStayDates);
        };
        if check_out <= check_in {
            return Err(ProtocolError::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Validates canonical date strings into a stay; malformed strings count as absent.
    ///
    /// # Errors
    ///
    /// See [`Stay::new`].
    pub fn from_strings(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(
            CalendarDate::from_canonical(check_in),
            CalendarDate::from_canonical(check_out),
        )
    }

    /// Number of nights, never less than one.
    #[must_use]
    pub fn nights(&self) -> u32 {
        u32::try_from(self.check_in.days_until(self.check_out).max(1)).unwrap_or(u32::MAX)
    }
}

/// Payment method chosen on the payment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// PayPal.
    Paypal,
    /// Bank transfer.
    Bank,
}

impl PaymentMethod {
    /// All methods, in display order.
    pub const ALL: [Self; 3] = [Self::Card, Self::Paypal, Self::Bank];

    /// The next method, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Card => Self::Paypal,
            Self::Paypal => Self::Bank,
            Self::Bank => Self::Card,
        }
    }

    /// The previous method, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Card => Self::Bank,
            Self::Paypal => Self::Card,
            Self::Bank => Self::Paypal,
        }
    }

    /// Translation key of the method label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Bank => "bank",
        }
    }
}

/// What is recorded about a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// The method used.
    pub method: PaymentMethod,
    /// Last four card digits, or `****` when no card number was entered.
    pub last4: String,
}

impl PaymentDetails {
    /// Records a payment, keeping only the last four digits of `card_number`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beiramar_protocol::{PaymentDetails, PaymentMethod};
    ///
    /// let card = PaymentDetails::new(PaymentMethod::Card, "4242 4242 4242 1234");
    /// assert_eq!(card.last4, "1234");
    ///
    /// let paypal = PaymentDetails::new(PaymentMethod::Paypal, "");
    /// assert_eq!(paypal.last4, "****");
    /// ```
    #[must_use]
    pub fn new(method: PaymentMethod, card_number: &str) -> Self {
        let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
        let last4 = if digits.is_empty() {
            "****".to_string()
        } else {
            digits[digits.len().saturating_sub(4)..].iter().collect()
        };
        Self { method, last4 }
    }
}

/// Formats card number input: digits only, grouped by four, at most 19 characters.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::booking::format_card_number;
///
/// assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
/// assert_eq!(format_card_number("4242-42"), "4242 42");
/// ```
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let mut out = String::new();
    for (i, digit) in input.chars().filter(char::is_ascii_digit).enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out.truncate(CARD_NUMBER_MAX_LEN);
    out.trim_end().to_string()
}

/// Formats expiry input as `MM/YY`: digits only, slash after the month.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::booking::format_expiry;
///
/// assert_eq!(format_expiry("1226"), "12/26");
/// assert_eq!(format_expiry("12"), "12");
/// assert_eq!(format_expiry("12/2"), "12/2");
/// ```
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let mut out = if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    };
    out.truncate(EXPIRY_MAX_LEN);
    out
}

/// Keeps at most four CVV digits.
#[must_use]
pub fn sanitize_cvv(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CVV_MAX_LEN)
        .collect()
}

/// Rounds `amount × factor_tenths / 10` to the nearest whole dollar (halves up).
///
/// Saturates instead of overflowing on absurd stored totals.
fn scaled_round(amount: u64, factor_tenths: u64) -> u64 {
    amount.saturating_mul(factor_tenths).saturating_add(5) / 10
}

/// A hotel booking.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::{Booking, BookingStatus, Stay, catalog};
///
/// let hotel = catalog::find(1).unwrap();
/// let room = &hotel.rooms[0];
/// let stay = Stay::from_strings("2025-06-10", "2025-06-14").unwrap();
///
/// let booking = Booking::pending(&hotel, room, stay, 2, 7, chrono::Utc::now());
/// assert_eq!(booking.status, BookingStatus::Pending);
/// assert_eq!(booking.total_price, u64::from(room.price) * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking reference.
    pub id: BookingId,
    /// Booked hotel.
    pub hotel_id: u32,
    /// Hotel name at booking time.
    pub hotel_name: String,
    /// Hotel location at booking time.
    pub hotel_location: String,
    /// Booked room.
    pub room_id: u32,
    /// Room name at booking time.
    pub room_name: String,
    /// Arrival day.
    pub check_in: CalendarDate,
    /// Departure day.
    pub check_out: CalendarDate,
    /// Number of nights.
    pub nights: u32,
    /// Number of guests.
    pub guests: u8,
    /// Room price per night.
    pub price_per_night: u32,
    /// `price_per_night × nights`, before taxes.
    pub total_price: u64,
    /// The guest who booked.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// Payment record, once confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDetails>,
}

impl Booking {
    /// Creates a pending booking for a room and stay.
    #[must_use]
    pub fn pending(
        hotel: &Hotel,
        room: &Room,
        stay: Stay,
        guests: u8,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        let nights = stay.nights();
        Self {
            id: format!("BK{}", now.timestamp_millis()),
            hotel_id: hotel.id,
            hotel_name: hotel.name.clone(),
            hotel_location: hotel.location.clone(),
            room_id: room.id,
            room_name: room.name.clone(),
            check_in: stay.check_in,
            check_out: stay.check_out,
            nights,
            guests,
            price_per_night: room.price,
            total_price: u64::from(room.price) * u64::from(nights),
            user_id,
            status: BookingStatus::Pending,
            created_at: now,
            payment: None,
        }
    }

    /// Taxes, 10% of the total rounded to the dollar.
    #[must_use]
    pub fn taxes(&self) -> u64 {
        scaled_round(self.total_price, 1)
    }

    /// Amount charged: the total plus 10%, rounded to the dollar.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        scaled_round(self.total_price, 11)
    }

    /// Returns the confirmed form of this booking with its payment record.
    #[must_use]
    pub fn confirmed(mut self, payment: PaymentDetails) -> Self {
        self.status = BookingStatus::Confirmed;
        self.payment = Some(payment);
        self
    }
}

/// Status filter of the dashboard and admin booking lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Every booking.
    #[default]
    All,
    /// Only bookings with this status.
    Only(BookingStatus),
}

impl StatusFilter {
    /// All filters, in tab order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Only(BookingStatus::Confirmed),
        Self::Only(BookingStatus::Pending),
        Self::Only(BookingStatus::Cancelled),
    ];

    /// Returns `true` if the booking passes the filter.
    #[must_use]
    pub fn matches(self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => booking.status == status,
        }
    }

    /// The next filter tab, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Translation key of the filter label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::All => "filter_all",
            Self::Only(status) => status.label_key(),
        }
    }
}

/// Aggregate figures over a list of bookings.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::BookingStats;
///
/// let stats = BookingStats::from_bookings(&[]);
/// assert_eq!(stats.total, 0);
/// assert_eq!(stats.revenue, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStats {
    /// Number of bookings.
    pub total: usize,
    /// Number of confirmed bookings.
    pub confirmed: usize,
    /// Number of pending bookings.
    pub pending: usize,
    /// Number of cancelled bookings.
    pub cancelled: usize,
    /// Sum of grand totals of confirmed bookings.
    pub revenue: u64,
}

impl BookingStats {
    /// Computes the figures for the given bookings.
    #[must_use]
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        bookings.iter().fold(Self::default(), |mut stats, b| {
            stats.total += 1;
            match b.status {
                BookingStatus::Confirmed => {
                    stats.confirmed += 1;
                    stats.revenue = stats.revenue.saturating_add(b.grand_total());
                }
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
            }
            stats
        })
    }
}
