//! Seat types.

use std::fmt;

use super::BookingRef;

/// Error returned when parsing an invalid seat key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid seat key: {reason}")]
pub struct InvalidSeatId {
    reason: &'static str,
}

/// A seat key: the seat number concatenated with the coach label.
///
/// Seat number `"1"` in coach `"A"` has the key `"1A"`. Keys are
/// unique within a train; `Train` enforces this at construction.
///
/// # Examples
///
/// ```
/// use reservation_server::domain::SeatId;
///
/// let key = SeatId::parse("1A").unwrap();
/// assert_eq!(key.as_str(), "1A");
///
/// let derived = SeatId::from_parts("1", "A").unwrap();
/// assert_eq!(derived, key);
///
/// // Blank keys are rejected
/// assert!(SeatId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId(String);

impl SeatId {
    /// Parse a seat key from a string.
    ///
    /// The input must contain at least one non-whitespace character.
    pub fn parse(s: &str) -> Result<Self, InvalidSeatId> {
        if s.trim().is_empty() {
            return Err(InvalidSeatId {
                reason: "must not be blank",
            });
        }
        Ok(SeatId(s.to_string()))
    }

    /// Derive the key for a seat from its number and coach label.
    ///
    /// Both parts must be non-blank.
    pub fn from_parts(seat_number: &str, coach: &str) -> Result<Self, InvalidSeatId> {
        if seat_number.trim().is_empty() {
            return Err(InvalidSeatId {
                reason: "seat number must not be blank",
            });
        }
        if coach.trim().is_empty() {
            return Err(InvalidSeatId {
                reason: "coach must not be blank",
            });
        }
        Ok(SeatId(format!("{seat_number}{coach}")))
    }

    /// Returns the seat key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeatId({})", self.0)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single seat on a train.
///
/// The booking field is private: seat state changes only through
/// `Train::apply_booking` and `Train::clear_bookings`, so a seat is
/// always either fully free or fully held by one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    /// Coach label (e.g. "A")
    pub coach: String,

    /// Seat number within the coach (e.g. "1")
    pub seat_number: String,

    booking: Option<BookingRef>,
}

impl Seat {
    /// Create an unreserved seat.
    pub fn free(seat_number: impl Into<String>, coach: impl Into<String>) -> Self {
        Self {
            coach: coach.into(),
            seat_number: seat_number.into(),
            booking: None,
        }
    }

    /// Create a seat already held under a booking reference.
    pub fn booked(
        seat_number: impl Into<String>,
        coach: impl Into<String>,
        reference: BookingRef,
    ) -> Self {
        Self {
            coach: coach.into(),
            seat_number: seat_number.into(),
            booking: Some(reference),
        }
    }

    /// The reference currently holding this seat, if any.
    pub fn booking(&self) -> Option<&BookingRef> {
        self.booking.as_ref()
    }

    /// Whether the seat is unreserved.
    pub fn is_free(&self) -> bool {
        self.booking.is_none()
    }

    pub(crate) fn set_booking(&mut self, booking: Option<BookingRef>) {
        self.booking = booking;
    }
}
