//! Booking reference type.

use std::fmt;

/// Error returned when parsing an invalid booking reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid booking reference: {reason}")]
pub struct InvalidBookingRef {
    reason: &'static str,
}

/// An opaque, caller-supplied booking reference.
///
/// References are handed out by an external service; this type only
/// guarantees the string is non-blank. An unreserved seat carries no
/// `BookingRef` at all; the empty string never appears inside one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BookingRef(String);

impl BookingRef {
    /// Parse a booking reference from a string.
    ///
    /// The input must contain at least one non-whitespace character.
    pub fn parse(s: &str) -> Result<Self, InvalidBookingRef> {
        if s.trim().is_empty() {
            return Err(InvalidBookingRef {
                reason: "must not be blank",
            });
        }
        Ok(BookingRef(s.to_string()))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BookingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookingRef({})", self.0)
    }
}

impl fmt::Display for BookingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
