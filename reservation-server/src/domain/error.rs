//! Reservation error types.
//!
//! Every failure is detected before any seat is mutated and surfaced
//! as a typed result. The display strings are the wire messages
//! clients match on, so changing them is a breaking change.

use super::{BookingRef, SeatId, TrainId};

/// Failures of the reservation protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    /// Request fields blank or absent; lists the offending field names
    #[error("One or more request attributes missing: [{}]", .missing.join(", "))]
    MissingAttributes { missing: Vec<&'static str> },

    /// Referenced train id does not exist in the catalog
    #[error("Train with ID {0} was not found")]
    TrainNotFound(String),

    /// A seat key in the batch does not exist for the train
    #[error("seat not found {0}")]
    SeatNotFound(SeatId),

    /// Seat already held under a different booking reference
    #[error("{seat} on {train} is already booked with reference {held_by}")]
    AlreadyBooked {
        seat: SeatId,
        train: TrainId,
        held_by: BookingRef,
    },
}
