//! Train types.
//!
//! A `Train` is an identifier plus its seats, keyed by derived seat
//! key. The seat set is fixed once the train is constructed; only the
//! per-seat booking state changes afterwards, and only through the
//! crate-internal mutation methods.

use std::collections::BTreeMap;
use std::fmt;

use super::{BookingRef, InvalidSeatId, Seat, SeatId};

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// A train identifier, unique across the catalog.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrainId(String);

impl TrainId {
    /// Parse a train identifier from a string.
    ///
    /// The input must contain at least one non-whitespace character.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        if s.trim().is_empty() {
            return Err(InvalidTrainId {
                reason: "must not be blank",
            });
        }
        Ok(TrainId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors constructing a train from its seats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainError {
    /// Two seats derive the same key within one train
    #[error("train {train} has duplicate seat key {seat}")]
    DuplicateSeat { train: TrainId, seat: SeatId },

    /// A seat has a blank coach or seat number
    #[error("train {train} has a seat with an invalid key: {source}")]
    InvalidSeat {
        train: TrainId,
        source: InvalidSeatId,
    },
}

/// A train and its seats.
///
/// Seats are held in key order so snapshots serialize
/// deterministically. `Train` is cheaply cloneable; a clone taken
/// under the owning lock is the snapshot type every operation
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    id: TrainId,
    seats: BTreeMap<SeatId, Seat>,
}

impl Train {
    /// Build a train from its seats, deriving each seat's key.
    ///
    /// Fails if any seat has a blank coach or number, or if two seats
    /// derive the same key.
    pub fn new(id: TrainId, seats: impl IntoIterator<Item = Seat>) -> Result<Self, TrainError> {
        let mut by_key = BTreeMap::new();
        for seat in seats {
            let key = SeatId::from_parts(&seat.seat_number, &seat.coach).map_err(|source| {
                TrainError::InvalidSeat {
                    train: id.clone(),
                    source,
                }
            })?;
            if by_key.insert(key.clone(), seat).is_some() {
                return Err(TrainError::DuplicateSeat {
                    train: id.clone(),
                    seat: key,
                });
            }
        }
        Ok(Self { id, seats: by_key })
    }

    /// The train's identifier.
    pub fn id(&self) -> &TrainId {
        &self.id
    }

    /// Look up a seat by key.
    pub fn seat(&self, key: &SeatId) -> Option<&Seat> {
        self.seats.get(key)
    }

    /// All seats in key order.
    pub fn seats(&self) -> impl Iterator<Item = (&SeatId, &Seat)> {
        self.seats.iter()
    }

    /// Number of seats on the train.
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Set the booking reference on every named seat.
    ///
    /// Callers must have resolved and conflict-checked the whole batch
    /// first; keys that do not resolve are skipped.
    pub(crate) fn apply_booking(&mut self, keys: &[SeatId], reference: &BookingRef) {
        for key in keys {
            if let Some(seat) = self.seats.get_mut(key) {
                seat.set_booking(Some(reference.clone()));
            }
        }
    }

    /// Clear the booking reference on every seat.
    pub(crate) fn clear_bookings(&mut self) {
        for seat in self.seats.values_mut() {
            seat.set_booking(None);
        }
    }
}
