//! Seed catalog loading.
//!
//! The catalog ships as a JSON file keyed by train id. Each train
//! holds a `seats` object keyed by flat seat key:
//!
//! ```json
//! {
//!   "express_2000": {
//!     "seats": {
//!       "1A": {"coach": "A", "seat_number": "1", "booking_reference": ""}
//!     }
//!   }
//! }
//! ```
//!
//! Every entry's key must equal the concatenation of its seat number
//! and coach; anything else is a malformed file, rejected up front so
//! the catalog never starts from inconsistent data.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{BookingRef, Seat, SeatId, Train, TrainError, TrainId};

use super::Catalog;

/// Errors reading or validating the seed catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not the expected JSON shape
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Train id is blank
    #[error("invalid train id {0:?}")]
    InvalidTrainId(String),

    /// Seat entry key disagrees with its seat_number/coach fields
    #[error(
        "train {train}: seat key {key:?} does not match seat_number={seat_number:?} coach={coach:?}"
    )]
    SeatKeyMismatch {
        train: String,
        key: String,
        seat_number: String,
        coach: String,
    },

    /// Seat entry has a blank coach or seat number
    #[error("train {train}: seat {key:?} has a blank coach or seat number")]
    InvalidSeat { train: String, key: String },

    /// Seat entry has a whitespace-only booking reference
    #[error("train {train}: seat {key:?} has an invalid booking reference")]
    InvalidBooking { train: String, key: String },

    /// Train-level structural error (duplicate keys)
    #[error("train {train}: {source}")]
    Train { train: String, source: TrainError },
}

#[derive(Debug, Deserialize)]
struct SeatEntry {
    coach: String,
    seat_number: String,
    #[serde(default)]
    booking_reference: String,
}

#[derive(Debug, Deserialize)]
struct TrainEntry {
    seats: BTreeMap<String, SeatEntry>,
}

/// Parse a catalog from the seed JSON document.
pub fn parse_catalog(json: &str) -> Result<Catalog, LoadError> {
    let file: BTreeMap<String, TrainEntry> = serde_json::from_str(json)?;

    let mut trains = Vec::with_capacity(file.len());
    for (train_id, entry) in file {
        let id = TrainId::parse(&train_id)
            .map_err(|_| LoadError::InvalidTrainId(train_id.clone()))?;

        let mut seats = Vec::with_capacity(entry.seats.len());
        for (key, seat) in entry.seats {
            let derived = SeatId::from_parts(&seat.seat_number, &seat.coach).map_err(|_| {
                LoadError::InvalidSeat {
                    train: train_id.clone(),
                    key: key.clone(),
                }
            })?;
            if derived.as_str() != key {
                return Err(LoadError::SeatKeyMismatch {
                    train: train_id,
                    key,
                    seat_number: seat.seat_number,
                    coach: seat.coach,
                });
            }

            let seat = if seat.booking_reference.is_empty() {
                Seat::free(seat.seat_number, seat.coach)
            } else {
                let reference = BookingRef::parse(&seat.booking_reference).map_err(|_| {
                    LoadError::InvalidBooking {
                        train: train_id.clone(),
                        key: key.clone(),
                    }
                })?;
                Seat::booked(seat.seat_number, seat.coach, reference)
            };
            seats.push(seat);
        }

        let train = Train::new(id, seats).map_err(|source| LoadError::Train {
            train: train_id.clone(),
            source,
        })?;
        trains.push(train);
    }

    Ok(Catalog::new(trains))
}

/// Load a catalog from a seed file on disk.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    let json = std::fs::read_to_string(path)?;
    parse_catalog(&json)
}
