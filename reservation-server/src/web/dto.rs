//! Data transfer objects for web responses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Train;

/// A train document: every seat keyed by its flat seat key.
#[derive(Debug, Serialize)]
pub struct TrainDocument {
    /// Seat state, keyed by seat key (e.g. "1A")
    pub seats: BTreeMap<String, SeatDocument>,
}

/// A single seat in a train document.
#[derive(Debug, Serialize)]
pub struct SeatDocument {
    /// Holding reference, or `""` when the seat is unreserved
    pub booking_reference: String,

    /// Seat number within the coach
    pub seat_number: String,

    /// Coach label
    pub coach: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl TrainDocument {
    /// Create from a domain Train snapshot.
    pub fn from_train(train: &Train) -> Self {
        let seats = train
            .seats()
            .map(|(key, seat)| {
                (
                    key.as_str().to_string(),
                    SeatDocument {
                        booking_reference: seat
                            .booking()
                            .map(|r| r.as_str().to_string())
                            .unwrap_or_default(),
                        seat_number: seat.seat_number.clone(),
                        coach: seat.coach.clone(),
                    },
                )
            })
            .collect();

        Self { seats }
    }
}

/// Decode the `seats` form field: a JSON-encoded list of seat keys
/// (e.g. `["1A", "2B"]`).
pub fn decode_seat_list(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(raw)
}
