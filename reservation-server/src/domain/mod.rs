//! Domain types for the seat reservation service.
//!
//! This module contains the core domain model: validated identifier
//! types, the seat and train data structures, and the reservation
//! error taxonomy. All identifier types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod booking;
mod error;
mod seat;
mod train;

pub use booking::{BookingRef, InvalidBookingRef};
pub use error::ReservationError;
pub use seat::{InvalidSeatId, Seat, SeatId};
pub use train::{InvalidTrainId, Train, TrainError, TrainId};
