//! Seat reservation service.
//!
//! Tracks seat inventory for named trains: clients query seat
//! availability and atomically reserve batches of seats under a
//! caller-supplied booking reference.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod web;
