//! The reservation engine.
//!
//! The only path that mutates seat state. Reservation is two-phase:
//! the whole batch is resolved and conflict-checked under the train's
//! write lock before any seat is written, so a batch either applies in
//! full or not at all. Holding the write lock for the entire
//! validate-then-apply sequence makes `reserve` and `reset` on the
//! same train mutually exclusive; trains lock independently, so
//! traffic on one train never blocks another.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::domain::{BookingRef, ReservationError, SeatId, Train, TrainId};

/// A reservation command as received from the adapter layer.
///
/// Fields are raw strings; `reserve` performs the validation.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub train_id: String,
    pub seats: Vec<String>,
    pub booking_reference: String,
}

/// Operations over the catalog: lookup, reserve, reset.
pub struct ReservationEngine {
    catalog: Arc<Catalog>,
}

impl ReservationEngine {
    /// Create an engine over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Reserve a batch of seats under one booking reference.
    ///
    /// A seat is eligible when it is free or already held by the same
    /// reference, so repeating a reservation is a no-op success and a
    /// caller can extend its own booking. If any seat in the batch is
    /// unknown or held by a different reference the whole request is
    /// rejected and nothing is written.
    ///
    /// Returns the train's full seat state after the reservation.
    pub async fn reserve(
        &self,
        request: &ReservationRequest,
    ) -> Result<Train, ReservationError> {
        let (train_id, seat_ids, reference) = validate(request)?;

        let cell = self
            .catalog
            .train(&train_id)
            .ok_or_else(|| ReservationError::TrainNotFound(train_id.as_str().to_string()))?;

        let mut train = cell.write().await;

        // Resolve the whole batch before inspecting booking state.
        for seat_id in &seat_ids {
            if train.seat(seat_id).is_none() {
                return Err(ReservationError::SeatNotFound(seat_id.clone()));
            }
        }

        for seat_id in &seat_ids {
            if let Some(held) = train.seat(seat_id).and_then(|seat| seat.booking()) {
                if held != &reference {
                    return Err(ReservationError::AlreadyBooked {
                        seat: seat_id.clone(),
                        train: train_id.clone(),
                        held_by: held.clone(),
                    });
                }
            }
        }

        train.apply_booking(&seat_ids, &reference);
        debug!(
            "reserved {} seat(s) on {} under reference {}",
            seat_ids.len(),
            train_id,
            reference
        );

        Ok(train.clone())
    }

    /// Clear every booking on a train.
    ///
    /// Unconditional and idempotent. Returns the cleared seat state.
    pub async fn reset(&self, train_id: &str) -> Result<Train, ReservationError> {
        let cell = self.train_cell(train_id)?;
        let mut train = cell.write().await;
        train.clear_bookings();
        info!("cleared all bookings on {}", train.id());
        Ok(train.clone())
    }

    /// Current seat state of a train.
    pub async fn train_data(&self, train_id: &str) -> Result<Train, ReservationError> {
        let cell = self.train_cell(train_id)?;
        let train = cell.read().await;
        Ok(train.clone())
    }

    fn train_cell(&self, train_id: &str) -> Result<&RwLock<Train>, ReservationError> {
        TrainId::parse(train_id)
            .ok()
            .and_then(|id| self.catalog.train(&id))
            .ok_or_else(|| ReservationError::TrainNotFound(train_id.to_string()))
    }
}

/// Check the raw request fields, naming every missing one.
///
/// Field names appear in the error in request order: `train_id`,
/// `seats`, `booking_reference`. A seat list that is empty or contains
/// a blank entry counts as a missing `seats` field.
fn validate(
    request: &ReservationRequest,
) -> Result<(TrainId, Vec<SeatId>, BookingRef), ReservationError> {
    let mut missing = Vec::new();

    let train_id = TrainId::parse(&request.train_id).ok();
    if train_id.is_none() {
        missing.push("train_id");
    }

    let mut seat_ids = Vec::with_capacity(request.seats.len());
    let mut seats_valid = !request.seats.is_empty();
    for raw in &request.seats {
        match SeatId::parse(raw) {
            Ok(seat_id) => seat_ids.push(seat_id),
            Err(_) => {
                seats_valid = false;
                break;
            }
        }
    }
    if !seats_valid {
        missing.push("seats");
    }

    let reference = BookingRef::parse(&request.booking_reference).ok();
    if reference.is_none() {
        missing.push("booking_reference");
    }

    match (train_id, reference) {
        (Some(train_id), Some(reference)) if seats_valid => Ok((train_id, seat_ids, reference)),
        _ => Err(ReservationError::MissingAttributes { missing }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Seat;

    fn catalog() -> Arc<Catalog> {
        let express = Train::new(
            TrainId::parse("express_2000").unwrap(),
            vec![
                Seat::free("1", "A"),
                Seat::free("2", "A"),
                Seat::free("1", "B"),
                Seat::free("2", "B"),
            ],
        )
        .unwrap();
        let local = Train::new(
            TrainId::parse("local_1000").unwrap(),
            vec![Seat::free("1", "A"), Seat::free("2", "A")],
        )
        .unwrap();
        Arc::new(Catalog::new([express, local]))
    }

    fn engine() -> ReservationEngine {
        ReservationEngine::new(catalog())
    }

    fn request(train_id: &str, seats: &[&str], reference: &str) -> ReservationRequest {
        ReservationRequest {
            train_id: train_id.to_string(),
            seats: seats.iter().map(|s| s.to_string()).collect(),
            booking_reference: reference.to_string(),
        }
    }

    fn booking_of(train: &Train, key: &str) -> Option<String> {
        train
            .seat(&SeatId::parse(key).unwrap())
            .and_then(|seat| seat.booking())
            .map(|r| r.as_str().to_string())
    }

    #[tokio::test]
    async fn reserving_free_seats_succeeds() {
        let engine = engine();

        let snapshot = engine
            .reserve(&request("express_2000", &["1A", "2B"], "1"))
            .await
            .unwrap();

        assert_eq!(booking_of(&snapshot, "1A"), Some("1".into()));
        assert_eq!(booking_of(&snapshot, "2B"), Some("1".into()));
        // The snapshot covers the whole train, untouched seats included.
        assert_eq!(snapshot.seat_count(), 4);
        assert_eq!(booking_of(&snapshot, "2A"), None);
    }

    #[tokio::test]
    async fn reservation_is_idempotent() {
        let engine = engine();
        let req = request("express_2000", &["1A", "2B"], "1");

        let first = engine.reserve(&req).await.unwrap();
        let second = engine.reserve(&req).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn different_reference_is_rejected() {
        let engine = engine();
        engine
            .reserve(&request("express_2000", &["1A", "2B"], "1"))
            .await
            .unwrap();

        let err = engine
            .reserve(&request("express_2000", &["2B"], "2"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "2B on express_2000 is already booked with reference 1"
        );

        // The seat stays with the original holder.
        let snapshot = engine.train_data("express_2000").await.unwrap();
        assert_eq!(booking_of(&snapshot, "2B"), Some("1".into()));
    }

    #[tokio::test]
    async fn same_reference_batch_can_extend_booking() {
        let engine = engine();
        engine
            .reserve(&request("express_2000", &["1A"], "7"))
            .await
            .unwrap();

        // 1A is already ours, 2B is free: the batch succeeds.
        let snapshot = engine
            .reserve(&request("express_2000", &["1A", "2B"], "7"))
            .await
            .unwrap();

        assert_eq!(booking_of(&snapshot, "1A"), Some("7".into()));
        assert_eq!(booking_of(&snapshot, "2B"), Some("7".into()));
    }

    #[tokio::test]
    async fn unknown_seat_is_rejected() {
        let engine = engine();

        let err = engine
            .reserve(&request("express_2000", &["1D"], "1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "seat not found 1D");
    }

    #[tokio::test]
    async fn batch_with_unknown_seat_mutates_nothing() {
        let engine = engine();
        let before = engine.train_data("express_2000").await.unwrap();

        let err = engine
            .reserve(&request("express_2000", &["1A", "9Z"], "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::SeatNotFound(_)));

        let after = engine.train_data("express_2000").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn batch_with_conflict_mutates_nothing() {
        let engine = engine();
        engine
            .reserve(&request("express_2000", &["2B"], "1"))
            .await
            .unwrap();
        let before = engine.train_data("express_2000").await.unwrap();

        let err = engine
            .reserve(&request("express_2000", &["1A", "2B"], "2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::AlreadyBooked { .. }));

        // 1A was eligible but must not have been written.
        let after = engine.train_data("express_2000").await.unwrap();
        assert_eq!(before, after);
        assert_eq!(booking_of(&after, "1A"), None);
    }

    #[tokio::test]
    async fn unknown_train_is_rejected() {
        let engine = engine();

        let err = engine
            .reserve(&request("ghost_900", &["1A"], "1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Train with ID ghost_900 was not found");
    }

    #[tokio::test]
    async fn missing_attributes_are_enumerated() {
        let engine = engine();

        let err = engine.reserve(&request("", &[], "")).await.unwrap_err();
        assert_eq!(
            err,
            ReservationError::MissingAttributes {
                missing: vec!["train_id", "seats", "booking_reference"],
            }
        );

        let err = engine
            .reserve(&request("express_2000", &["1A"], " "))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::MissingAttributes {
                missing: vec!["booking_reference"],
            }
        );

        let err = engine
            .reserve(&request("express_2000", &[], "1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::MissingAttributes {
                missing: vec!["seats"],
            }
        );

        // A blank entry inside the list counts as a missing seats field.
        let err = engine
            .reserve(&request("express_2000", &["1A", ""], "1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::MissingAttributes {
                missing: vec!["seats"],
            }
        );
    }

    #[tokio::test]
    async fn validation_failure_mutates_nothing() {
        let engine = engine();
        let before = engine.train_data("express_2000").await.unwrap();

        let _ = engine
            .reserve(&request("express_2000", &["1A"], ""))
            .await
            .unwrap_err();

        let after = engine.train_data("express_2000").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn reset_clears_every_seat() {
        let engine = engine();
        engine
            .reserve(&request("express_2000", &["1A", "2B"], "1"))
            .await
            .unwrap();

        let snapshot = engine.reset("express_2000").await.unwrap();

        assert!(snapshot.seats().all(|(_, seat)| seat.is_free()));

        // Reset of an already-clear train is a no-op success.
        let again = engine.reset("express_2000").await.unwrap();
        assert_eq!(snapshot, again);
    }

    #[tokio::test]
    async fn reset_unknown_train_is_rejected() {
        let engine = engine();
        let err = engine.reset("ghost_900").await.unwrap_err();
        assert_eq!(err.to_string(), "Train with ID ghost_900 was not found");
    }

    #[tokio::test]
    async fn train_data_reflects_reservations() {
        let engine = engine();
        engine
            .reserve(&request("express_2000", &["1B"], "5"))
            .await
            .unwrap();

        let snapshot = engine.train_data("express_2000").await.unwrap();
        assert_eq!(booking_of(&snapshot, "1B"), Some("5".into()));

        let err = engine.train_data("ghost_900").await.unwrap_err();
        assert!(matches!(err, ReservationError::TrainNotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_disjoint_batches_both_apply() {
        let engine = Arc::new(engine());

        let a = tokio::spawn({
            let engine = engine.clone();
            async move {
                engine
                    .reserve(&request("express_2000", &["1A", "2A"], "left"))
                    .await
            }
        });
        let b = tokio::spawn({
            let engine = engine.clone();
            async move {
                engine
                    .reserve(&request("express_2000", &["1B", "2B"], "right"))
                    .await
            }
        });

        let (a, b) = tokio::join!(a, b);
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let snapshot = engine.train_data("express_2000").await.unwrap();
        assert_eq!(booking_of(&snapshot, "1A"), Some("left".into()));
        assert_eq!(booking_of(&snapshot, "2A"), Some("left".into()));
        assert_eq!(booking_of(&snapshot, "1B"), Some("right".into()));
        assert_eq!(booking_of(&snapshot, "2B"), Some("right".into()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn contended_seat_admits_exactly_one_winner() {
        let engine = Arc::new(engine());

        let mut handles = Vec::new();
        for i in 0..8 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                let reference = format!("ref_{i}");
                engine
                    .reserve(&request("express_2000", &["1A"], &reference))
                    .await
                    .map(|_| reference)
            }));
        }

        let mut winners = Vec::new();
        for handle in handles {
            if let Ok(reference) = handle.await.unwrap() {
                winners.push(reference);
            }
        }

        assert_eq!(winners.len(), 1);
        let snapshot = engine.train_data("express_2000").await.unwrap();
        assert_eq!(booking_of(&snapshot, "1A"), Some(winners[0].clone()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn trains_reserve_independently() {
        let engine = Arc::new(engine());

        let a = tokio::spawn({
            let engine = engine.clone();
            async move { engine.reserve(&request("express_2000", &["1A"], "1")).await }
        });
        let b = tokio::spawn({
            let engine = engine.clone();
            async move { engine.reserve(&request("local_1000", &["1A"], "2")).await }
        });

        let (a, b) = tokio::join!(a, b);
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let express = engine.train_data("express_2000").await.unwrap();
        let local = engine.train_data("local_1000").await.unwrap();
        assert_eq!(booking_of(&express, "1A"), Some("1".into()));
        assert_eq!(booking_of(&local, "1A"), Some("2".into()));
    }
}
