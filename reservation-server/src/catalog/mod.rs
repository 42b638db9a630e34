//! In-memory train catalog.
//!
//! The catalog is the sole owner of seat state. Each train sits
//! behind its own `RwLock`, so mutations on one train never contend
//! with operations on another, and no operation ever needs more than
//! one lock.

mod load;

pub use load::{LoadError, load_catalog, parse_catalog};

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{Train, TrainId};

/// Registry of trains and their seats.
///
/// The set of trains and each train's seat layout are fixed at
/// construction; only per-seat booking state changes afterwards, and
/// only under the owning train's write lock.
#[derive(Debug)]
pub struct Catalog {
    trains: HashMap<TrainId, RwLock<Train>>,
}

impl Catalog {
    /// Build a catalog from already-constructed trains.
    pub fn new(trains: impl IntoIterator<Item = Train>) -> Self {
        let trains = trains
            .into_iter()
            .map(|train| (train.id().clone(), RwLock::new(train)))
            .collect();
        Self { trains }
    }

    /// Look up a train's locked cell.
    pub fn train(&self, id: &TrainId) -> Option<&RwLock<Train>> {
        self.trains.get(id)
    }

    /// Read-locked snapshot of a train's current state.
    pub async fn snapshot(&self, id: &TrainId) -> Option<Train> {
        match self.trains.get(id) {
            Some(cell) => Some(cell.read().await.clone()),
            None => None,
        }
    }

    /// Number of trains in the catalog.
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Whether the catalog holds no trains.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Identifiers of all trains in the catalog.
    pub fn train_ids(&self) -> impl Iterator<Item = &TrainId> {
        self.trains.keys()
    }
}
