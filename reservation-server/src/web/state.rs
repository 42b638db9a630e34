//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::ReservationEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The reservation engine; sole path to seat state
    pub engine: Arc<ReservationEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: ReservationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
