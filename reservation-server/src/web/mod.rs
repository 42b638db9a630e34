//! Web layer for the seat reservation service.
//!
//! Maps the original wire protocol (train lookup, multipart reserve
//! form, reset) onto the reservation engine.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
