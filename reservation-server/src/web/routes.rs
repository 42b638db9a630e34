//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        multipart::{Multipart, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::domain::ReservationError;
use crate::engine::ReservationRequest;

use super::dto::{ErrorResponse, TrainDocument, decode_seat_list};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data_for_train/:train_id", get(data_for_train))
        .route("/reserve", post(reserve))
        .route("/reset/:train_id", get(reset_train))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current seat state for a train.
async fn data_for_train(
    State(state): State<AppState>,
    Path(train_id): Path<String>,
) -> Result<Response, AppError> {
    let train = state.engine.train_data(&train_id).await?;
    Ok(Json(TrainDocument::from_train(&train)).into_response())
}

/// Reserve seats on a train.
///
/// Accepts a multipart form with three fields: `train_id`, `seats`
/// (a JSON-encoded list of seat keys, e.g. `["1A", "2B"]`) and
/// `booking_reference`.
async fn reserve(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let form = read_reserve_form(multipart).await?;

    let seats = if form.seats.trim().is_empty() {
        // Leave the empty list for the engine to flag as missing.
        Vec::new()
    } else {
        decode_seat_list(&form.seats).map_err(|e| AppError::BadRequest {
            message: format!("Invalid JSON in seats field: {e}"),
        })?
    };

    let request = ReservationRequest {
        train_id: form.train_id,
        seats,
        booking_reference: form.booking_reference,
    };

    let train = state.engine.reserve(&request).await?;
    Ok(Json(TrainDocument::from_train(&train)).into_response())
}

/// Clear every reservation on a train.
async fn reset_train(
    State(state): State<AppState>,
    Path(train_id): Path<String>,
) -> Result<Response, AppError> {
    let train = state.engine.reset(&train_id).await?;
    Ok(Json(TrainDocument::from_train(&train)).into_response())
}

/// Raw `/reserve` form fields, before the engine validates them.
#[derive(Debug, Default)]
struct ReserveForm {
    train_id: String,
    seats: String,
    booking_reference: String,
}

async fn read_reserve_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ReserveForm, AppError> {
    let mut multipart = multipart.map_err(|_| no_form_attributes())?;

    let mut form = ReserveForm::default();
    let mut any_field = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest {
            message: format!("Malformed multi-part form data: {e}"),
        })?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(|e| AppError::BadRequest {
            message: format!("Malformed multi-part form data: {e}"),
        })?;

        any_field = true;
        match name.as_str() {
            "train_id" => form.train_id = value,
            "seats" => form.seats = value,
            "booking_reference" => form.booking_reference = value,
            _ => {}
        }
    }

    if !any_field {
        return Err(no_form_attributes());
    }

    Ok(form)
}

fn no_form_attributes() -> AppError {
    AppError::BadRequest {
        message: "No multi-part form attributes supplied in the request body".to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        let message = e.to_string();
        match e {
            ReservationError::MissingAttributes { .. } => AppError::BadRequest { message },
            ReservationError::TrainNotFound(_) | ReservationError::SeatNotFound(_) => {
                AppError::NotFound { message }
            }
            ReservationError::AlreadyBooked { .. } => AppError::Conflict { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
        };

        // Log rejected requests to stderr for debugging
        eprintln!("[{status}] {message}");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
