use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::housing::domain::{FlatId, HouseId};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::store::StoreError;

use super::domain::RequestId;
use super::repository::BookingRepository;
use super::service::{BookingError, BookingService};

/// Booking intent for a flat, carried in the request body alongside
/// the acting principal.
#[derive(Debug, Deserialize)]
pub struct BookingIntent {
    pub actor: u64,
    pub book: bool,
}

/// Sales-department verdict on a booking request.
#[derive(Debug, Deserialize)]
pub struct ReviewVerdict {
    pub actor: u64,
    pub approve: bool,
}

/// Router builder exposing the booking workflow endpoints.
pub fn booking_router<B, H, U>(service: Arc<BookingService<B, H, U>>) -> Router
where
    B: BookingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/booking/flats/:flat_id",
            post(booking_handler::<B, H, U>),
        )
        .route(
            "/api/v1/booking/requests/:request_id/review",
            post(review_handler::<B, H, U>),
        )
        .route(
            "/api/v1/users/:user_id/houses/:house_id/requests",
            get(requests_handler::<B, H, U>),
        )
        .with_state(service)
}

fn error_response(error: BookingError) -> Response {
    let status = match &error {
        BookingError::FlatTaken => StatusCode::CONFLICT,
        BookingError::NotCurrentClient | BookingError::NotHouseOwner | BookingError::Banned => {
            StatusCode::FORBIDDEN
        }
        BookingError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn booking_handler<B, H, U>(
    State(service): State<Arc<BookingService<B, H, U>>>,
    Path(flat_id): Path<u64>,
    axum::Json(intent): axum::Json<BookingIntent>,
) -> Response
where
    B: BookingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.set_booking(FlatId(flat_id), UserId(intent.actor), intent.book) {
        Ok(flat) => (StatusCode::OK, axum::Json(flat)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<B, H, U>(
    State(service): State<Arc<BookingService<B, H, U>>>,
    Path(request_id): Path<u64>,
    axum::Json(verdict): axum::Json<ReviewVerdict>,
) -> Response
where
    B: BookingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.review_request(RequestId(request_id), UserId(verdict.actor), verdict.approve) {
        Ok(flat) => (StatusCode::OK, axum::Json(flat)).into_response(),
        Err(error) => error_response(error),
    }
}

/// The path user is the viewer; only the house's sales department gets
/// through.
pub(crate) async fn requests_handler<B, H, U>(
    State(service): State<Arc<BookingService<B, H, U>>>,
    Path((user_id, house_id)): Path<(u64, u64)>,
) -> Response
where
    B: BookingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.pending_requests(HouseId(house_id), UserId(user_id)) {
        Ok(requests) => (StatusCode::OK, axum::Json(requests)).into_response(),
        Err(error) => error_response(error),
    }
}
