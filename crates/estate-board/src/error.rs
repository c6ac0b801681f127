use crate::config::ConfigError;
use crate::marketplace::accounts::AccountError;
use crate::marketplace::booking::BookingError;
use crate::marketplace::housing::HousingError;
use crate::marketplace::listings::ListingError;
use crate::marketplace::notifications::MessagingError;
use crate::marketplace::promotions::PromotionError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Application-level failure for the API binary: configuration and
/// startup problems plus any marketplace error a CLI command surfaces.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Account(AccountError),
    Housing(HousingError),
    Booking(BookingError),
    Listing(ListingError),
    Promotion(PromotionError),
    Messaging(MessagingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Account(err) => write!(f, "account error: {}", err),
            AppError::Housing(err) => write!(f, "housing error: {}", err),
            AppError::Booking(err) => write!(f, "booking error: {}", err),
            AppError::Listing(err) => write!(f, "listing error: {}", err),
            AppError::Promotion(err) => write!(f, "promotion error: {}", err),
            AppError::Messaging(err) => write!(f, "messaging error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Account(err) => Some(err),
            AppError::Housing(err) => Some(err),
            AppError::Booking(err) => Some(err),
            AppError::Listing(err) => Some(err),
            AppError::Promotion(err) => Some(err),
            AppError::Messaging(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Account(_)
            | AppError::Housing(_)
            | AppError::Booking(_)
            | AppError::Listing(_)
            | AppError::Promotion(_)
            | AppError::Messaging(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AccountError> for AppError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}

impl From<HousingError> for AppError {
    fn from(value: HousingError) -> Self {
        Self::Housing(value)
    }
}

impl From<BookingError> for AppError {
    fn from(value: BookingError) -> Self {
        Self::Booking(value)
    }
}

impl From<ListingError> for AppError {
    fn from(value: ListingError) -> Self {
        Self::Listing(value)
    }
}

impl From<PromotionError> for AppError {
    fn from(value: PromotionError) -> Self {
        Self::Promotion(value)
    }
}

impl From<MessagingError> for AppError {
    fn from(value: MessagingError) -> Self {
        Self::Messaging(value)
    }
}
