use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::listings::domain::PostId;
use crate::marketplace::listings::repository::ListingRepository;
use crate::marketplace::notifications::dispatch::Notifier;
use crate::marketplace::store::StoreError;

use super::domain::{PromoColor, PromoPhrase, PromotionId, PromotionOrder, PromotionTypeId};
use super::repository::PromotionRepository;
use super::service::{PromotionError, PromotionService};

/// Purchase payload for boosting a listing.
#[derive(Debug, Deserialize)]
pub struct PromotionPurchase {
    pub actor: u64,
    pub kind: u64,
    pub phrase: Option<PromoPhrase>,
    pub color: Option<PromoColor>,
    pub paid: bool,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PaidPayload {
    pub actor: u64,
    pub paid: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub actor: u64,
}

/// Router builder exposing the promotion catalog and purchase flow.
pub fn promotion_router<P, L, U, N>(service: Arc<PromotionService<P, L, U, N>>) -> Router
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/promotions/types",
            get(catalog_handler::<P, L, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/promotion",
            get(fetch_handler::<P, L, U, N>).post(purchase_handler::<P, L, U, N>),
        )
        .route(
            "/api/v1/promotions/:promotion_id/paid",
            put(paid_handler::<P, L, U, N>),
        )
        .route(
            "/api/v1/promotions/:promotion_id",
            delete(delete_handler::<P, L, U, N>),
        )
        .with_state(service)
}

fn error_response(error: PromotionError) -> Response {
    let status = match &error {
        PromotionError::NotPostOwner | PromotionError::Banned => StatusCode::FORBIDDEN,
        PromotionError::AlreadyPromoted => StatusCode::CONFLICT,
        PromotionError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        PromotionError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        PromotionError::Store(_) | PromotionError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn catalog_handler<P, L, U, N>(
    State(service): State<Arc<PromotionService<P, L, U, N>>>,
) -> Response
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.catalog() {
        Ok(types) => (StatusCode::OK, axum::Json(types)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<P, L, U, N>(
    State(service): State<Arc<PromotionService<P, L, U, N>>>,
    Path(post_id): Path<u64>,
) -> Response
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.promotion_of(PostId(post_id)) {
        Ok(Some(promotion)) => (StatusCode::OK, axum::Json(promotion)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "record not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn purchase_handler<P, L, U, N>(
    State(service): State<Arc<PromotionService<P, L, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<PromotionPurchase>,
) -> Response
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let order = PromotionOrder {
        kind: PromotionTypeId(payload.kind),
        phrase: payload.phrase,
        color: payload.color,
        paid: payload.paid,
        end_date: payload.end_date,
    };
    match service.promote(UserId(payload.actor), PostId(post_id), order) {
        Ok(promotion) => (StatusCode::CREATED, axum::Json(promotion)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn paid_handler<P, L, U, N>(
    State(service): State<Arc<PromotionService<P, L, U, N>>>,
    Path(promotion_id): Path<u64>,
    axum::Json(payload): axum::Json<PaidPayload>,
) -> Response
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.set_paid(
        UserId(payload.actor),
        PromotionId(promotion_id),
        payload.paid,
    ) {
        Ok(promotion) => (StatusCode::OK, axum::Json(promotion)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<P, L, U, N>(
    State(service): State<Arc<PromotionService<P, L, U, N>>>,
    Path(promotion_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.delete_promotion(UserId(payload.actor), PromotionId(promotion_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
