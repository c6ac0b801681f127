use crate::infra::{AppState, Marketplace};
use crate::scheduler::Sweeps;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use estate_board::error::AppError;
use estate_board::marketplace::accounts::account_router;
use estate_board::marketplace::booking::booking_router;
use estate_board::marketplace::housing::housing_router;
use estate_board::marketplace::listings::listing_router;
use estate_board::marketplace::notifications::messaging_router;
use estate_board::marketplace::promotions::promotion_router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SweepRequest {
    /// Sweep date (YYYY-MM-DD). Defaults to today.
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SweepResponse {
    pub(crate) today: NaiveDate,
    pub(crate) subscriptions_expired: usize,
    pub(crate) expiry_warnings: usize,
    pub(crate) promotions_expired: usize,
    pub(crate) filter_matches: usize,
}

pub(crate) fn with_marketplace_routes(market: &Marketplace) -> axum::Router {
    let sweeps = Arc::new(Sweeps::for_marketplace(market));

    account_router(market.accounts.clone())
        .merge(housing_router(market.housing.clone()))
        .merge(booking_router(market.booking.clone()))
        .merge(listing_router(market.listings.clone()))
        .merge(promotion_router(market.promotions.clone()))
        .merge(messaging_router(market.messaging.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/admin/sweeps",
            axum::routing::post(sweep_endpoint).with_state(sweeps),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Forces the daily pass outside its schedule, for operators and demos.
pub(crate) async fn sweep_endpoint(
    State(sweeps): State<Arc<Sweeps>>,
    Json(payload): Json<SweepRequest>,
) -> Result<Json<SweepResponse>, AppError> {
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = sweeps.run_for(today)?;

    Ok(Json(SweepResponse {
        today,
        subscriptions_expired: outcome.subscriptions_expired,
        expiry_warnings: outcome.expiry_warnings,
        promotions_expired: outcome.promotions_expired,
        filter_matches: outcome.filter_matches,
    }))
}
