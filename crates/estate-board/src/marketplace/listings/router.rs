use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::housing::domain::{FlatId, FlatState};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::notifications::dispatch::Notifier;
use crate::marketplace::store::StoreError;

use super::domain::{
    AgentCommission, ContactChannel, ListingIssue, PostId, PostSubmission, PostUpdate,
};
use super::filters::{FilterId, Market, NewSavedFilter};
use super::reactions::ReactionKind;
use super::repository::ListingRepository;
use super::service::{ListingError, ListingService};

#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub actor: u64,
}

#[derive(Debug, Deserialize)]
pub struct PostPayload {
    pub actor: u64,
    pub flat: u64,
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
}

#[derive(Debug, Deserialize)]
pub struct PostUpdatePayload {
    pub actor: u64,
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
}

#[derive(Debug, Deserialize)]
pub struct ReactionPayload {
    pub actor: u64,
    pub action: ReactionKind,
}

#[derive(Debug, Deserialize)]
pub struct FavoritePayload {
    pub actor: u64,
    pub favored: bool,
}

#[derive(Debug, Deserialize)]
pub struct ComplaintPayload {
    pub actor: u64,
    pub reason: ListingIssue,
}

/// `reason` present rejects the listing; absent reinstates it.
#[derive(Debug, Deserialize)]
pub struct ModerationPayload {
    pub actor: u64,
    pub reason: Option<ListingIssue>,
}

#[derive(Debug, Deserialize)]
pub struct FilterPayload {
    pub actor: u64,
    pub name: String,
    pub market: Market,
    pub rooms: Option<u8>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub state: Option<FlatState>,
}

/// Router builder exposing the listing lifecycle endpoints.
pub fn listing_router<L, H, U, N>(service: Arc<ListingService<L, H, U, N>>) -> Router
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/posts",
            get(feed_handler::<L, H, U, N>).post(create_post_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id",
            get(fetch_post_handler::<L, H, U, N>)
                .put(update_post_handler::<L, H, U, N>)
                .delete(delete_post_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/views",
            post(view_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/reactions",
            post(reaction_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/favorite",
            post(favorite_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/complaints",
            post(complaint_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/relevance",
            post(relevance_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/posts/:post_id/moderation",
            post(moderation_handler::<L, H, U, N>),
        )
        .route("/api/v1/filters", post(create_filter_handler::<L, H, U, N>))
        .route(
            "/api/v1/filters/:filter_id",
            delete(delete_filter_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/users/:user_id/favorites",
            get(favorites_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/users/:user_id/filters",
            get(filters_handler::<L, H, U, N>),
        )
        .route(
            "/api/v1/users/:user_id/posts/:post_id/complaints",
            get(complaint_queue_handler::<L, H, U, N>),
        )
        .with_state(service)
}

fn error_response(error: ListingError) -> Response {
    let status = match &error {
        ListingError::Banned
        | ListingError::NotPostOwner
        | ListingError::NotStaff
        | ListingError::OwnComplaint => StatusCode::FORBIDDEN,
        ListingError::DuplicateComplaint | ListingError::RelevanceTooSoon => StatusCode::CONFLICT,
        ListingError::Quota(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ListingError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        ListingError::Store(_) | ListingError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn feed_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.feed() {
        Ok(posts) => (StatusCode::OK, axum::Json(posts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_post_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    axum::Json(payload): axum::Json<PostPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let submission = PostSubmission {
        flat: FlatId(payload.flat),
        price: payload.price,
        description: payload.description,
        commission: payload.commission,
        contact_by: payload.contact_by,
    };
    let now = chrono::Local::now().naive_local();
    match service.create_post(UserId(payload.actor), submission, now) {
        Ok(post) => (StatusCode::CREATED, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_post_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.post(PostId(post_id)) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_post_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<PostUpdatePayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let update = PostUpdate {
        price: payload.price,
        description: payload.description,
        commission: payload.commission,
        contact_by: payload.contact_by,
    };
    match service.update_post(UserId(payload.actor), PostId(post_id), update) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_post_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.delete_post(UserId(payload.actor), PostId(post_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.record_view(UserId(payload.actor), PostId(post_id)) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reaction_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ReactionPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.react(UserId(payload.actor), PostId(post_id), payload.action) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn favorite_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<FavoritePayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.set_favorite(UserId(payload.actor), PostId(post_id), payload.favored) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complaint_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ComplaintPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.complain(UserId(payload.actor), PostId(post_id), payload.reason) {
        Ok(complaint) => (StatusCode::CREATED, axum::Json(complaint)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn relevance_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let now = chrono::Local::now().naive_local();
    match service.confirm_relevance(UserId(payload.actor), PostId(post_id), now) {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn moderation_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(post_id): Path<u64>,
    axum::Json(payload): axum::Json<ModerationPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let actor = UserId(payload.actor);
    let id = PostId(post_id);
    let outcome = match payload.reason {
        Some(reason) => service.reject_post(actor, id, reason),
        None => service.reinstate_post(actor, id),
    };
    match outcome {
        Ok(post) => (StatusCode::OK, axum::Json(post)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_filter_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    axum::Json(payload): axum::Json<FilterPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let actor = UserId(payload.actor);
    let filter = NewSavedFilter {
        owner: actor,
        name: payload.name,
        market: payload.market,
        rooms: payload.rooms,
        price_min: payload.price_min,
        price_max: payload.price_max,
        area_min: payload.area_min,
        area_max: payload.area_max,
        state: payload.state,
    };
    match service.create_filter(actor, filter) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_filter_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(filter_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.delete_filter(UserId(payload.actor), FilterId(filter_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn favorites_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.favorites_of(UserId(user_id)) {
        Ok(posts) => (StatusCode::OK, axum::Json(posts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn filters_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.filters_of(UserId(user_id)) {
        Ok(filters) => (StatusCode::OK, axum::Json(filters)).into_response(),
        Err(error) => error_response(error),
    }
}

/// The path user is the viewer; the complaint queue is staff-only.
pub(crate) async fn complaint_queue_handler<L, H, U, N>(
    State(service): State<Arc<ListingService<L, H, U, N>>>,
    Path((user_id, post_id)): Path<(u64, u64)>,
) -> Response
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.complaints(UserId(user_id), PostId(post_id)) {
        Ok(complaints) => (StatusCode::OK, axum::Json(complaints)).into_response(),
        Err(error) => error_response(error),
    }
}
