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

use crate::marketplace::notifications::dispatch::Notifier;
use crate::marketplace::store::StoreError;

use super::domain::{ContactId, NewUser, NotifyPreference, Role, UserId};
use super::repository::AccountRepository;
use super::service::{AccountError, AccountService};

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct NotifyPayload {
    pub notify: NotifyPreference,
}

/// `agent: null` clears the assignment.
#[derive(Debug, Deserialize)]
pub struct AgentPayload {
    pub agent: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct BanPayload {
    pub actor: u64,
    pub banned: bool,
}

#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub person: u64,
}

#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub actor: u64,
}

/// Router builder exposing account, subscription, and contact-book
/// endpoints.
pub fn account_router<R, N>(service: Arc<AccountService<R, N>>) -> Router
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/users", post(register_handler::<R, N>))
        .route("/api/v1/users/:user_id", get(profile_handler::<R, N>))
        .route(
            "/api/v1/users/:user_id/subscription",
            post(subscribe_handler::<R, N>).delete(cancel_handler::<R, N>),
        )
        .route(
            "/api/v1/users/:user_id/notify",
            put(notify_handler::<R, N>),
        )
        .route("/api/v1/users/:user_id/agent", put(agent_handler::<R, N>))
        .route("/api/v1/users/:user_id/ban", put(ban_handler::<R, N>))
        .route(
            "/api/v1/users/:user_id/contacts",
            get(contacts_handler::<R, N>).post(add_contact_handler::<R, N>),
        )
        .route(
            "/api/v1/contacts/:contact_id",
            delete(remove_contact_handler::<R, N>),
        )
        .with_state(service)
}

fn error_response(error: AccountError) -> Response {
    let status = match &error {
        AccountError::NotStaff | AccountError::NotContactOwner => StatusCode::FORBIDDEN,
        AccountError::ReservedRole
        | AccountError::MissingEmail
        | AccountError::NotAnAgent
        | AccountError::SelfContact => StatusCode::UNPROCESSABLE_ENTITY,
        AccountError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AccountError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        AccountError::Store(_) | AccountError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    axum::Json(payload): axum::Json<RegisterPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let registration = NewUser {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        role: payload.role,
    };
    match service.register(registration) {
        Ok(user) => (StatusCode::CREATED, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.profile(UserId(user_id)) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn subscribe_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let today = chrono::Local::now().date_naive();
    match service.subscribe(UserId(user_id), today) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cancel_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    let today = chrono::Local::now().date_naive();
    match service.cancel_subscription(UserId(user_id), today) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn notify_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
    axum::Json(payload): axum::Json<NotifyPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.set_notify_preference(UserId(user_id), payload.notify) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn agent_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
    axum::Json(payload): axum::Json<AgentPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.assign_agent(UserId(user_id), payload.agent.map(UserId)) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ban_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
    axum::Json(payload): axum::Json<BanPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.set_ban(UserId(payload.actor), UserId(user_id), payload.banned) {
        Ok(user) => (StatusCode::OK, axum::Json(user)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contacts_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.contacts(UserId(user_id)) {
        Ok(contacts) => (StatusCode::OK, axum::Json(contacts)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_contact_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(user_id): Path<u64>,
    axum::Json(payload): axum::Json<ContactPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.add_contact(UserId(user_id), UserId(payload.person)) {
        Ok(contact) => (StatusCode::CREATED, axum::Json(contact)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_contact_handler<R, N>(
    State(service): State<Arc<AccountService<R, N>>>,
    Path(contact_id): Path<u64>,
    axum::Json(payload): axum::Json<ActorPayload>,
) -> Response
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    match service.remove_contact(UserId(payload.actor), ContactId(contact_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
