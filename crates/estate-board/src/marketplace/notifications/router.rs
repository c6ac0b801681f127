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
use crate::marketplace::store::StoreError;

use super::repository::MessageRepository;
use super::service::{MessagingError, MessagingService};

#[derive(Debug, Deserialize)]
pub struct SendPayload {
    pub actor: u64,
    pub receiver: u64,
    pub text: String,
}

/// Router builder exposing direct-mail endpoints.
pub fn messaging_router<M, U>(service: Arc<MessagingService<M, U>>) -> Router
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    Router::new()
        .route("/api/v1/messages", post(send_handler::<M, U>))
        .route(
            "/api/v1/users/:user_id/inbox",
            get(inbox_handler::<M, U>),
        )
        .route(
            "/api/v1/users/:user_id/conversations/:other_id",
            get(conversation_handler::<M, U>),
        )
        .with_state(service)
}

fn error_response(error: MessagingError) -> Response {
    let status = match &error {
        MessagingError::NotParticipant => StatusCode::FORBIDDEN,
        MessagingError::UnknownRecipient => StatusCode::NOT_FOUND,
        MessagingError::EmptyText => StatusCode::UNPROCESSABLE_ENTITY,
        MessagingError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        MessagingError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        MessagingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn send_handler<M, U>(
    State(service): State<Arc<MessagingService<M, U>>>,
    axum::Json(payload): axum::Json<SendPayload>,
) -> Response
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.send(
        UserId(payload.actor),
        UserId(payload.receiver),
        &payload.text,
    ) {
        Ok(message) => (StatusCode::CREATED, axum::Json(message)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inbox_handler<M, U>(
    State(service): State<Arc<MessagingService<M, U>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.inbox(UserId(user_id)) {
        Ok(mail) => (StatusCode::OK, axum::Json(mail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn conversation_handler<M, U>(
    State(service): State<Arc<MessagingService<M, U>>>,
    Path((user_id, other_id)): Path<(u64, u64)>,
) -> Response
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    let viewer = UserId(user_id);
    match service.conversation(viewer, viewer, UserId(other_id)) {
        Ok(thread) => (StatusCode::OK, axum::Json(thread)).into_response(),
        Err(error) => error_response(error),
    }
}
