//! Message endpoints

use axum::{
    extract::{Path, State},
    response::{Json, Response},
};

use super::json_or_empty;
use crate::AppState;
use crate::data::{Message, MessagePatch, NewMessage};
use crate::error::AppError;
use crate::service::MessageService;

fn build_message_service(state: &AppState) -> MessageService {
    MessageService::new(state.db.clone())
}

/// POST /messages
pub async fn post_message(
    State(state): State<AppState>,
    Json(message): Json<NewMessage>,
) -> Result<Json<Message>, AppError> {
    let stored = build_message_service(&state).post(&message).await?;
    Ok(Json(stored))
}

/// GET /messages
pub async fn get_all_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = build_message_service(&state).all().await?;
    Ok(Json(messages))
}

/// GET /messages/:id
///
/// An unknown id answers 200 with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let message = build_message_service(&state).get(id).await?;
    Ok(json_or_empty(message))
}

/// DELETE /messages/:id
///
/// Body is `1` when a message was deleted, empty otherwise.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let deleted = build_message_service(&state).delete(id).await?;
    Ok(json_or_empty(deleted))
}

/// PATCH /messages/:id
pub async fn patch_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<MessagePatch>,
) -> Result<Json<u64>, AppError> {
    let updated = build_message_service(&state)
        .patch(id, &patch.message_text)
        .await?;
    Ok(Json(updated))
}

/// GET /accounts/:account_id/messages
pub async fn get_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = build_message_service(&state).by_account(account_id).await?;
    Ok(Json(messages))
}
