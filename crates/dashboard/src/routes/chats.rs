//! Conversation inbox handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Local;
use serde::Deserialize;
use tracing::instrument;

use merchify_core::{ConversationId, MessageSender};

use super::SearchQuery;
use crate::error::AppError;
use crate::models::{Conversation, Message};
use crate::state::AppState;
use crate::views::ConversationListItem;

/// Build the chats router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/conversations", get(list))
        .route("/api/conversations/{id}", get(show))
        .route("/api/conversations/{id}/messages", post(send_message))
}

/// Body for appending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    /// Defaults to the assistant, matching what the inbox composer sends.
    #[serde(default)]
    pub sender: MessageSender,
}

/// Inbox rows matching the search term.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<ConversationListItem>> {
    let now = Local::now();
    let store = state.store().read().await;
    let rows = store
        .list_conversations(&query.search)
        .into_iter()
        .map(|c| ConversationListItem::project(c, &now))
        .collect();
    Json(rows)
}

/// One conversation with its full message history.
///
/// # Errors
///
/// Returns 404 if the conversation does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ConversationId>,
) -> Result<Json<Conversation>, AppError> {
    let store = state.store().read().await;
    Ok(Json(store.get_conversation(&id)?.clone()))
}

/// Append a message to a conversation.
///
/// # Errors
///
/// Returns 404 if the conversation does not exist and 422 if the content is
/// blank.
#[instrument(skip(state, body), fields(sender = ?body.sender))]
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<ConversationId>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let mut store = state.store().write().await;
    let message = store.append_message(&id, &body.content, body.sender)?;
    Ok((StatusCode::CREATED, Json(message)))
}
