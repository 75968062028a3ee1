//! History and deletion HTTP handlers.
//!
//! Endpoints:
//! - GET    /history?session_id= - persisted turns for one or all sessions
//! - DELETE /delete_chat         - delete one persisted entry by id

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use parley_types::chat::ChatTurn;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for GET /history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for GET /history.
///
/// `session_id` echoes the filter and is omitted for the unfiltered form.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub history: Vec<ChatTurn>,
}

/// Body for DELETE /delete_chat.
///
/// The `message` field carries the chat id to delete; a quirk of the
/// wire contract, kept for client compatibility.
#[derive(Debug, Deserialize)]
pub struct DeleteChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response for DELETE /delete_chat.
#[derive(Debug, Serialize)]
pub struct DeleteChatResponse {
    pub message: String,
}

/// GET /history - persisted turns for a session, or all sessions when
/// the query parameter is omitted. Unpaginated.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session_id = query.session_id.filter(|id| !id.is_empty());
    let turns = state.chat_service.history(session_id.as_deref()).await?;

    Ok(Json(HistoryResponse {
        session_id,
        history: turns,
    }))
}

/// DELETE /delete_chat - delete one persisted entry by its identifier.
pub async fn delete_chat(
    State(state): State<AppState>,
    Json(body): Json<DeleteChatRequest>,
) -> Result<Json<DeleteChatResponse>, AppError> {
    state.chat_service.delete_entry(body.message.as_deref()).await?;

    Ok(Json(DeleteChatResponse {
        message: "Chat deleted successfully.".to_string(),
    }))
}
