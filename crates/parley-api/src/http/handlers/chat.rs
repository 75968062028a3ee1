//! Turn and reset HTTP handlers.
//!
//! Endpoints:
//! - POST /chat  - create or continue a turn
//! - POST /reset - clear a session's in-memory state

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Body for POST /chat and POST /reset.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: String,
}

/// Response for POST /reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub session_id: String,
}

/// POST /chat - run one turn against the session's running history.
///
/// Generates a fresh session id when the body omits one; the reply
/// carries it so the client can continue the conversation.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = state
        .chat_service
        .run_turn(body.session_id, &body.message)
        .await?;

    Ok(Json(ChatResponse {
        answer: reply.answer,
        session_id: reply.session_id,
    }))
}

/// POST /reset - reset the in-memory session to the seeded system message.
///
/// Persisted history is untouched.
pub async fn reset(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    let session_id = state.chat_service.reset_session(body.session_id)?;

    Ok(Json(ResetResponse {
        message: "Chat session reset successfully.".to_string(),
        session_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_tolerates_missing_fields() {
        let body: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_empty());
        assert!(body.session_id.is_none());

        let body: ChatRequest =
            serde_json::from_str(r#"{"message": "hi", "session_id": "s1"}"#).unwrap();
        assert_eq!(body.message, "hi");
        assert_eq!(body.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_chat_response_shape() {
        let response = ChatResponse {
            answer: "4".to_string(),
            session_id: "s1".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["answer"], "4");
        assert_eq!(value["session_id"], "s1");
    }
}
