//! Application error type mapping to HTTP status codes.
//!
//! Every failure becomes `{"detail": "<human-readable>"}` with the
//! conventional status: 400 for missing/invalid required fields, 404 for
//! empty lookups, 500 for upstream or storage failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat service errors.
    Chat(ChatError),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Chat(e) => match e {
                ChatError::EmptyMessage
                | ChatError::MissingSessionId
                | ChatError::MissingChatId
                | ChatError::InvalidChatId(_) => StatusCode::BAD_REQUEST,
                ChatError::HistoryNotFound(_) | ChatError::EntryNotFound => StatusCode::NOT_FOUND,
                ChatError::Completion(_) | ChatError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Chat(e) => e.to_string(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
