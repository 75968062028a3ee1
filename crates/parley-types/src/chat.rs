//! Chat log types for Parley.
//!
//! A `ChatLogEntry` is the durable record of one completed turn; a
//! `ChatTurn` is the projection returned by history lookups, with the
//! store-assigned identifier and timestamp projected out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export the message types; they are used in both chat and llm contexts.
pub use crate::llm::{Message, MessageRole};

/// A persisted record of one completed turn.
///
/// Created once per turn, immutable, deleted individually by `id` or in
/// bulk by `session_id`. Independent of the in-memory session state:
/// resetting a live session leaves its log entries untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub id: Uuid,
    pub session_id: String,
    pub user_message: String,
    pub assistant_response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatLogEntry {
    /// Create a new entry with a fresh store identifier and timestamp.
    pub fn new(
        session_id: impl Into<String>,
        user_message: impl Into<String>,
        assistant_response: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id: session_id.into(),
            user_message: user_message.into(),
            assistant_response: assistant_response.into(),
            created_at: Utc::now(),
        }
    }

    /// The history projection of this entry.
    pub fn as_turn(&self) -> ChatTurn {
        ChatTurn {
            session_id: self.session_id.clone(),
            user_message: self.user_message.clone(),
            assistant_response: self.assistant_response.clone(),
        }
    }
}

/// The projection of a log entry returned by history lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub session_id: String,
    pub user_message: String,
    pub assistant_response: String,
}
