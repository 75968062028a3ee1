//! Process-wide registry of live chat sessions.
//!
//! Sessions are created implicitly on first reference, seeded with a fixed
//! system prompt, and grow append-only for the lifetime of the process.
//! Nothing here is persisted; the durable chat log is maintained
//! independently by the repository layer.

use dashmap::DashMap;

use parley_types::llm::{Message, MessageRole};

/// The system prompt every session starts with.
pub const SEED_PROMPT: &str = "You are a helpful assistant.";

fn seeded_history() -> Vec<Message> {
    vec![Message::new(MessageRole::System, SEED_PROMPT)]
}

/// Process-wide mapping from session id to its ordered message list.
///
/// All mutations go through DashMap's entry API, so each one holds the
/// entry's shard lock for its full duration: concurrent appends to the
/// same session serialize instead of interleaving or losing writes.
///
/// Session ids are opaque strings; uniqueness is caller-supplied. There
/// is no expiry and no capacity bound.
#[derive(Default)]
pub struct ConversationRegistry {
    sessions: DashMap<String, Vec<Message>>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the message list for a session, creating it with the seeded
    /// system message if absent. Infallible.
    pub fn ensure(&self, session_id: &str) -> Vec<Message> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(seeded_history)
            .clone()
    }

    /// Append a message to a session, creating the session if absent.
    pub fn append(&self, session_id: &str, role: MessageRole, content: &str) {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(seeded_history)
            .push(Message::new(role, content));
    }

    /// Current full ordered list for a session, without mutating state.
    ///
    /// Unknown session ids yield the seeded single-message list.
    pub fn snapshot(&self, session_id: &str) -> Vec<Message> {
        self.sessions
            .get(session_id)
            .map(|messages| messages.clone())
            .unwrap_or_else(seeded_history)
    }

    /// Replace a session's list with a fresh seeded list.
    ///
    /// Creates the entry if the session was unknown. Rejecting an absent
    /// or empty identifier is the service layer's job.
    pub fn reset(&self, session_id: &str) {
        self.sessions
            .insert(session_id.to_string(), seeded_history());
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
