//! Chat service orchestrating the per-turn control flow.
//!
//! ChatService coordinates the ConversationRegistry, the completion
//! client, and the ChatLogRepository: append user message, complete with
//! the full history, append assistant reply, persist the exchange.

use tracing::{debug, warn};
use uuid::Uuid;

use parley_types::chat::{ChatLogEntry, ChatTurn};
use parley_types::error::{ChatError, RepositoryError};
use parley_types::llm::{CompletionRequest, MessageRole};

use crate::chat::repository::ChatLogRepository;
use crate::conversation::ConversationRegistry;
use crate::llm::CompletionClient;

/// Outcome of a successful turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub answer: String,
    pub session_id: String,
}

/// Orchestrates chat turns, history lookups, and session resets.
///
/// Generic over `ChatLogRepository` and `CompletionClient` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct ChatService<R: ChatLogRepository, L: CompletionClient> {
    registry: ConversationRegistry,
    chat_log: R,
    completion: L,
    model: String,
}

impl<R: ChatLogRepository, L: CompletionClient> ChatService<R, L> {
    /// Create a new chat service around the given collaborators.
    pub fn new(chat_log: R, completion: L, model: impl Into<String>) -> Self {
        Self {
            registry: ConversationRegistry::new(),
            chat_log,
            completion,
            model: model.into(),
        }
    }

    /// Access the in-memory registry.
    pub fn registry(&self) -> &ConversationRegistry {
        &self.registry
    }

    /// Access the chat log repository.
    pub fn chat_log(&self) -> &R {
        &self.chat_log
    }

    /// Run one turn: append the user message, complete against the full
    /// running history, append the reply, persist the exchange.
    ///
    /// Generates a fresh session id when none is supplied. There is no
    /// rollback on failure: an upstream error leaves the user message
    /// appended, and a storage error surfaces after both appends.
    pub async fn run_turn(
        &self,
        session_id: Option<String>,
        message: &str,
    ) -> Result<TurnReply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let session_id = session_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        self.registry
            .append(&session_id, MessageRole::User, message);

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: self.registry.snapshot(&session_id),
        };
        debug!(
            session_id = %session_id,
            history_len = request.messages.len(),
            "requesting completion"
        );
        let response = self.completion.complete(&request).await.map_err(|e| {
            warn!(session_id = %session_id, error = %e, "completion failed");
            e
        })?;

        self.registry
            .append(&session_id, MessageRole::Assistant, &response.content);

        let entry = ChatLogEntry::new(&session_id, message, &response.content);
        self.chat_log.save(&entry).await?;

        Ok(TurnReply {
            answer: response.content,
            session_id,
        })
    }

    /// Persisted turns for one session, or every session when no id is
    /// given. A filtered lookup with no matches is a not-found error; an
    /// unfiltered one may legitimately be empty.
    pub async fn history(
        &self,
        session_id: Option<&str>,
    ) -> Result<Vec<ChatTurn>, ChatError> {
        match session_id {
            Some(id) if !id.is_empty() => {
                let turns = self.chat_log.find_by_session(id).await?;
                if turns.is_empty() {
                    return Err(ChatError::HistoryNotFound(id.to_string()));
                }
                Ok(turns)
            }
            _ => Ok(self.chat_log.find_all().await?),
        }
    }

    /// Reset a session's in-memory state to the seeded system message.
    ///
    /// Persisted history is untouched: the chat log is an audit log,
    /// independent of live context.
    pub fn reset_session(&self, session_id: Option<String>) -> Result<String, ChatError> {
        let session_id = session_id
            .filter(|id| !id.is_empty())
            .ok_or(ChatError::MissingSessionId)?;
        self.registry.reset(&session_id);
        debug!(session_id = %session_id, "session reset to seed");
        Ok(session_id)
    }

    /// Delete one persisted entry by its store identifier.
    pub async fn delete_entry(&self, chat_id: Option<&str>) -> Result<(), ChatError> {
        let chat_id = match chat_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ChatError::MissingChatId),
        };
        let id: Uuid = chat_id
            .parse()
            .map_err(|_| ChatError::InvalidChatId(chat_id.to_string()))?;

        match self.chat_log.delete_by_id(&id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(ChatError::EntryNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every persisted entry for a session; returns the count.
    pub async fn delete_session_log(&self, session_id: &str) -> Result<u64, ChatError> {
        Ok(self.chat_log.delete_by_session(session_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use parley_types::chat::ChatTurn;
    use parley_types::error::LlmError;
    use parley_types::llm::CompletionResponse;

    /// In-memory chat log for service tests.
    #[derive(Default)]
    struct MemoryChatLog {
        entries: Mutex<Vec<ChatLogEntry>>,
        fail_saves: AtomicBool,
    }

    impl MemoryChatLog {
        fn failing() -> Self {
            let log = Self::default();
            log.fail_saves.store(true, Ordering::SeqCst);
            log
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    impl ChatLogRepository for MemoryChatLog {
        async fn save(&self, entry: &ChatLogEntry) -> Result<(), RepositoryError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(RepositoryError::Query("disk full".to_string()));
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn find_by_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.session_id == session_id)
                .map(|e| e.as_turn())
                .collect())
        }

        async fn find_all(&self) -> Result<Vec<ChatTurn>, RepositoryError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.as_turn())
                .collect())
        }

        async fn delete_by_id(&self, id: &Uuid) -> Result<(), RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.id != *id);
            if entries.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }

        async fn delete_by_session(&self, session_id: &str) -> Result<u64, RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.session_id != session_id);
            Ok((before - entries.len()) as u64)
        }
    }

    /// Canned completion client; echoes back a fixed reply or fails.
    struct StubCompletion {
        reply: Option<String>,
    }

    impl StubCompletion {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self { reply: None }
        }
    }

    impl CompletionClient for StubCompletion {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match &self.reply {
                Some(content) => Ok(CompletionResponse {
                    content: content.clone(),
                }),
                None => Err(LlmError::UpstreamStatus {
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    fn service(reply: &str) -> ChatService<MemoryChatLog, StubCompletion> {
        ChatService::new(
            MemoryChatLog::default(),
            StubCompletion::replying(reply),
            "llama3.2:3b",
        )
    }

    #[tokio::test]
    async fn test_turn_generates_session_id_when_absent() {
        let svc = service("4");
        let reply = svc.run_turn(None, "2+2?").await.unwrap();
        assert_eq!(reply.answer, "4");
        assert!(!reply.session_id.is_empty());
        assert_eq!(svc.chat_log().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_session_id_treated_as_absent() {
        let svc = service("ok");
        let reply = svc.run_turn(Some(String::new()), "hi").await.unwrap();
        assert!(!reply.session_id.is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let svc = service("ok");
        let err = svc.run_turn(None, "   ").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert_eq!(svc.registry().session_count(), 0);
    }

    #[tokio::test]
    async fn test_registry_grows_by_two_per_turn() {
        let svc = service("ok");
        for turn in 1..=3u32 {
            svc.run_turn(Some("s1".to_string()), "hi").await.unwrap();
            let messages = svc.registry().snapshot("s1");
            assert_eq!(messages.len(), (1 + 2 * turn) as usize);
        }
        assert_eq!(svc.chat_log().len(), 3);
    }

    #[tokio::test]
    async fn test_upstream_failure_leaves_user_message_appended() {
        let svc = ChatService::new(
            MemoryChatLog::default(),
            StubCompletion::failing(),
            "llama3.2:3b",
        );
        let err = svc.run_turn(Some("s1".to_string()), "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));

        // Seed + user message; no assistant append, nothing persisted.
        let messages = svc.registry().snapshot("s1");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(svc.chat_log().len(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_after_both_appends() {
        let svc = ChatService::new(
            MemoryChatLog::failing(),
            StubCompletion::replying("hello"),
            "llama3.2:3b",
        );
        let err = svc.run_turn(Some("s1".to_string()), "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Storage(_)));

        // No rollback: seed + user + assistant all remain.
        let messages = svc.registry().snapshot("s1");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_reset_keeps_persisted_history() {
        let svc = service("hello");
        svc.run_turn(Some("s1".to_string()), "hi").await.unwrap();
        svc.run_turn(Some("s1".to_string()), "again").await.unwrap();

        let reset_id = svc.reset_session(Some("s1".to_string())).unwrap();
        assert_eq!(reset_id, "s1");

        // Registry back to the single seed, store still has both turns.
        assert_eq!(svc.registry().snapshot("s1").len(), 1);
        assert_eq!(svc.history(Some("s1")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_requires_session_id() {
        let svc = service("ok");
        assert!(matches!(
            svc.reset_session(None),
            Err(ChatError::MissingSessionId)
        ));
        assert!(matches!(
            svc.reset_session(Some(String::new())),
            Err(ChatError::MissingSessionId)
        ));
    }

    #[tokio::test]
    async fn test_history_unseen_session_is_not_found() {
        let svc = service("ok");
        let err = svc.history(Some("never-seen")).await.unwrap_err();
        assert!(matches!(err, ChatError::HistoryNotFound(_)));

        // Unfiltered lookup on an empty store is just empty.
        assert!(svc.history(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_roundtrip_projection() {
        let svc = service("hello");
        svc.run_turn(Some("s1".to_string()), "hi").await.unwrap();

        let turns = svc.history(Some("s1")).await.unwrap();
        assert_eq!(
            turns,
            vec![ChatTurn {
                session_id: "s1".to_string(),
                user_message: "hi".to_string(),
                assistant_response: "hello".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_entry_twice_is_not_found() {
        let svc = service("hello");
        svc.run_turn(Some("s1".to_string()), "hi").await.unwrap();
        let id = svc.chat_log().entries.lock().unwrap()[0].id.to_string();

        svc.delete_entry(Some(&id)).await.unwrap();
        let err = svc.delete_entry(Some(&id)).await.unwrap_err();
        assert!(matches!(err, ChatError::EntryNotFound));
    }

    #[tokio::test]
    async fn test_delete_entry_validates_id() {
        let svc = service("ok");
        assert!(matches!(
            svc.delete_entry(None).await,
            Err(ChatError::MissingChatId)
        ));
        assert!(matches!(
            svc.delete_entry(Some("not-a-uuid")).await,
            Err(ChatError::InvalidChatId(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_session_log_counts_rows() {
        let svc = service("hello");
        svc.run_turn(Some("s1".to_string()), "one").await.unwrap();
        svc.run_turn(Some("s1".to_string()), "two").await.unwrap();
        svc.run_turn(Some("s2".to_string()), "other").await.unwrap();

        assert_eq!(svc.delete_session_log("s1").await.unwrap(), 2);
        assert_eq!(svc.delete_session_log("s1").await.unwrap(), 0);
        assert_eq!(svc.history(None).await.unwrap().len(), 1);
    }
}
