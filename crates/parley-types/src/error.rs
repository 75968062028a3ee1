use thiserror::Error;

/// Errors from chat log repository operations (trait defined in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entry not found")]
    NotFound,
}

/// Errors from the completion endpoint.
///
/// The relay makes a single attempt per turn; every variant surfaces to
/// the caller as a server-side failure with no retry.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion endpoint returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Service-level errors for chat operations.
///
/// Validation variants map to 400, lookup misses to 404, and collaborator
/// failures to 500 at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message content is required")]
    EmptyMessage,

    #[error("session id is required")]
    MissingSessionId,

    #[error("chat id is required")]
    MissingChatId,

    #[error("invalid chat id: '{0}'")]
    InvalidChatId(String),

    #[error("no chat history found for session '{0}'")]
    HistoryNotFound(String),

    #[error("chat entry not found")]
    EntryNotFound,

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("storage failed: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::UpstreamStatus {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_chat_error_from_llm() {
        let err: ChatError = LlmError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, ChatError::Completion(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
