//! ChatLogRepository trait definition.
//!
//! Provides append-only writes, point queries by session id, and deletes
//! for the durable chat log.

use parley_types::chat::{ChatLogEntry, ChatTurn};
use parley_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat log persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatLogRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Queries return `ChatTurn` projections: the store-assigned identifier
/// and timestamp never leave the persistence layer.
pub trait ChatLogRepository: Send + Sync {
    /// Persist one completed turn.
    fn save(
        &self,
        entry: &ChatLogEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All turns for a session, oldest first. Empty when the session has
    /// no persisted turns.
    fn find_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;

    /// All turns across all sessions, oldest first. Unbounded.
    fn find_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatTurn>, RepositoryError>> + Send;

    /// Delete a single entry by its store identifier.
    ///
    /// Returns `RepositoryError::NotFound` when no entry matched.
    fn delete_by_id(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete every entry for a session; returns the deleted-row count.
    fn delete_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
