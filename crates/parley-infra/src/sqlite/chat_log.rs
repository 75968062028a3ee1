//! SQLite chat log repository implementation.
//!
//! Implements `ChatLogRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reads on the
//! reader pool and writes on the writer pool.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use parley_core::chat::repository::ChatLogRepository;
use parley_types::chat::{ChatLogEntry, ChatTurn};
use parley_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatLogRepository`.
pub struct SqliteChatLogRepository {
    pool: DatabasePool,
}

impl SqliteChatLogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the history projection.
struct ChatLogRow {
    session_id: String,
    user_message: String,
    assistant_response: String,
}

impl ChatLogRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            user_message: row.try_get("user_message")?,
            assistant_response: row.try_get("assistant_response")?,
        })
    }

    fn into_turn(self) -> ChatTurn {
        ChatTurn {
            session_id: self.session_id,
            user_message: self.user_message,
            assistant_response: self.assistant_response,
        }
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ChatLogRepository for SqliteChatLogRepository {
    async fn save(&self, entry: &ChatLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_log (id, session_id, user_message, assistant_response, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.session_id)
        .bind(&entry.user_message)
        .bind(&entry.assistant_response)
        .bind(format_datetime(&entry.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT session_id, user_message, assistant_response
               FROM chat_log WHERE session_id = ? ORDER BY created_at ASC"#,
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let log_row =
                ChatLogRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            turns.push(log_row.into_turn());
        }

        Ok(turns)
    }

    async fn find_all(&self) -> Result<Vec<ChatTurn>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT session_id, user_message, assistant_response
               FROM chat_log ORDER BY created_at ASC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let log_row =
                ChatLogRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            turns.push(log_row.into_turn());
        }

        Ok(turns)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_log WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_by_session(&self, session_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_log WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
