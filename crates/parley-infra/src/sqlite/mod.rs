//! SQLite persistence for Parley.
//!
//! `DatabasePool` provides split reader/writer pools in WAL mode;
//! `SqliteChatLogRepository` implements the `ChatLogRepository` port.

pub mod chat_log;
pub mod pool;

pub use chat_log::SqliteChatLogRepository;
pub use pool::DatabasePool;
