//! Application state wiring the relay's collaborators together.
//!
//! The chat service is generic over repository/client traits, but AppState
//! pins it to the concrete infra implementations.

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_infra::llm::OllamaClient;
use parley_infra::llm::ollama::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use parley_infra::sqlite::pool::default_database_url;
use parley_infra::sqlite::{DatabasePool, SqliteChatLogRepository};

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatLogRepository, OllamaClient>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Initialize with the environment-resolved database URL and the
    /// fixed local completion endpoint.
    pub async fn init() -> anyhow::Result<Self> {
        // Ensure the data directory exists when the default file-backed
        // URL is in play.
        if std::env::var("PARLEY_DATABASE_URL").is_err() {
            let data_dir = std::env::var("PARLEY_DATA_DIR").unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                format!("{home}/.parley")
            });
            tokio::fs::create_dir_all(&data_dir).await?;
        }

        Self::init_with(&default_database_url(), DEFAULT_BASE_URL).await
    }

    /// Initialize against explicit endpoints (used by tests).
    pub async fn init_with(
        database_url: &str,
        completion_base_url: &str,
    ) -> anyhow::Result<Self> {
        let pool = DatabasePool::new(database_url).await?;
        let chat_log = SqliteChatLogRepository::new(pool);
        let completion = OllamaClient::new().with_base_url(completion_base_url);
        let chat_service = ChatService::new(chat_log, completion, DEFAULT_MODEL);

        Ok(Self {
            chat_service: Arc::new(chat_service),
        })
    }
}
