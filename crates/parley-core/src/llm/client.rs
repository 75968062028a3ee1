//! CompletionClient trait definition.

use parley_types::error::LlmError;
use parley_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for completion endpoint clients.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in parley-infra (e.g., `OllamaClient`).
///
/// A call is a single synchronous attempt: no retry, no backoff, no
/// streaming. Timeouts, if any, belong to the implementation's
/// transport layer.
pub trait CompletionClient: Send + Sync {
    /// Human-readable client name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a session's full message list and receive one assistant reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
