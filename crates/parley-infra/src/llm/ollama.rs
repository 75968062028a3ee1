//! OllamaClient -- concrete [`CompletionClient`] for a local Ollama server.
//!
//! Sends requests to Ollama's OpenAI-compatible endpoint
//! (`/chat/completions`) and extracts the first choice's message
//! content. One attempt per call; no retry, no backoff, no streaming.

use std::time::Duration;

use serde::Deserialize;

use parley_core::llm::CompletionClient;
use parley_types::error::LlmError;
use parley_types::llm::{CompletionRequest, CompletionResponse};

/// Ollama's local OpenAI-compatible API base.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// The fixed model the relay completes with.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Completion client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

/// Response body of `/chat/completions`; only the fields the relay reads.
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OllamaClient {
    /// Create a client against the default local endpoint.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // local models can be slow to generate
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, messages = request.messages.len(), "posting completion request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmError::MalformedResponse("no choices with message content".to_string())
            })?;

        Ok(CompletionResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;

    use parley_types::llm::{Message, MessageRole};

    /// Serve a router on an ephemeral port; returns the base URL.
    async fn spawn_endpoint(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                Message::new(MessageRole::System, "You are a helpful assistant."),
                Message::new(MessageRole::User, "2+2?"),
            ],
        }
    }

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                axum::Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "4"}}]
                }))
            }),
        );
        let base = spawn_endpoint(router).await;

        let client = OllamaClient::new().with_base_url(base);
        let response = client.complete(&request()).await.unwrap();
        assert_eq!(response.content, "4");
    }

    #[tokio::test]
    async fn test_complete_surfaces_upstream_status() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model not loaded") }),
        );
        let base = spawn_endpoint(router).await;

        let client = OllamaClient::new().with_base_url(base);
        let err = client.complete(&request()).await.unwrap_err();
        match err {
            LlmError::UpstreamStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_missing_content() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { axum::Json(serde_json::json!({"choices": []})) }),
        );
        let base = spawn_endpoint(router).await;

        let client = OllamaClient::new().with_base_url(base);
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_transport_failure() {
        // Nothing is listening on this port.
        let client = OllamaClient::new().with_base_url("http://127.0.0.1:1");
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }
}
