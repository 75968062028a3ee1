//! Completion client implementations for Parley.

pub mod ollama;

pub use ollama::OllamaClient;
