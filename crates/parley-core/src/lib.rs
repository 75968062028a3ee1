//! Business logic and port definitions for Parley.
//!
//! This crate holds the Conversation Registry (the relay's only stateful
//! logic), the "ports" (repository and completion-client traits) that the
//! infrastructure layer implements, and the `ChatService` orchestration.
//! It depends only on `parley-types` -- never on `parley-infra` or any
//! database/IO crate.

pub mod chat;
pub mod conversation;
pub mod llm;
