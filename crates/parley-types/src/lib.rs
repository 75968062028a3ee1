//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the relay:
//! messages, chat log records, the completion wire contract, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
