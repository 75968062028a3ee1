//! In-memory conversation state for Parley.
//!
//! This module holds the `ConversationRegistry`: the process-wide mapping
//! from session id to the ordered message list of that session.

pub mod registry;

pub use registry::ConversationRegistry;
