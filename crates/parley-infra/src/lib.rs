//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`:
//! the SQLite chat log repository and the Ollama completion client.

pub mod llm;
pub mod sqlite;
