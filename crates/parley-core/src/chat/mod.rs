//! Chat log persistence abstractions and turn orchestration for Parley.
//!
//! This module defines the `ChatLogRepository` trait that the
//! infrastructure layer implements, and the `ChatService` that wires the
//! registry, completion client, and repository together per turn.

pub mod repository;
pub mod service;
