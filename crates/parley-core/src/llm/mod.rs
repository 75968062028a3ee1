//! Completion client abstraction for Parley.
//!
//! This module defines the `CompletionClient` trait that concrete
//! endpoint clients in `parley-infra` implement.

pub mod client;

pub use client::CompletionClient;
