//! HTTP application layer for Parley.
//!
//! Exposed as a library so integration tests can build the router
//! against test-controlled endpoints; the `parley` binary lives in
//! `main.rs`.

pub mod http;
pub mod state;
