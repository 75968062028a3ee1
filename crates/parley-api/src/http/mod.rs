//! HTTP layer for the Parley API.

pub mod error;
pub mod handlers;
pub mod router;
