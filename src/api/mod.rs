//! HTTP API for the assistant.

mod routes;

pub use routes::{serve, AppState};
