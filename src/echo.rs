//! Companion echo server: answers every request with its own raw bytes.
pub mod request;
pub mod server;

pub use request::{bodiless_request, Request};
pub use server::{echo_response, serve, serve_listener};
