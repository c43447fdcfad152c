//! HTTP server module.
//!
//! Binds the listener, serves the router and drains in-flight connections on
//! SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{bind, start_server};
