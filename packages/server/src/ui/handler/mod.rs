//! Request handlers, grouped by protocol.

pub mod http;
pub mod session;
pub mod websocket;
