//! StatsPusher implementations.

mod websocket;

pub use websocket::WebSocketStatsPusher;
