//! UI layer: the axum server, its routes, and the per-connection handlers.

mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
