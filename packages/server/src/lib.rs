//! taikutsu room server library.
//!
//! A live "group boredom dial": every participant in a room holds a 0-100
//! value, the server aggregates per room and pushes the result to all live
//! WebSocket connections in that room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod tasks;
pub mod ui;
pub mod usecase;
